//! ## pulsvakt-telemetry::logging
//! **Structured logging with tracing**
//!
//! ### Expectations:
//! - One init call at process start, before any component logs
//! - `RUST_LOG` controls verbosity, defaulting to `info`
//! - Sink I/O failures surface here as warnings, never as errors to callers

use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_thread_names(true)
            .init()
    }
}

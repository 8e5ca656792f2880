//! # pulsvakt-output
//!
//! Delivery strategies for generated patient events.
//!
//! Every sink implements the [`OutputSink`] capability trait and follows
//! the same best-effort contract: delivery failures are logged and
//! swallowed, never surfaced to the producer. Event production and event
//! delivery stay fully decoupled; a failing sink cannot roll back a
//! generator state transition.
//!
//! ### Sinks:
//! - `file`: append-only, one file per event label
//! - `tcp`: single accepted client, drop-while-unconnected
//! - `console`: stdout, mainly for interactive runs
//! - `memory`: in-memory capture for tests

pub mod console;
pub mod file;
pub mod memory;
pub mod sink;
pub mod tcp;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::{DeliveredRecord, MemorySink};
pub use sink::OutputSink;
pub use tcp::TcpSink;

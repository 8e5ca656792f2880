//! # Pulsvakt Configuration System
//!
//! Hierarchical configuration for the pulsvakt simulator.
//!
//! ## Features
//! - **Unified Configuration**: single source of truth across all components
//! - **Validation**: runtime validation of critical parameters
//! - **Environment Awareness**: `PULSVAKT_*` variables override any file value

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod output;
mod simulator;

pub use error::ConfigError;
pub use output::{OutputConfig, SinkKind};
pub use simulator::SimulatorConfig;

/// Top-level configuration container for all pulsvakt components.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct PulsvaktConfig {
    /// Simulation parameters (population size, seed, tick scheduling).
    #[validate(nested)]
    pub simulator: SimulatorConfig,

    /// Output sink selection and sink-specific parameters.
    #[validate(nested)]
    pub output: OutputConfig,
}

impl PulsvaktConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/pulsvakt.yaml` - base settings. If missing, defaults are used.
    /// 3. `PULSVAKT_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(PulsvaktConfig::default()));

        if Path::new("config/pulsvakt.yaml").exists() {
            figment = figment.merge(Yaml::file("config/pulsvakt.yaml"));
        }

        figment
            .merge(Env::prefixed("PULSVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        Figment::from(Serialized::defaults(PulsvaktConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("PULSVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

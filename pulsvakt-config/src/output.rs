//! Output sink selection and parameters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Which delivery strategy the driver should construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Console,
    File,
    Tcp,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct OutputConfig {
    pub sink: SinkKind,

    /// Base directory for the file sink; created on first delivery.
    pub base_directory: PathBuf,

    /// Listening port for the TCP sink.
    #[validate(range(min = 1))]
    pub port: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::Console,
            base_directory: PathBuf::from("output"),
            port: 8686,
        }
    }
}

//! ## pulsvakt-cli
//! **Operational entrypoint for the pulsvakt simulator**
//!
//! Wires configuration, telemetry, sink construction, and the generation
//! loop together. Everything interesting lives in the library crates; this
//! binary only composes them.

use clap::Parser;
use pulsvakt_telemetry::logging::EventLogger;

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let cli = Cli::parse();
    commands::run_command(cli).await
}

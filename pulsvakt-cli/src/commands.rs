use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use pulsvakt_config::{PulsvaktConfig, SinkKind};
use pulsvakt_engine::SimulationRuntime;
use pulsvakt_output::{ConsoleSink, FileSink, OutputSink, TcpSink};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Optional configuration file; defaults and PULSVAKT_* env vars apply
    /// either way.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the wall-clock generation loop (one tick per interval)
    Run(RunArgs),
    /// Fast-forward a fixed number of ticks with no interval waits
    Simulate(SimulateArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SinkArg {
    Console,
    File,
    Tcp,
}

impl From<SinkArg> for SinkKind {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Console => SinkKind::Console,
            SinkArg::File => SinkKind::File,
            SinkArg::Tcp => SinkKind::Tcp,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Override the configured sink
    #[arg(long, value_enum)]
    pub sink: Option<SinkArg>,
    /// Listening port for the TCP sink
    #[arg(long)]
    pub port: Option<u16>,
    /// Base directory for the file sink
    #[arg(long)]
    pub base_dir: Option<PathBuf>,
    /// Number of simulated patients
    #[arg(long)]
    pub patients: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of ticks to fast-forward
    #[arg(long, default_value_t = 100)]
    pub ticks: u64,
    /// Seed for the shared random source
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of simulated patients
    #[arg(long)]
    pub patients: Option<u32>,
    /// Override the configured sink
    #[arg(long, value_enum)]
    pub sink: Option<SinkArg>,
}

pub async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = match &cli.config {
        Some(path) => PulsvaktConfig::load_from_path(path)?,
        None => PulsvaktConfig::load()?,
    };

    match cli.command {
        Commands::Run(args) => run_mode(config, args).await,
        Commands::Simulate(args) => simulate_mode(config, args).await,
    }
}

async fn run_mode(
    mut config: PulsvaktConfig,
    args: RunArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Some(sink) = args.sink {
        config.output.sink = sink.into();
    }
    if let Some(port) = args.port {
        config.output.port = port;
    }
    if let Some(base_dir) = args.base_dir {
        config.output.base_directory = base_dir;
    }
    if let Some(patients) = args.patients {
        config.simulator.patient_count = patients;
    }

    let (sink, tcp) = build_sink(&config).await?;
    let runtime = SimulationRuntime::new(config, sink);

    tokio::select! {
        _ = runtime.run() => {}
        _ = tokio::signal::ctrl_c() => info!("Received shutdown signal"),
    }

    if let Some(tcp) = tcp {
        tcp.shutdown().await;
    }
    Ok(())
}

async fn simulate_mode(
    mut config: PulsvaktConfig,
    args: SimulateArgs,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Some(sink) = args.sink {
        config.output.sink = sink.into();
    }
    if let Some(seed) = args.seed {
        config.simulator.seed = seed;
    }
    if let Some(patients) = args.patients {
        config.simulator.patient_count = patients;
    }

    let (sink, tcp) = build_sink(&config).await?;
    let runtime = SimulationRuntime::new(config, sink);
    runtime.run_ticks(args.ticks).await;

    if let Some(tcp) = tcp {
        tcp.shutdown().await;
    }
    Ok(())
}

/// Builds the configured sink. The TCP sink is additionally returned as its
/// concrete type so the caller can run its shutdown hook at the end.
async fn build_sink(
    config: &PulsvaktConfig,
) -> Result<(Arc<dyn OutputSink>, Option<Arc<TcpSink>>), std::io::Error> {
    Ok(match config.output.sink {
        SinkKind::Console => (Arc::new(ConsoleSink::new()), None),
        SinkKind::File => (Arc::new(FileSink::new(&config.output.base_directory)), None),
        SinkKind::Tcp => {
            let tcp = Arc::new(TcpSink::bind(config.output.port).await?);
            (tcp.clone(), Some(tcp))
        }
    })
}

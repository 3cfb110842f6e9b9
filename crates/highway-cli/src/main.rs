use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use highway_cli::commands::{inspect::handle_inspect, run::handle_run};
use highway_cli::config::resolve_config;
use highway_lib::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Highway station index and route planner")]
struct Cli {
    /// Maximum number of vehicles a station can hold.
    /// Falls back to HIGHWAY_POOL_CAPACITY, then 512.
    #[arg(long, global = true)]
    pool_capacity: Option<usize>,

    /// Result format.
    #[arg(long, value_enum, default_value_t = FormatArg::Text, global = true)]
    format: FormatArg,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a command script and print one result per command (the default).
    Run {
        /// Read commands from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Execute a command script silently, then print the station tree.
    Inspect {
        /// Read commands from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = resolve_config(cli.pool_capacity)?;
    let format = OutputFormat::from(cli.format);

    match cli.command {
        None => handle_run(None, config, format),
        Some(Command::Run { input }) => handle_run(input.as_deref(), config, format),
        Some(Command::Inspect { input }) => handle_inspect(input.as_deref(), config, format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

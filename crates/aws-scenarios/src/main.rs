mod commands;
mod config;
mod environment;
mod error;
mod interaction;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use scenario_operations::providers::AwsContext;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::commands::Commands;
use crate::config::Config;
use crate::error::{CliError, Result};

#[derive(Parser)]
#[command(name = "aws-scenarios")]
#[command(version = env!("AWS_SCENARIOS_VERSION"))]
#[command(about = "Run AWS SDK scenarios that clean up after themselves", long_about = None)]
struct Cli {
    /// Configuration file (default: ./aws-scenarios.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    region: Option<String>,

    /// Send every request to this endpoint, e.g. a LocalStack URL
    #[arg(long, global = true, value_name = "URL")]
    endpoint_url: Option<String>,

    /// Named profile from the shared AWS config
    #[arg(long, global = true)]
    profile: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too.
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.override_aws(cli.region, cli.endpoint_url, cli.profile);

    let cancellation = CancellationToken::new();
    let interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted; stopping before the next step");
            interrupt.cancel();
        }
    });

    let aws = AwsContext::load(&config.aws).await;
    cli.command.execute(&aws, config, cancellation).await
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }

    if let Some(suggestion) = error.suggestion() {
        eprintln!("suggestion: {suggestion}");
    }
}

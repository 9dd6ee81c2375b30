//! renovate-pilot CLI

mod cli;

use clap::Parser;
use cli::RunArgs;
use cli::style::Stylize;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a tracing filter
const LOG_ENV: &str = "RENOVATE_PILOT_LOG";

/// Approve, trigger and land labeled dependency-update PRs on GitHub
#[derive(Parser)]
#[command(name = "renovate-pilot", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    run: RunArgs,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "renovate_pilot=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli::run_pilot(cli.run, cli.verbose).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            anstream::eprintln!("{} {e}", "error:".error());
            ExitCode::FAILURE
        }
    }
}

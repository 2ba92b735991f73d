use std::process::ExitCode;

use clap::Parser;
use refcheck_resolver::ResolveError;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod progress;
mod ui;

use commands::Outcome;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(Outcome::Determined) => ExitCode::SUCCESS,
        Ok(Outcome::LookupFailed) => ExitCode::from(3),
        Err(error) => {
            eprintln!("refcheck error: {error:#}");
            if error.downcast_ref::<ResolveError>().is_some() {
                ExitCode::from(3)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run() -> anyhow::Result<Outcome> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(&flags)?;
    ui::init(&flags);

    commands::dispatch::dispatch(cli, &flags).await
}

fn init_tracing(flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let level = if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("REFCHECK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

use crate::cli::{Cli, Commands, GlobalFlags};
use crate::commands::{self, Outcome};

/// Dispatch a parsed command line to its handler.
pub async fn dispatch(cli: Cli, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    match cli.command {
        Some(Commands::Refs(args)) => commands::refs::handle(&args, flags).await,
        None => commands::check::handle(&cli.check, flags).await,
    }
}

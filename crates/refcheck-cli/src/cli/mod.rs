use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::{CheckArgs, Commands, RefsArgs};

/// Top-level CLI parser for the `refcheck` binary.
#[derive(Debug, Parser)]
#[command(
    name = "refcheck",
    version,
    about = "Check that cited DOIs resolve to real, matching publications",
    subcommand_negates_reqs = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub check: CheckArgs,

    /// Output format: text, json, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Colour status words: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Resolution source: crossref, pubmed (overrides config)
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Contact address for Crossref's polite pool (overrides config)
    #[arg(long, global = true, value_name = "EMAIL")]
    pub mailto: Option<String>,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            color: self.color,
            quiet: self.quiet,
            verbose: self.verbose,
            source: self.source.clone(),
            timeout: self.timeout,
            mailto: self.mailto.clone(),
        }
    }
}

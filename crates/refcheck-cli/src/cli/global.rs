use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable verdict lines and tables.
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Single-line JSON.
    Raw,
}

/// When to colour status words.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub color: ColorMode,
    pub quiet: bool,
    pub verbose: bool,
    pub source: Option<String>,
    pub timeout: Option<u64>,
    pub mailto: Option<String>,
}

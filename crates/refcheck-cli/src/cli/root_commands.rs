use clap::{Args, Subcommand};

/// Subcommands. Without one, `refcheck <DOI>` checks a single reference.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Check every cited DOI in an article's reference list (from Crossref).
    Refs(RefsArgs),
}

/// Arguments for the default single-reference check.
#[derive(Clone, Debug, Default, Args)]
pub struct CheckArgs {
    /// DOI to check, e.g. `10.1038/nature12373` or `https://doi.org/...`
    #[arg(required = true)]
    pub doi: Option<String>,

    /// Asserted title.
    #[arg(long)]
    pub title: Option<String>,

    /// Asserted author, in citation order (repeatable).
    #[arg(long = "author", value_name = "NAME")]
    pub authors: Vec<String>,

    /// Asserted publication year.
    #[arg(long)]
    pub year: Option<i32>,

    /// Asserted journal or container title.
    #[arg(long)]
    pub container: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct RefsArgs {
    /// DOI of the citing article.
    pub doi: String,
}

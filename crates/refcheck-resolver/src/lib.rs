//! # refcheck-resolver
//!
//! DOI metadata clients and the reference checking routine for refcheck.
//!
//! Resolves DOIs to bibliographic metadata through:
//! - Crossref (`api.crossref.org/works`), which also publishes reference lists
//! - PubMed (NCBI E-utilities `esearch` + `esummary`)
//!
//! [`check`] turns one lookup into a [`Verdict`](refcheck_core::Verdict);
//! [`check_reference_list`] walks a citing article's bibliography, one lookup
//! at a time.

pub mod check;
pub mod crossref;
pub mod pubmed;

mod error;
mod http;

pub use check::{check, check_reference_list};
pub use crossref::CitingArticle;
pub use error::ResolveError;

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use refcheck_core::{Doi, ResolvedRecord};
use serde::{Deserialize, Serialize};

// ── Source ─────────────────────────────────────────────────────────

/// A metadata resolution service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Crossref,
    Pubmed,
}

impl Source {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crossref => "crossref",
            Self::Pubmed => "pubmed",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crossref" | "cr" => Ok(Self::Crossref),
            "pubmed" | "ncbi" | "entrez" => Ok(Self::Pubmed),
            other => Err(ResolveError::UnsupportedSource(other.to_string())),
        }
    }
}

// ── MetadataSource ─────────────────────────────────────────────────

/// Anything that can map a DOI to a [`ResolvedRecord`].
///
/// `Ok(None)` means the service positively reports the DOI as unknown. Every
/// failure to get an answer is an `Err`.
pub trait MetadataSource {
    fn resolve(
        &self,
        doi: &Doi,
    ) -> impl Future<Output = Result<Option<ResolvedRecord>, ResolveError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// Connection settings for [`ResolverClient`].
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub source: Source,
    pub timeout: Duration,
    pub user_agent: String,
    pub crossref_base_url: String,
    /// Contact address for Crossref's polite pool.
    pub crossref_mailto: Option<String>,
    pub pubmed_base_url: String,
    pub pubmed_tool: String,
    pub pubmed_email: Option<String>,
    pub pubmed_api_key: Option<String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            source: Source::Crossref,
            timeout: Duration::from_secs(10),
            user_agent: format!("refcheck/{}", env!("CARGO_PKG_VERSION")),
            crossref_base_url: "https://api.crossref.org".to_string(),
            crossref_mailto: None,
            pubmed_base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string(),
            pubmed_tool: "refcheck".to_string(),
            pubmed_email: None,
            pubmed_api_key: None,
        }
    }
}

/// HTTP client for the supported resolution services.
///
/// One client is built per process; it is bound to the source selected in
/// its settings when used as a [`MetadataSource`].
pub struct ResolverClient {
    http: reqwest::Client,
    settings: ResolverSettings,
}

impl ResolverClient {
    /// Create a client with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Http`] if the underlying `reqwest::Client`
    /// cannot be built (e.g. the TLS backend fails to initialize).
    pub fn new(settings: ResolverSettings) -> Result<Self, ResolveError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    /// The source used by [`MetadataSource::resolve`].
    #[must_use]
    pub const fn source(&self) -> Source {
        self.settings.source
    }

    /// Look up `doi` in a specific source.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the HTTP request fails, the service
    /// returns a non-success status other than 404, or the response cannot
    /// be parsed.
    pub async fn resolve_with(
        &self,
        doi: &Doi,
        source: Source,
    ) -> Result<Option<ResolvedRecord>, ResolveError> {
        match source {
            Source::Crossref => self.crossref_record(doi).await,
            Source::Pubmed => self.pubmed_record(doi).await,
        }
    }
}

impl MetadataSource for ResolverClient {
    async fn resolve(&self, doi: &Doi) -> Result<Option<ResolvedRecord>, ResolveError> {
        self.resolve_with(doi, self.settings.source).await
    }
}

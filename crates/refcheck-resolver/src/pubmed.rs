//! PubMed client over NCBI E-utilities.
//!
//! Two requests per lookup: `esearch` maps the DOI to a PMID through the
//! `[doi]` field tag, then `esummary` returns the citation fields for that
//! PMID. An empty id list means PubMed does not index the DOI, which is
//! weaker evidence than a Crossref 404: PubMed only covers biomedical
//! literature.

use std::collections::HashMap;

use refcheck_core::compare::family_name;
use refcheck_core::{Author, Doi, ResolvedRecord};
use serde::Deserialize;

use crate::{
    ResolverClient, Source,
    error::ResolveError,
    http::{check_response, read_json},
};

#[derive(Deserialize)]
struct SearchEnvelope {
    esearchresult: Option<SearchResult>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct SummaryEnvelope {
    result: Option<HashMap<String, serde_json::Value>>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SummaryDoc {
    #[serde(default)]
    title: String,
    #[serde(default)]
    authors: Vec<SummaryAuthor>,
    #[serde(default)]
    fulljournalname: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    pubdate: String,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SummaryAuthor {
    name: String,
    #[serde(default)]
    authtype: String,
}

impl ResolverClient {
    /// Resolve `doi` against PubMed.
    ///
    /// Returns `Ok(None)` if no PubMed record carries the DOI.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if either request fails, E-utilities returns
    /// a non-success status, or a response carries an `ERROR` field or
    /// cannot be parsed.
    pub async fn pubmed_record(&self, doi: &Doi) -> Result<Option<ResolvedRecord>, ResolveError> {
        let Some(pmid) = self.pubmed_search(doi).await? else {
            tracing::debug!(%doi, "pubmed has no record");
            return Ok(None);
        };
        self.pubmed_summary(doi, &pmid).await
    }

    async fn pubmed_search(&self, doi: &Doi) -> Result<Option<String>, ResolveError> {
        let term = format!("{doi}[doi]");
        let url = self.eutils_url(
            "esearch.fcgi",
            &[("db", "pubmed"), ("retmode", "json"), ("retmax", "1"), ("term", &term)],
        );
        tracing::debug!(source = %Source::Pubmed, %doi, %url, "resolving DOI");

        let Some(resp) = check_response(self.http.get(&url).send().await?).await? else {
            return Err(ResolveError::Api {
                status: 404,
                message: "esearch endpoint not found".to_string(),
            });
        };
        let envelope: SearchEnvelope = read_json(resp, "pubmed esearch").await?;
        parse_search(envelope)
    }

    async fn pubmed_summary(
        &self,
        doi: &Doi,
        pmid: &str,
    ) -> Result<Option<ResolvedRecord>, ResolveError> {
        let url = self.eutils_url(
            "esummary.fcgi",
            &[("db", "pubmed"), ("retmode", "json"), ("id", pmid)],
        );
        tracing::debug!(%pmid, %url, "fetching pubmed summary");

        let Some(resp) = check_response(self.http.get(&url).send().await?).await? else {
            return Err(ResolveError::Api {
                status: 404,
                message: "esummary endpoint not found".to_string(),
            });
        };
        let envelope: SummaryEnvelope = read_json(resp, "pubmed esummary").await?;
        parse_summary(doi, pmid, envelope).map(Some)
    }

    fn eutils_url(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let base = self.settings.pubmed_base_url.trim_end_matches('/');
        let identity = [
            ("tool", Some(self.settings.pubmed_tool.as_str())),
            ("email", self.settings.pubmed_email.as_deref()),
            ("api_key", self.settings.pubmed_api_key.as_deref()),
        ];
        let query = params
            .iter()
            .map(|(k, v)| (*k, *v))
            .chain(
                identity
                    .into_iter()
                    .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k, v))),
            )
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{base}/{endpoint}?{query}")
    }
}

fn parse_search(envelope: SearchEnvelope) -> Result<Option<String>, ResolveError> {
    if let Some(error) = envelope.error {
        return Err(ResolveError::Parse(format!("esearch error: {error}")));
    }
    let result = envelope
        .esearchresult
        .ok_or_else(|| ResolveError::Parse("esearch response has no esearchresult".into()))?;
    if let Some(error) = result.error {
        return Err(ResolveError::Parse(format!("esearch error: {error}")));
    }
    Ok(result.idlist.into_iter().next())
}

fn parse_summary(
    doi: &Doi,
    pmid: &str,
    envelope: SummaryEnvelope,
) -> Result<ResolvedRecord, ResolveError> {
    if let Some(error) = envelope.error {
        return Err(ResolveError::Parse(format!("esummary error: {error}")));
    }
    let value = envelope
        .result
        .and_then(|mut result| result.remove(pmid))
        .ok_or_else(|| ResolveError::Parse(format!("esummary has no entry for PMID {pmid}")))?;
    let doc: SummaryDoc = serde_json::from_value(value)
        .map_err(|e| ResolveError::Parse(format!("esummary entry {pmid}: {e}")))?;
    if let Some(error) = doc.error {
        return Err(ResolveError::Parse(format!("esummary entry {pmid}: {error}")));
    }

    let short_container = Some(doc.source.trim().to_string()).filter(|s| !s.is_empty());
    let container = Some(doc.fulljournalname.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| short_container.clone());

    Ok(ResolvedRecord {
        doi: doi.clone(),
        title: Some(doc.title.trim().to_string()).filter(|t| !t.is_empty()),
        authors: doc.authors.iter().map(to_author).collect(),
        container,
        short_container,
        year: pubdate_year(&doc.pubdate),
        source: Source::Pubmed.to_string(),
    })
}

/// PubMed lists authors as `"Family Initials"`; collective names stay whole.
fn to_author(author: &SummaryAuthor) -> Author {
    let name = author.name.trim();
    if author.authtype.eq_ignore_ascii_case("CollectiveName") {
        return Author::new(None, name);
    }
    let family = family_name(name);
    let given = name
        .strip_prefix(family.as_str())
        .or_else(|| name.strip_suffix(family.as_str()))
        .unwrap_or_default()
        .trim();
    Author::new(Some(given).filter(|g| !g.is_empty()), &family)
}

/// `pubdate` looks like `2013 Aug 1`, `2013 Jul-Aug` or `2013`.
fn pubdate_year(pubdate: &str) -> Option<i32> {
    let head = pubdate.trim().get(..4)?;
    if head.bytes().all(|b| b.is_ascii_digit()) {
        head.parse().ok()
    } else {
        None
    }
}

//! Crossref REST API client.
//!
//! `GET /works/{doi}` returns the work's metadata and, when the publisher
//! deposited it, the work's own reference list. A 404 means Crossref has no
//! record of the DOI.

use refcheck_core::{Author, CitedReference, Doi, ResolvedRecord};
use serde::Deserialize;

use crate::{
    ResolverClient, Source,
    error::ResolveError,
    http::{check_response, read_json},
};

#[derive(Deserialize)]
struct WorkEnvelope {
    message: Work,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Work {
    #[serde(rename = "DOI")]
    doi: Option<String>,
    #[serde(default)]
    title: Vec<String>,
    #[serde(default)]
    author: Vec<WorkAuthor>,
    #[serde(default)]
    container_title: Vec<String>,
    #[serde(default)]
    short_container_title: Vec<String>,
    issued: Option<PartialDate>,
    published_print: Option<PartialDate>,
    published_online: Option<PartialDate>,
    #[serde(default)]
    reference: Vec<WorkReference>,
}

#[derive(Deserialize)]
struct WorkAuthor {
    given: Option<String>,
    family: Option<String>,
    /// Organisational authors carry `name` instead of `given`/`family`.
    name: Option<String>,
}

#[derive(Deserialize)]
struct PartialDate {
    #[serde(rename = "date-parts", default)]
    date_parts: Vec<Vec<Option<i32>>>,
}

impl PartialDate {
    fn year(&self) -> Option<i32> {
        self.date_parts.first()?.first().copied().flatten()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct WorkReference {
    key: Option<String>,
    #[serde(rename = "DOI")]
    doi: Option<String>,
    article_title: Option<String>,
    author: Option<String>,
    year: Option<String>,
    journal_title: Option<String>,
    volume_title: Option<String>,
    unstructured: Option<String>,
}

/// A work together with the references it cites.
#[derive(Debug, Clone)]
pub struct CitingArticle {
    pub record: ResolvedRecord,
    /// Bibliography in deposit order, indexed from 1.
    pub references: Vec<CitedReference>,
}

impl ResolverClient {
    /// Resolve `doi` against Crossref.
    ///
    /// Returns `Ok(None)` if Crossref answers 404.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the HTTP request fails, Crossref returns a
    /// non-success status other than 404, or the response cannot be parsed.
    pub async fn crossref_record(&self, doi: &Doi) -> Result<Option<ResolvedRecord>, ResolveError> {
        Ok(self
            .crossref_work(doi)
            .await?
            .map(|work| work_to_record(doi, &work)))
    }

    /// Fetch a work and its deposited reference list.
    ///
    /// Returns `Ok(None)` if Crossref answers 404. A work without deposited
    /// references yields an empty `references` list.
    ///
    /// # Errors
    ///
    /// See [`Self::crossref_record`].
    pub async fn crossref_citing_article(
        &self,
        doi: &Doi,
    ) -> Result<Option<CitingArticle>, ResolveError> {
        Ok(self.crossref_work(doi).await?.map(|work| {
            let record = work_to_record(doi, &work);
            let references = work
                .reference
                .into_iter()
                .enumerate()
                .map(|(i, r)| to_cited_reference(i + 1, r))
                .collect();
            CitingArticle { record, references }
        }))
    }

    async fn crossref_work(&self, doi: &Doi) -> Result<Option<Work>, ResolveError> {
        let url = self.crossref_work_url(doi);
        tracing::debug!(source = %Source::Crossref, %doi, %url, "resolving DOI");

        let Some(resp) = check_response(self.http.get(&url).send().await?).await? else {
            tracing::debug!(%doi, "crossref has no record");
            return Ok(None);
        };
        let envelope: WorkEnvelope = read_json(resp, "crossref work").await?;
        Ok(Some(envelope.message))
    }

    fn crossref_work_url(&self, doi: &Doi) -> String {
        let base = self.settings.crossref_base_url.trim_end_matches('/');
        let mut url = format!("{base}/works/{}", urlencoding::encode(doi.as_str()));
        if let Some(mailto) = self.settings.crossref_mailto.as_deref() {
            url.push_str("?mailto=");
            url.push_str(&urlencoding::encode(mailto));
        }
        url
    }
}

fn work_to_record(requested: &Doi, work: &Work) -> ResolvedRecord {
    let doi = work
        .doi
        .as_deref()
        .and_then(|d| Doi::parse(d).ok())
        .unwrap_or_else(|| requested.clone());

    let authors = work
        .author
        .iter()
        .filter_map(|a| {
            let family = a.family.as_deref().or(a.name.as_deref())?;
            Some(Author::new(a.given.as_deref(), &collapse_whitespace(family)))
        })
        .collect();

    let year = [&work.issued, &work.published_print, &work.published_online]
        .into_iter()
        .flatten()
        .find_map(PartialDate::year);

    ResolvedRecord {
        doi,
        title: first_non_blank(&work.title),
        authors,
        container: first_non_blank(&work.container_title),
        short_container: first_non_blank(&work.short_container_title),
        year,
        source: Source::Crossref.to_string(),
    }
}

fn to_cited_reference(index: usize, r: WorkReference) -> CitedReference {
    CitedReference {
        index,
        key: r.key,
        doi: r.doi,
        title: r.article_title,
        author: r.author,
        year: r.year,
        container: r.journal_title.or(r.volume_title),
        unstructured: r.unstructured,
    }
}

/// First entry with visible text, newlines folded into spaces.
fn first_non_blank(values: &[String]) -> Option<String> {
    values
        .iter()
        .map(|v| collapse_whitespace(v))
        .find(|v| !v.is_empty())
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

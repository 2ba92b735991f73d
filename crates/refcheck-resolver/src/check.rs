//! The lookup-and-compare routine and the sequential reference-list checker.

use refcheck_core::{
    CoreError, Reference, ReferenceEntry, ReferenceReport, ReferenceStatus, Verdict, compare,
};

use crate::MetadataSource;
use crate::crossref::CitingArticle;

/// Look up `reference.doi` and compare the result against the asserted fields.
///
/// Never fails: lookup failures become [`Verdict::LookupError`], and only an
/// explicit not-found answer becomes [`Verdict::NotFound`].
pub async fn check<S: MetadataSource>(source: &S, reference: &Reference) -> Verdict {
    tracing::debug!(
        doi = %reference.doi,
        doi_only = !reference.asserts_metadata(),
        "checking reference"
    );
    match source.resolve(&reference.doi).await {
        Ok(Some(record)) => {
            let verdict = compare(reference, &record);
            tracing::debug!(doi = %reference.doi, source = %record.source, %verdict, "compared");
            verdict
        }
        Ok(None) => {
            tracing::debug!(doi = %reference.doi, "not found");
            Verdict::NotFound
        }
        Err(error) => {
            tracing::warn!(doi = %reference.doi, %error, "lookup failed");
            Verdict::LookupError {
                reason: error.to_string(),
            }
        }
    }
}

/// Check every entry of `article`'s bibliography, strictly one after another.
///
/// Entries without a DOI or with a malformed one are recorded without any
/// lookup. `on_entry` is called once per entry, in bibliography order, as
/// soon as its status is known.
pub async fn check_reference_list<S, F>(
    source: &S,
    article: &CitingArticle,
    mut on_entry: F,
) -> ReferenceReport
where
    S: MetadataSource,
    F: FnMut(&ReferenceEntry),
{
    let mut entries = Vec::with_capacity(article.references.len());

    for cited in &article.references {
        let status = match cited.to_reference() {
            Ok(None) => ReferenceStatus::MissingDoi,
            Ok(Some(reference)) => ReferenceStatus::Checked {
                verdict: check(source, &reference).await,
            },
            Err(error) => ReferenceStatus::InvalidDoi {
                raw: cited.doi.clone().unwrap_or_default(),
                reason: match error {
                    CoreError::InvalidDoi { reason, .. } => reason,
                    other => other.to_string(),
                },
            },
        };

        let entry = ReferenceEntry {
            index: cited.index,
            key: cited.key.clone(),
            doi: cited.doi.clone(),
            status,
        };
        on_entry(&entry);
        entries.push(entry);
    }

    ReferenceReport::new(
        article.record.doi.clone(),
        article.record.title.clone(),
        entries,
    )
}

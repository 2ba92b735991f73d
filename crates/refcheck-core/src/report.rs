//! Reference-list checking: the entries of a citing article's bibliography and
//! the per-entry statuses and summary produced by checking them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::doi::Doi;
use crate::errors::CoreError;
use crate::reference::Reference;
use crate::verdict::Verdict;

/// One entry of a citing article's bibliography, as the publisher deposited it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitedReference {
    /// 1-based position in the bibliography.
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// DOI exactly as deposited, not yet validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// First author, usually only the family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Year as deposited; may carry a disambiguation letter (`2010a`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstructured: Option<String>,
}

impl CitedReference {
    /// Turn the entry into an asserted [`Reference`].
    ///
    /// Returns `Ok(None)` when the entry carries no DOI. Unparseable years are
    /// dropped rather than asserted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDoi`] when the deposited DOI is malformed.
    pub fn to_reference(&self) -> Result<Option<Reference>, CoreError> {
        let Some(raw) = self.doi.as_deref().filter(|d| !d.trim().is_empty()) else {
            return Ok(None);
        };

        let mut reference = Reference::parse(raw)?;
        if let Some(title) = &self.title {
            reference = reference.with_title(title.clone());
        }
        if let Some(author) = &self.author {
            reference = reference.with_authors([author.clone()]);
        }
        if let Some(container) = &self.container {
            reference = reference.with_container(container.clone());
        }
        if let Some(year) = self.year.as_deref().and_then(leading_year) {
            reference = match reference.clone().with_year(year) {
                Ok(with_year) => with_year,
                Err(_) => reference,
            };
        }
        Ok(Some(reference))
    }
}

fn leading_year(raw: &str) -> Option<i32> {
    let digits: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

/// Outcome for one bibliography entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReferenceStatus {
    /// The entry had a valid DOI and was looked up.
    Checked { verdict: Verdict },
    /// The entry carries no DOI; nothing was looked up.
    MissingDoi,
    /// The deposited DOI is malformed; nothing was looked up.
    InvalidDoi { raw: String, reason: String },
}

impl ReferenceStatus {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Checked { verdict } => match verdict {
                Verdict::Valid => "found",
                Verdict::Mismatch { .. } => "mismatch",
                Verdict::NotFound => "not found",
                Verdict::LookupError { .. } => "lookup error",
            },
            Self::MissingDoi => "missing DOI",
            Self::InvalidDoi { .. } => "invalid DOI",
        }
    }
}

/// A checked bibliography entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(flatten)]
    pub status: ReferenceStatus,
}

/// Status counts over a whole bibliography.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub found: usize,
    pub mismatched: usize,
    pub not_found: usize,
    pub missing_doi: usize,
    pub invalid_doi: usize,
    pub lookup_errors: usize,
}

impl Summary {
    #[must_use]
    pub fn from_entries(entries: &[ReferenceEntry]) -> Self {
        let mut summary = Self {
            total: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            match &entry.status {
                ReferenceStatus::Checked { verdict } => match verdict {
                    Verdict::Valid => summary.found += 1,
                    Verdict::Mismatch { .. } => summary.mismatched += 1,
                    Verdict::NotFound => summary.not_found += 1,
                    Verdict::LookupError { .. } => summary.lookup_errors += 1,
                },
                ReferenceStatus::MissingDoi => summary.missing_doi += 1,
                ReferenceStatus::InvalidDoi { .. } => summary.invalid_doi += 1,
            }
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "checked {} references: {} found, {} mismatched, {} not found, {} missing DOI, {} invalid DOI, {} lookup errors",
            self.total,
            self.found,
            self.mismatched,
            self.not_found,
            self.missing_doi,
            self.invalid_doi,
            self.lookup_errors,
        )
    }
}

/// Result of checking every entry of a citing article's bibliography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceReport {
    /// DOI of the citing article.
    pub doi: Doi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub entries: Vec<ReferenceEntry>,
    pub summary: Summary,
}

impl ReferenceReport {
    #[must_use]
    pub fn new(doi: Doi, title: Option<String>, entries: Vec<ReferenceEntry>) -> Self {
        let summary = Summary::from_entries(&entries);
        Self {
            doi,
            title,
            entries,
            summary,
        }
    }
}

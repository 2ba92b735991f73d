//! Asserted references and the records a resolution service returns for them.

use serde::{Deserialize, Serialize};

use crate::doi::Doi;
use crate::errors::CoreError;

/// Earliest year accepted as an asserted publication year.
const MIN_YEAR: i32 = 1500;
/// Latest year accepted as an asserted publication year.
const MAX_YEAR: i32 = 2999;

/// The bibliographic claim under test.
///
/// Only the DOI is required. Every other field is an optional assertion that
/// the comparator checks when the resolved record carries the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub doi: Doi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Author names in citation order, as written in the citing document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Journal, proceedings or book title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
}

impl Reference {
    /// A reference asserting nothing but its DOI.
    #[must_use]
    pub const fn new(doi: Doi) -> Self {
        Self {
            doi,
            title: None,
            authors: Vec::new(),
            year: None,
            container: None,
        }
    }

    /// Parse `doi` and start a reference from it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDoi`] if `doi` is malformed.
    pub fn parse(doi: &str) -> Result<Self, CoreError> {
        Doi::parse(doi).map(Self::new)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_blank(title.into());
        self
    }

    #[must_use]
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors
            .into_iter()
            .filter_map(|name| non_blank(name.into()))
            .collect();
        self
    }

    /// Assert a publication year.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for years outside 1500..=2999.
    pub fn with_year(mut self, year: i32) -> Result<Self, CoreError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CoreError::Validation(format!(
                "publication year {year} is outside {MIN_YEAR}..={MAX_YEAR}"
            )));
        }
        self.year = Some(year);
        Ok(self)
    }

    #[must_use]
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = non_blank(container.into());
        self
    }

    /// Whether any field beyond the DOI is asserted.
    #[must_use]
    pub fn asserts_metadata(&self) -> bool {
        self.title.is_some() || !self.authors.is_empty() || self.year.is_some() || self.container.is_some()
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// A single author as reported by a resolution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    /// Family name, or the full name of an organisational author.
    pub family: String,
}

impl Author {
    #[must_use]
    pub fn new(given: Option<&str>, family: &str) -> Self {
        Self {
            given: given.map(str::to_string),
            family: family.to_string(),
        }
    }

    /// `Given Family`, or just the family name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.given {
            Some(given) if !given.is_empty() => format!("{given} {}", self.family),
            _ => self.family.clone(),
        }
    }
}

/// Metadata a resolution service returned for a DOI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub doi: Doi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Abbreviated container title (ISO 4 style, e.g. `Phys. Rev. Lett.`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Name of the service that answered (e.g. `crossref`, `pubmed`).
    pub source: String,
}

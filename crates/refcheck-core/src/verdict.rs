//! Verdicts and the fields they can name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A comparable bibliographic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Authors,
    Year,
    Container,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Authors => "authors",
            Self::Year => "year",
            Self::Container => "container",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field whose asserted and resolved values disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMismatch {
    pub field: Field,
    pub asserted: String,
    pub resolved: String,
}

/// Outcome of checking one reference.
///
/// `NotFound` is only produced by an explicit not-found answer from the
/// service. Transport and service failures are always `LookupError`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The DOI resolves and every asserted field matches.
    Valid,
    /// The DOI resolves but at least one asserted field differs.
    Mismatch { fields: Vec<FieldMismatch> },
    /// The service reports that the DOI does not resolve.
    NotFound,
    /// The service could not be reached or answered with an error.
    LookupError { reason: String },
}

impl Verdict {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Mismatch { .. } => "mismatch",
            Self::NotFound => "not found",
            Self::LookupError { .. } => "lookup error",
        }
    }

    /// Whether the check reached a determination about the reference.
    #[must_use]
    pub const fn is_determined(&self) -> bool {
        !matches!(self, Self::LookupError { .. })
    }

    /// Names of the mismatched fields, in field order.
    #[must_use]
    pub fn mismatched_fields(&self) -> Vec<Field> {
        match self {
            Self::Mismatch { fields } => fields.iter().map(|m| m.field).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch { fields } => {
                let names = fields
                    .iter()
                    .map(|m| m.field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "mismatch ({names})")
            }
            Self::LookupError { reason } => write!(f, "lookup error: {reason}"),
            other => f.write_str(other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn serializes_with_verdict_tag() {
        let verdict = Verdict::Mismatch {
            fields: vec![FieldMismatch {
                field: Field::Year,
                asserted: "2012".into(),
                resolved: "2013".into(),
            }],
        };
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["verdict"], "mismatch");
        assert_eq!(value["fields"][0]["field"], "year");

        let value = serde_json::to_value(Verdict::NotFound).unwrap();
        assert_eq!(value, serde_json::json!({ "verdict": "not_found" }));
    }

    #[test]
    fn display_names_mismatched_fields() {
        let verdict = Verdict::Mismatch {
            fields: vec![
                FieldMismatch {
                    field: Field::Title,
                    asserted: "a".into(),
                    resolved: "b".into(),
                },
                FieldMismatch {
                    field: Field::Authors,
                    asserted: "c".into(),
                    resolved: "d".into(),
                },
            ],
        };
        assert_eq!(verdict.to_string(), "mismatch (title, authors)");
        assert_eq!(verdict.mismatched_fields(), vec![Field::Title, Field::Authors]);
    }

    #[test]
    fn lookup_error_is_not_a_determination() {
        assert!(Verdict::Valid.is_determined());
        assert!(Verdict::NotFound.is_determined());
        let failed = Verdict::LookupError {
            reason: "timed out".into(),
        };
        assert!(!failed.is_determined());
        assert_eq!(failed.to_string(), "lookup error: timed out");
    }
}

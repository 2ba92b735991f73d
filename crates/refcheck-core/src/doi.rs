//! Digital Object Identifier parsing.
//!
//! A DOI has the shape `10.<registrant>/<suffix>`. The registrant code is one
//! or more dot-separated groups of ASCII digits; the suffix is any non-empty
//! run of characters without whitespace. DOIs compare case-insensitively, but
//! the spelling the user supplied is preserved for display and requests.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Resolver prefixes accepted in front of a bare DOI.
const RESOLVER_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

/// A syntactically valid DOI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Doi {
    raw: String,
}

impl Doi {
    /// Parse and validate a DOI, accepting `doi:` and `doi.org` URL prefixes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDoi`] naming the first rule the input breaks.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidDoi {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let body = strip_resolver_prefix(input.trim());
        if body.is_empty() {
            return Err(invalid("empty identifier"));
        }

        let Some(split) = body.find('/') else {
            return Err(invalid("missing '/' between prefix and suffix"));
        };
        let (prefix, suffix) = (&body[..split], &body[split + 1..]);

        let Some(registrant) = prefix.strip_prefix("10.") else {
            return Err(invalid("prefix must start with '10.'"));
        };
        let registrant_ok = !registrant.is_empty()
            && registrant
                .split('.')
                .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
        if !registrant_ok {
            return Err(invalid("registrant code must be dot-separated digits"));
        }

        if suffix.is_empty() {
            return Err(invalid("suffix is empty"));
        }
        if suffix.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid("suffix contains whitespace or control characters"));
        }

        Ok(Self {
            raw: body.to_string(),
        })
    }

    /// The DOI as supplied, without any resolver prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Canonical `https://doi.org/` link.
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://doi.org/{}", self.raw)
    }
}

fn strip_resolver_prefix(input: &str) -> &str {
    for prefix in RESOLVER_PREFIXES {
        let matches = input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if matches {
            return input[prefix.len()..].trim_start();
        }
    }
    input
}

impl PartialEq for Doi {
    fn eq(&self, other: &Self) -> bool {
        self.raw.to_lowercase() == other.raw.to_lowercase()
    }
}

impl Eq for Doi {}

impl Hash for Doi {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.to_lowercase().hash(state);
    }
}

impl fmt::Display for Doi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Doi {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Doi {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Doi> for String {
    fn from(doi: Doi) -> Self {
        doi.raw
    }
}

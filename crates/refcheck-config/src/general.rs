//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_source() -> String {
    "crossref".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Resolution service used for DOI lookups (`crossref` or `pubmed`).
    #[serde(default = "default_source")]
    pub source: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

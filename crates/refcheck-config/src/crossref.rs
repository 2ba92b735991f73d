//! Crossref REST API configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.crossref.org".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrossrefConfig {
    /// API root, without a trailing `/works`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Contact address sent as `mailto`, which routes requests to Crossref's
    /// polite pool.
    #[serde(default)]
    pub mailto: String,
}

impl Default for CrossrefConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mailto: String::new(),
        }
    }
}

impl CrossrefConfig {
    #[must_use]
    pub fn has_mailto(&self) -> bool {
        !self.mailto.trim().is_empty()
    }
}

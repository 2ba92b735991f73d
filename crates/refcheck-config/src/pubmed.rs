//! NCBI E-utilities (PubMed) configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string()
}

fn default_tool() -> String {
    "refcheck".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PubMedConfig {
    /// E-utilities root containing `esearch.fcgi` and `esummary.fcgi`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tool name NCBI asks clients to identify themselves with.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Contact address NCBI uses before blocking a misbehaving client.
    #[serde(default)]
    pub email: String,

    /// Optional API key; raises the NCBI rate limit from 3 to 10 requests/s.
    #[serde(default)]
    pub api_key: String,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tool: default_tool(),
            email: String::new(),
            api_key: String::new(),
        }
    }
}

impl PubMedConfig {
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

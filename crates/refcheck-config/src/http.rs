//! Outbound HTTP settings shared by every resolution source.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("refcheck/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Per-request timeout. A request that exceeds it is a lookup error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert!(config.user_agent.starts_with("refcheck/"));
    }
}

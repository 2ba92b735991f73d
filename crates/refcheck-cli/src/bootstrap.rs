use std::time::Duration;

use anyhow::Context;
use refcheck_config::RefcheckConfig;
use refcheck_resolver::{ResolverSettings, Source};

use crate::cli::GlobalFlags;

/// Load layered configuration, apply command-line overrides and validate.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RefcheckConfig> {
    let mut config =
        RefcheckConfig::load_with_dotenv().context("failed to load refcheck configuration")?;
    apply_overrides(&mut config, flags);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut RefcheckConfig, flags: &GlobalFlags) {
    if let Some(source) = &flags.source {
        config.general.source.clone_from(source);
    }
    if let Some(timeout) = flags.timeout {
        config.http.timeout_secs = timeout;
    }
    if let Some(mailto) = &flags.mailto {
        config.crossref.mailto.clone_from(mailto);
    }
}

/// Translate validated configuration into resolver settings.
///
/// An unknown source name is a configuration error, not a lookup failure.
pub fn resolver_settings(config: &RefcheckConfig) -> anyhow::Result<ResolverSettings> {
    let source: Source = config
        .general
        .source
        .parse()
        .map_err(|error| anyhow::anyhow!("invalid configuration: {error}"))?;

    let crossref_mailto = config
        .crossref
        .has_mailto()
        .then(|| config.crossref.mailto.trim().to_string());
    let user_agent = match &crossref_mailto {
        Some(mailto) => format!("{} (mailto:{mailto})", config.http.user_agent),
        None => config.http.user_agent.clone(),
    };

    Ok(ResolverSettings {
        source,
        timeout: Duration::from_secs(config.http.timeout_secs),
        user_agent,
        crossref_base_url: config.crossref.base_url.clone(),
        crossref_mailto,
        pubmed_base_url: config.pubmed.base_url.clone(),
        pubmed_tool: config.pubmed.tool.clone(),
        pubmed_email: non_empty(&config.pubmed.email),
        pubmed_api_key: config
            .pubmed
            .has_api_key()
            .then(|| config.pubmed.api_key.trim().to_string()),
    })
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

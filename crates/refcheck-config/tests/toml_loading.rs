//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use refcheck_config::RefcheckConfig;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
source = "pubmed"

[http]
timeout_secs = 3
user_agent = "refcheck-test/0.0"

[crossref]
base_url = "http://localhost:8080"
mailto = "lab@example.org"

[pubmed]
email = "lab@example.org"
api_key = "ncbi-key"
"#,
        )?;

        let config: RefcheckConfig = Figment::from(Serialized::defaults(RefcheckConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.source, "pubmed");
        assert_eq!(config.http.timeout_secs, 3);
        assert_eq!(config.http.user_agent, "refcheck-test/0.0");
        assert_eq!(config.crossref.base_url, "http://localhost:8080");
        assert!(config.crossref.has_mailto());
        assert_eq!(config.pubmed.email, "lab@example.org");
        assert!(config.pubmed.has_api_key());
        assert_eq!(config.pubmed.tool, "refcheck");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[crossref]
mailto = "lab@example.org"
"#,
        )?;

        let config: RefcheckConfig = Figment::from(Serialized::defaults(RefcheckConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.crossref.base_url, "https://api.crossref.org");
        assert_eq!(config.general.source, "crossref");
        assert_eq!(config.http.timeout_secs, 10);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".refcheck")?;
        jail.create_file(
            ".refcheck/config.toml",
            r#"
[http]
timeout_secs = 4
"#,
        )?;

        let config = RefcheckConfig::load().expect("config loads");
        assert_eq!(config.http.timeout_secs, 4);
        Ok(())
    });
}

#[test]
fn wrong_type_in_toml_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());
        jail.create_dir(".refcheck")?;
        jail.create_file(
            ".refcheck/config.toml",
            r#"
[http]
timeout_secs = "soon"
"#,
        )?;

        assert!(RefcheckConfig::load().is_err());
        Ok(())
    });
}

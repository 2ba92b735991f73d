use std::fs;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Isolated working directory and config home so no user settings leak in.
struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("refcheck");
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("NO_COLOR", "1")
            .env_remove("REFCHECK_LOG")
            .env_remove("REFCHECK_GENERAL__SOURCE")
            .env_remove("REFCHECK_HTTP__TIMEOUT_SECS")
            .env_remove("REFCHECK_CROSSREF__BASE_URL");
        cmd
    }

    /// A command whose services cannot be reached.
    fn offline_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("REFCHECK_CROSSREF__BASE_URL", UNREACHABLE)
            .env("REFCHECK_PUBMED__BASE_URL", UNREACHABLE)
            .env("REFCHECK_HTTP__TIMEOUT_SECS", "2");
        cmd
    }
}

#[test]
fn missing_doi_is_a_usage_error() {
    TestEnv::new()
        .cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("DOI"));
}

#[test]
fn version_flag_succeeds() {
    TestEnv::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("refcheck"));
}

#[test]
fn malformed_doi_fails_before_any_lookup() {
    // Exit 1 rather than 3 shows the unreachable service was never contacted.
    TestEnv::new()
        .offline_cmd()
        .arg("nature12373")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid DOI"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn implausible_year_is_invalid_input() {
    TestEnv::new()
        .offline_cmd()
        .args(["10.1038/nature12373", "--year", "20130"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("publication year"));
}

#[test]
fn unreachable_service_is_a_lookup_error() {
    let assert = TestEnv::new()
        .offline_cmd()
        .args(["--format", "json", "10.1038/nature12373", "--year", "2013"])
        .assert()
        .code(3);

    let stdout = &assert.get_output().stdout;
    let json: serde_json::Value = serde_json::from_slice(stdout).expect("valid json output");
    assert_eq!(json["verdict"], "lookup_error");
    assert_eq!(json["doi"], "10.1038/nature12373");
    assert_eq!(json["source"], "crossref");
    assert_eq!(json["url"], "https://doi.org/10.1038/nature12373");
    assert_eq!(json["asserted"]["year"], 2013);
}

#[test]
fn unreachable_service_text_line() {
    TestEnv::new()
        .offline_cmd()
        .args(["--source", "pubmed", "doi:10.1038/nature12373"])
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with("10.1038/nature12373: lookup error: "));
}

#[test]
fn refs_with_unreachable_service_exits_three() {
    TestEnv::new()
        .offline_cmd()
        .args(["--quiet", "refs", "10.1038/nature12373"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to look up citing article"));
}

#[test]
fn refs_rejects_malformed_doi() {
    TestEnv::new()
        .offline_cmd()
        .args(["refs", "10.abc/x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("registrant code"));
}

#[test]
fn unknown_source_is_a_config_error() {
    TestEnv::new()
        .offline_cmd()
        .args(["--source", "scopus", "10.1038/nature12373"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("scopus"));
}

#[test]
fn zero_timeout_is_rejected() {
    TestEnv::new()
        .cmd()
        .args(["--timeout", "0", "10.1038/nature12373"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timeout_secs"));
}

#[test]
fn project_config_file_is_honoured() {
    let env = TestEnv::new();
    let config_dir = env.dir.path().join(".refcheck");
    fs::create_dir_all(&config_dir).expect("create .refcheck");
    fs::write(
        config_dir.join("config.toml"),
        format!("[http]\ntimeout_secs = 2\n\n[crossref]\nbase_url = \"{UNREACHABLE}\"\n"),
    )
    .expect("write config");

    env.cmd()
        .args(["--format", "raw", "10.1038/nature12373"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("\"verdict\":\"lookup_error\""));
}

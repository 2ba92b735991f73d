use std::fmt::Write as _;

use anyhow::Context;
use refcheck_core::{Reference, Verdict};
use refcheck_resolver::ResolverClient;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::{CheckArgs, GlobalFlags};
use crate::commands::Outcome;
use crate::output::{output, table::colorize_status};
use crate::ui;

#[derive(Debug, Serialize)]
struct CheckResponse {
    doi: String,
    url: String,
    source: String,
    #[serde(flatten)]
    verdict: Verdict,
    asserted: Reference,
}

/// Check one reference: `refcheck <DOI> [--title ..] [--author ..] ...`.
///
/// The DOI and asserted fields are validated before any configuration is
/// loaded, so malformed input never reaches the network.
pub async fn handle(args: &CheckArgs, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    let reference = build_reference(args)?;

    let config = bootstrap::load_config(flags)?;
    let settings = bootstrap::resolver_settings(&config)?;
    let source = settings.source;
    let client = ResolverClient::new(settings)?;

    let verdict = refcheck_resolver::check(&client, &reference).await;
    let outcome = if verdict.is_determined() {
        Outcome::Determined
    } else {
        Outcome::LookupFailed
    };

    let response = CheckResponse {
        doi: reference.doi.to_string(),
        url: reference.doi.url(),
        source: source.to_string(),
        verdict,
        asserted: reference,
    };
    output(&response, flags.format, |r| {
        render_text(&r.doi, &r.verdict, ui::prefs().color)
    })?;

    Ok(outcome)
}

/// Turn command-line assertions into a [`Reference`].
fn build_reference(args: &CheckArgs) -> anyhow::Result<Reference> {
    let doi = args.doi.as_deref().context("a DOI is required")?;
    let mut reference = Reference::parse(doi)?.with_authors(args.authors.iter().map(String::as_str));

    if let Some(title) = &args.title {
        reference = reference.with_title(title.as_str());
    }
    if let Some(year) = args.year {
        reference = reference.with_year(year)?;
    }
    if let Some(container) = &args.container {
        reference = reference.with_container(container.as_str());
    }
    Ok(reference)
}

fn render_text(doi: &str, verdict: &Verdict, color: bool) -> String {
    let label = if color {
        colorize_status(verdict.label())
    } else {
        verdict.label().to_string()
    };

    let mut out = match verdict {
        Verdict::Mismatch { fields } => {
            let names = fields
                .iter()
                .map(|m| m.field.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{doi}: {label} ({names})")
        }
        Verdict::LookupError { reason } => format!("{doi}: {label}: {reason}"),
        Verdict::Valid | Verdict::NotFound => format!("{doi}: {label}"),
    };

    if let Verdict::Mismatch { fields } = verdict {
        for mismatch in fields {
            let _ = write!(
                out,
                "\n  {}: asserted {:?} vs resolved {:?}",
                mismatch.field, mismatch.asserted, mismatch.resolved
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use refcheck_core::{Field, FieldMismatch};

    use super::*;

    fn args(doi: &str) -> CheckArgs {
        CheckArgs {
            doi: Some(doi.to_string()),
            ..CheckArgs::default()
        }
    }

    #[test]
    fn builds_reference_from_flags() {
        let args = CheckArgs {
            title: Some("Nanometre-scale thermometry in a living cell".into()),
            authors: vec!["Kucsko, G.".into(), "  ".into()],
            year: Some(2013),
            container: Some("Nature".into()),
            ..args("https://doi.org/10.1038/nature12373")
        };
        let reference = build_reference(&args).unwrap();

        assert_eq!(reference.doi.as_str(), "10.1038/nature12373");
        assert_eq!(reference.authors, vec!["Kucsko, G."]);
        assert_eq!(reference.year, Some(2013));
        assert_eq!(reference.container.as_deref(), Some("Nature"));
    }

    #[test]
    fn malformed_doi_is_rejected() {
        let err = build_reference(&args("nature12373")).unwrap_err();
        assert!(err.to_string().contains("invalid DOI"), "{err}");
    }

    #[test]
    fn implausible_year_is_rejected() {
        let args = CheckArgs {
            year: Some(20_130),
            ..args("10.1038/nature12373")
        };
        assert!(build_reference(&args).is_err());
    }

    #[test]
    fn text_lines_per_verdict() {
        let doi = "10.1/x";
        assert_eq!(render_text(doi, &Verdict::Valid, false), "10.1/x: valid");
        assert_eq!(render_text(doi, &Verdict::NotFound, false), "10.1/x: not found");
        assert_eq!(
            render_text(
                doi,
                &Verdict::LookupError {
                    reason: "API error (503): down".into()
                },
                false
            ),
            "10.1/x: lookup error: API error (503): down"
        );
    }

    #[test]
    fn mismatch_lists_each_field() {
        let verdict = Verdict::Mismatch {
            fields: vec![
                FieldMismatch {
                    field: Field::Title,
                    asserted: "A paper".into(),
                    resolved: "Another paper".into(),
                },
                FieldMismatch {
                    field: Field::Year,
                    asserted: "1999".into(),
                    resolved: "2013".into(),
                },
            ],
        };
        assert_eq!(
            render_text("10.1/x", &verdict, false),
            "10.1/x: mismatch (title, year)\n  title: asserted \"A paper\" vs resolved \"Another paper\"\n  year: asserted \"1999\" vs resolved \"2013\""
        );
    }

    #[test]
    fn json_response_flattens_verdict() {
        let response = CheckResponse {
            doi: "10.1/x".into(),
            url: "https://doi.org/10.1/x".into(),
            source: "crossref".into(),
            verdict: Verdict::NotFound,
            asserted: Reference::parse("10.1/x").unwrap(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["verdict"], "not_found");
        assert_eq!(value["source"], "crossref");
        assert_eq!(value["url"], "https://doi.org/10.1/x");
        assert_eq!(value["asserted"]["doi"], "10.1/x");
    }
}

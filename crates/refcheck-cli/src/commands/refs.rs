use anyhow::Context;
use refcheck_core::{Doi, ReferenceEntry, ReferenceReport, ReferenceStatus, Verdict};
use refcheck_resolver::ResolverClient;

use crate::bootstrap;
use crate::cli::{GlobalFlags, RefsArgs};
use crate::commands::Outcome;
use crate::output::{
    output,
    table::{TableOptions, render_table},
};
use crate::progress::Progress;
use crate::ui;

/// Check every cited DOI of an article: `refcheck refs <DOI>`.
pub async fn handle(args: &RefsArgs, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    let doi = Doi::parse(&args.doi)?;

    let config = bootstrap::load_config(flags)?;
    let client = ResolverClient::new(bootstrap::resolver_settings(&config)?)?;

    let spinner = Progress::spinner(&format!("fetching reference list of {doi}"));
    let article = match client.crossref_citing_article(&doi).await {
        Ok(article) => article,
        Err(error) => {
            spinner.finish_err("lookup failed");
            return Err(error).with_context(|| format!("failed to look up citing article {doi}"));
        }
    };
    spinner.finish_clear();

    let Some(article) = article else {
        anyhow::bail!("citing article {doi} not found in crossref");
    };
    let total = article.references.len();
    tracing::debug!(%doi, total, source = %client.source(), "checking reference list");

    let bar = Progress::bar(u64::try_from(total).unwrap_or(u64::MAX), "checking references");
    let report = refcheck_resolver::check_reference_list(&client, &article, |entry| {
        bar.set_message(entry.doi.as_deref().unwrap_or("-"));
        bar.inc(1);
    })
    .await;
    bar.finish_clear();

    output(&report, flags.format, |r| {
        let prefs = ui::prefs();
        render_text(
            r,
            TableOptions {
                max_width: prefs.term_width,
                color: prefs.color,
            },
        )
    })?;

    Ok(Outcome::Determined)
}

fn render_text(report: &ReferenceReport, options: TableOptions) -> String {
    let mut lines = vec![match &report.title {
        Some(title) => format!("{}: {title}", report.doi),
        None => report.doi.to_string(),
    }];

    if report.entries.is_empty() {
        lines.push("no deposited references".to_string());
    } else {
        let rows = report.entries.iter().map(row).collect::<Vec<_>>();
        lines.push(String::new());
        lines.push(render_table(&["#", "doi", "status", "detail"], &rows, options));
        lines.push(String::new());
    }

    lines.push(report.summary.to_string());
    lines.join("\n")
}

fn row(entry: &ReferenceEntry) -> Vec<String> {
    let detail = match &entry.status {
        ReferenceStatus::Checked {
            verdict: verdict @ Verdict::Mismatch { .. },
        } => verdict
            .mismatched_fields()
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        ReferenceStatus::Checked {
            verdict: Verdict::LookupError { reason },
        }
        | ReferenceStatus::InvalidDoi { reason, .. } => reason.clone(),
        ReferenceStatus::Checked { .. } | ReferenceStatus::MissingDoi => String::new(),
    };

    vec![
        entry.index.to_string(),
        entry.doi.clone().unwrap_or_else(|| "-".to_string()),
        entry.status.label().to_string(),
        detail,
    ]
}

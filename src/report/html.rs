// src/report/html.rs
// =============================================================================
// This module writes the styled HTML report.
//
// Layout:
// - One section per seed: the seed's own statuses, link count, and a table
//   with a row per discovered link (source URL, both statuses, final URL,
//   expected URL, match outcome, redirect flag)
// - A run-wide summary table: every status code seen, with its pre-redirect
//   and post-redirect counts side by side
//
// Cells are colored by CSS class: green for 200, orange for 3xx, red for
// everything broken. The file is fully self-contained (inline CSS).
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use crate::probe::{ProbeResult, StatusOutcome};
use crate::scan::{PageScanResult, RunAggregate};

/// Renders the report and writes it to `path`.
pub fn write_html_report(
    path: &Path,
    pages: &[PageScanResult],
    aggregate: &RunAggregate,
    elapsed: Duration,
) -> Result<()> {
    let html = render(pages, aggregate, elapsed);
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

fn render(pages: &[PageScanResult], aggregate: &RunAggregate, elapsed: Duration) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>HTTP Status Scan Report</title>
<style>
    body {{ font-family: Arial, sans-serif; margin: 20px; background: #f9f9f9; }}
    h1, h2 {{ color: #333; }}
    table {{ border-collapse: collapse; width: 100%; margin-bottom: 40px; }}
    th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
    th {{ background-color: #4CAF50; color: white; }}
    tr:nth-child(even) {{ background-color: #f2f2f2; }}
    .status-200 {{ color: green; font-weight: bold; }}
    .status-3xx {{ color: orange; font-weight: bold; }}
    .status-error {{ color: red; font-weight: bold; }}
</style>
</head>
<body>
<h1>HTTP Status Scan Report</h1>
<p>Total run time: {:.2} seconds.</p>
"#,
        elapsed.as_secs_f64()
    ));

    for page in pages {
        out.push_str(&render_page(page));
    }

    out.push_str(&render_summary(aggregate));
    out.push_str("</body>\n</html>\n");
    out
}

fn render_page(page: &PageScanResult) -> String {
    let seed = &page.page;
    let mut out = format!(
        r#"<h2>Seed: <a href="{url}" target="_blank">{text}</a></h2>
<p>Original Status: <span class="{orig_class}">{orig}</span> | Final Status: <span class="{final_class}">{fin}</span></p>
<p>Links discovered: {count}</p>
"#,
        url = escape(&seed.url),
        text = escape(&seed.url),
        orig_class = status_class(seed.original_status),
        orig = seed.original_status,
        final_class = status_class(seed.final_status),
        fin = seed.final_status,
        count = page.link_count,
    );

    out.push_str(
        "<table>\n<thead>\n<tr>\
         <th>Link URL</th><th>Original Status</th><th>Final Status</th>\
         <th>Final URL</th><th>Expected URL</th><th>Match</th><th>Redirected</th>\
         </tr>\n</thead>\n<tbody>\n",
    );

    for link in std::iter::once(seed).chain(page.links.iter()) {
        out.push_str(&render_row(link));
    }

    out.push_str("</tbody></table>\n");
    out
}

fn render_row(result: &ProbeResult) -> String {
    // A failed probe has no final URL; show the failure reason in its place
    let destination = match (&result.final_url, &result.failure_reason) {
        (Some(final_url), _) => escape(final_url),
        (None, Some(reason)) => format!("<em>{}</em>", escape(reason)),
        (None, None) => String::new(),
    };

    format!(
        r#"<tr>
<td><a href="{url}" target="_blank">{text}</a></td>
<td class="{orig_class}">{orig}</td>
<td class="{final_class}">{fin}</td>
<td>{destination}</td>
<td>{expected}</td>
<td>{outcome}</td>
<td>{redirected}</td>
</tr>
"#,
        url = escape(&result.url),
        text = escape(&result.url),
        orig_class = status_class(result.original_status),
        orig = result.original_status,
        final_class = status_class(result.final_status),
        fin = result.final_status,
        destination = destination,
        expected = escape(result.expected_url.as_deref().unwrap_or("")),
        outcome = result.match_outcome,
        redirected = if result.has_redirect { "yes" } else { "no" },
    )
}

fn render_summary(aggregate: &RunAggregate) -> String {
    let mut out = String::from(
        "<h2>Status Code Summary</h2>\n<table>\n<thead>\n\
         <tr><th>Status Code</th><th>Original Count</th><th>Final Count</th></tr>\n\
         </thead>\n<tbody>\n",
    );

    for (status, original, fin) in aggregate.combined_rows() {
        out.push_str(&format!(
            r#"<tr><td class="{}">{}</td><td>{}</td><td>{}</td></tr>
"#,
            status_class(status),
            status,
            original,
            fin
        ));
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

// CSS class for a status cell: green 200, orange 3xx, red otherwise
fn status_class(status: StatusOutcome) -> &'static str {
    match status {
        StatusOutcome::Code(200) => "status-200",
        StatusOutcome::Code(code) if (300..400).contains(&code) => "status-3xx",
        _ => "status-error",
    }
}

// Minimal HTML escaping for text and attribute positions
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MatchOutcome;

    fn link(url: &str, orig: u16, fin: u16) -> ProbeResult {
        ProbeResult {
            url: url.to_string(),
            original_status: StatusOutcome::Code(orig),
            final_status: StatusOutcome::Code(fin),
            final_url: Some(url.to_string()),
            expected_url: None,
            match_outcome: MatchOutcome::NoExpectation,
            has_redirect: orig != fin,
            failure_reason: None,
        }
    }

    fn one_page() -> (Vec<PageScanResult>, RunAggregate) {
        let seed = link("https://example.com", 200, 200);
        let redirecting = link("https://example.com/old", 301, 200);

        let mut aggregate = RunAggregate::new();
        aggregate.fold(&seed);
        aggregate.fold(&redirecting);

        let pages = vec![PageScanResult {
            page: seed,
            link_count: 1,
            links: vec![redirecting],
        }];
        (pages, aggregate)
    }

    #[test]
    fn test_report_contains_rows_and_classes() {
        let (pages, aggregate) = one_page();
        let html = render(&pages, &aggregate, Duration::from_secs(3));

        assert!(html.contains("https://example.com/old"));
        assert!(html.contains(r#"class="status-3xx""#));
        assert!(html.contains(r#"class="status-200""#));
        assert!(html.contains("Status Code Summary"));
        assert!(html.contains("3.00 seconds"));
    }

    #[test]
    fn test_failed_probe_shows_reason_instead_of_url() {
        let failed = ProbeResult {
            url: "https://dead.example.com".to_string(),
            original_status: StatusOutcome::TransportError,
            final_status: StatusOutcome::TransportError,
            final_url: None,
            expected_url: None,
            match_outcome: MatchOutcome::ProbeError,
            has_redirect: false,
            failure_reason: Some("Could not resolve hostname".to_string()),
        };

        let row = render_row(&failed);
        assert!(row.contains("Could not resolve hostname"));
        assert!(row.contains(r#"class="status-error""#));
    }

    #[test]
    fn test_escape_handles_markup() {
        assert_eq!(escape(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    }
}

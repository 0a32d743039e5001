// src/scan/run.rs
// =============================================================================
// This module is the batch orchestrator: it walks the seed list and drives
// everything else.
//
// For each seed, in input order:
// 1. Default the scheme (bare "example.com" becomes "https://example.com")
// 2. Validate syntactically - invalid seeds are skipped with a diagnostic,
//    never aborting the run
// 3. Probe the seed itself (two-phase fetch, keeping the page body)
// 4. Extract the anchor hrefs from the body
// 5. Probe every href under the bounded worker pool
// 6. Fold the seed's result and every link's result into the run aggregate
//
// Seeds run sequentially relative to each other; only the links WITHIN a
// seed are probed concurrently. That bounds peak connections and keeps the
// per-seed console output coherent. A seed whose own fetch dies is recorded
// as an error result and the run moves on - nothing inside a run is fatal.
//
// Rust concepts:
// - Ownership: results move from the prober into the page record, with the
//   aggregate only ever reading borrowed references
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

use crate::config::SeedEntry;
use crate::extract;
use crate::probe::{self, ProbeResult, Prober};
use crate::report::console;

use super::aggregate::RunAggregate;

/// Knobs for one scan run.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum link probes in flight at once (per page)
    pub workers: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// Print 200-OK links too, not just redirects and failures
    pub show_ok: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            workers: probe::DEFAULT_WORKERS,
            timeout: Duration::from_secs(10),
            show_ok: false,
        }
    }
}

/// One seed's complete outcome: the seed's own probe, how many links the
/// page carried, and each link's probe in completion order.
#[derive(Debug, Clone, Serialize)]
pub struct PageScanResult {
    pub page: ProbeResult,
    pub link_count: usize,
    pub links: Vec<ProbeResult>,
}

/// Everything a run produced, handed to the report renderers.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    #[serde(skip)]
    pub aggregate: RunAggregate,
    pub pages: Vec<PageScanResult>,
}

impl ScanOutcome {
    /// Full JSON output: every page record plus the run-level summary
    /// (status histograms and match-outcome counts).
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "pages": serde_json::to_value(&self.pages)?,
            "summary": self.aggregate.to_json(),
        }))
    }

    /// Number of results (seeds and links alike) that need attention.
    pub fn problem_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| std::iter::once(&page.page).chain(page.links.iter()))
            .filter(|result| !result.is_ok())
            .count()
    }
}

/// Scans every seed and returns the folded aggregate plus per-page results.
///
/// The only error path is failing to build the HTTP clients; once probing
/// starts, every failure is recorded as data and the run completes.
pub async fn run(seeds: &[SeedEntry], options: &ScanOptions) -> Result<ScanOutcome> {
    let prober = Prober::new(options.timeout)?;

    let mut aggregate = RunAggregate::new();
    let mut pages = Vec::new();

    for seed in seeds {
        let url = probe::ensure_scheme(&seed.url);

        if !probe::is_valid_url(&url) {
            eprintln!("\n⚠️  Invalid URL format! Skipping: {}", url);
            continue;
        }

        println!("\n🔍 Scanning {}...", url);

        let (page_result, body) = prober.probe_page(&url, seed.expected.as_deref()).await;
        console::print_seed_result(&page_result);
        aggregate.fold(&page_result);

        // A failed or bodyless seed still gets a page record, just with
        // zero links
        let hrefs = match body.as_deref() {
            Some(html) => extract::extract_hrefs(html),
            None => Vec::new(),
        };
        let link_count = hrefs.len();

        let links = probe::probe_all(&prober, hrefs, &url, options.workers).await;
        for link in &links {
            console::print_link_result(link, options.show_ok);
            aggregate.fold(link);
        }

        console::print_page_totals(link_count, &aggregate);

        pages.push(PageScanResult {
            page: page_result,
            link_count,
            links,
        });
    }

    Ok(ScanOutcome { aggregate, pages })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why fold here instead of inside the worker pool?
//    - Worker completions arrive concurrently; folding them from one place
//      (this loop) serializes the updates without needing a mutex
//
// 2. Why does an invalid seed 'continue' but a failed seed get recorded?
//    - An invalid seed never became a probe, so there is nothing to count
//    - A failed seed DID consume a probe attempt; its error is a finding
// -----------------------------------------------------------------------------

// src/probe/pool.rs
// =============================================================================
// This module fans probes out across a bounded worker pool.
//
// Given the hrefs discovered on one page, it:
// 1. Resolves each relative href against the page's own URL
// 2. Runs up to N probes concurrently (default 10); the rest queue
// 3. Collects one result per input in COMPLETION order, not input order
//
// Why bounded?
// - One task per link with no cap would open an unbounded number of
//   connections against the target and our own network stack
// - A fixed pool keeps peak connection count predictable
//
// Why completion order?
// - A single slow or hung target must not delay anyone else's result;
//   callers who need a stable order can re-sort by source URL
//
// Rust concepts:
// - Streams: buffer_unordered() is Promise.all() with a concurrency limit
// - Closures capturing by reference: every probe borrows the same Prober
// =============================================================================

use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use url::Url;

use super::prober::{ProbeResult, Prober};

/// How many probes may be in flight at once unless overridden.
pub const DEFAULT_WORKERS: usize = 10;

/// Probes every href found on `source_page_url`, at most `workers` at a time.
///
/// Guarantees one result per input href, in arbitrary completion order.
/// Discovered links carry no expected destination, so successful probes
/// classify as NoExpectation.
pub async fn probe_all(
    prober: &Prober,
    hrefs: Vec<String>,
    source_page_url: &str,
    workers: usize,
) -> Vec<ProbeResult> {
    // Parse the page URL once; every relative href resolves against it
    let base = Url::parse(source_page_url).ok();

    let probes = hrefs.into_iter().map(|href| {
        let target = resolve_href(base.as_ref(), &href);
        async move { prober.probe(&target, None).await }
    });

    // Run up to `workers` probes at once, yielding results as they finish.
    // Nothing is dropped: every future resolves to exactly one ProbeResult,
    // so the output length always equals the input length.
    stream::iter(probes)
        .buffer_unordered(workers.max(1))
        .collect()
        .await
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> "https://example.com/docs"
//   href = "../other" -> "https://example.com/other"
//   href = "https://other.com" -> "https://other.com" (already absolute)
//
// An href that can't be resolved is probed as-is; the probe will record the
// failure as data instead of us silently dropping the link here.
fn resolve_href(base: Option<&Url>, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    match base {
        Some(base) => base
            .join(href)
            .map(|joined| joined.to_string())
            .unwrap_or_else(|_| href.to_string()),
        None => href.to_string(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is buffer_unordered?
//    - StreamExt method: polls up to N futures concurrently and yields each
//      output as soon as it's ready
//    - "unordered" is the point: a hung probe blocks its own slot, never
//      the delivery of other results
//
// 2. Why workers.max(1)?
//    - buffer_unordered(0) makes no progress at all; clamping protects
//      against a nonsensical --workers 0
//
// 3. Why resolve relative hrefs here and not in the HTML extractor?
//    - The extractor reports what the page literally says; turning that
//      into a probeable absolute URL is this module's job
// -----------------------------------------------------------------------------

// src/extract.rs
// =============================================================================
// This module extracts anchor hrefs from fetched HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Deliberately dumb: it reports the raw href attribute values exactly as
// they appear in the page (relative paths included) and nothing more.
// Resolving them against the page URL happens in the probe pool.
//
// Rust concepts:
// - Iterators: filter_map chains parsing and filtering in one pass
// =============================================================================

use scraper::{Html, Selector};

/// Returns the raw href value of every anchor element in `html`.
///
/// Empty hrefs are skipped; everything else (relative paths, mailto:,
/// whatever the page author wrote) is reported as-is.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Selector::parse returns Result, so we use .unwrap() which panics on error
    // This is OK here because our selector is a constant and known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

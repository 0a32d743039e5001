// src/report/mod.rs
// =============================================================================
// This module renders scan results for humans.
//
// Submodules:
// - console: emoji-tagged per-link lines and the end-of-run summary
// - html: a styled standalone HTML report file
//
// Both are pure consumers: they read result records and aggregates, and
// never influence how the scan itself runs.
// =============================================================================

pub mod console;
mod html;

pub use html::write_html_report;

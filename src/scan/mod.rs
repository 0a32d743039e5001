// src/scan/mod.rs
// =============================================================================
// This module drives a whole scan run.
//
// Submodules:
// - aggregate: run-wide histograms and match-outcome counts
// - run: the orchestrator that walks the seed list
//
// This file (mod.rs) is the module root - it re-exports the public API.
// =============================================================================

mod aggregate;
mod run;

pub use aggregate::RunAggregate;
pub use run::{run, PageScanResult, ScanOptions, ScanOutcome};

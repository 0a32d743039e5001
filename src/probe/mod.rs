// src/probe/mod.rs
// =============================================================================
// This module contains the probing engine.
//
// Submodules:
// - normalize: canonicalizes URLs so near-identical ones compare equal
// - validate: syntactic URL check before any network call
// - prober: the two-phase HTTP fetch for one URL
// - pool: fans probes out across a bounded worker pool
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod normalize;
mod pool;
mod prober;
mod validate;

// Re-export public items from submodules
// This lets users write `probe::normalize_url()` instead of
// `probe::normalize::normalize_url()`
pub use normalize::{ensure_scheme, normalize_url};
pub use pool::{probe_all, DEFAULT_WORKERS};
pub use prober::{MatchOutcome, ProbeResult, Prober, StatusOutcome};
pub use validate::is_valid_url;

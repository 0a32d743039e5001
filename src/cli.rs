// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "status-scout",
    version = "0.1.0",
    about = "Probe web pages and verify the status, redirects, and destinations of their links",
    long_about = "status-scout fetches each seed page twice (once with redirects frozen, once \
                  following the full chain), discovers the anchor links on it, and probes every \
                  link the same way under a bounded worker pool. It reports per-link statuses, \
                  redirect behavior, destination matches, and run-wide status histograms."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan seed pages and verify every link discovered on them
    ///
    /// Example: status-scout scan example.com rust-lang.org --report scan_report.html
    Scan {
        /// Seed URLs to scan (scheme optional, https:// is assumed)
        ///
        /// Expected-destination pairs can only be given through --seeds-file,
        /// since URLs themselves may contain '=' characters
        seeds: Vec<String>,

        /// JSON file with seeds: an array of URL strings or
        /// {"url": "...", "expected": "..."} objects
        #[arg(long)]
        seeds_file: Option<PathBuf>,

        /// Also print links that answered 200 OK (by default only
        /// redirects and failures are listed per link)
        #[arg(long)]
        show_ok: bool,

        /// Output the full scan results as JSON at the end
        ///
        /// This is an optional flag: --json
        #[arg(long)]
        json: bool,

        /// Write a styled HTML report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Maximum number of link probes in flight at once
        ///
        /// default_value_t can be any expression, so the default comes
        /// straight from the pool's own constant
        #[arg(long, default_value_t = crate::probe::DEFAULT_WORKERS)]
        workers: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a subcommand for a single-purpose tool?
//    - It leaves room to grow (e.g. a future 'report' or 'diff' command)
//    - clap generates help, version, and error messages for free
//
// 2. What is PathBuf?
//    - An owned filesystem path (the String of paths)
//    - clap parses path arguments straight into it
//
// 3. Why Vec<String> for seeds?
//    - Positional arguments can repeat; clap collects them into a Vec
//    - An empty Vec is fine as long as --seeds-file is given
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workers_default_follows_pool_constant() {
        let cli = Cli::parse_from(["status-scout", "scan", "example.com"]);
        let Commands::Scan { workers, timeout, show_ok, .. } = cli.command;

        assert_eq!(workers, crate::probe::DEFAULT_WORKERS);
        assert_eq!(timeout, 10);
        assert!(!show_ok);
    }

    #[test]
    fn test_workers_override() {
        let cli = Cli::parse_from(["status-scout", "scan", "example.com", "--workers", "3"]);
        let Commands::Scan { workers, .. } = cli.command;
        assert_eq!(workers, 3);
    }
}

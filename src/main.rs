// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the seed list (positional URLs and/or the seeds file)
// 3. Run the scan: probe every seed, discover its links, probe those too
// 4. Render the summary, and optionally JSON output and the HTML report
// 5. Exit with proper code (0 = all healthy, 1 = problems found, 2 = error)
//
// Rust concepts used:
// - async/await: Because we make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - seed list loading
mod extract;  // src/extract.rs - anchor href extraction
mod probe;    // src/probe/ - the probing engine
mod report;   // src/report/ - console and HTML rendering
mod scan;     // src/scan/ - orchestration and aggregation

use std::time::{Duration, Instant};

use clap::Parser; // Parser trait enables the parse() method

use cli::{Cli, Commands};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function: it creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every probe healthy
//   Ok(1) = broken links, failures, or destination mismatches found
//   Err = unexpected error (bad seeds file, unwritable report, ...)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            seeds,
            seeds_file,
            show_ok,
            json,
            report: report_path,
            workers,
            timeout,
        } => {
            let entries = config::load_seeds(&seeds, seeds_file.as_deref())?;

            let options = scan::ScanOptions {
                workers,
                timeout: Duration::from_secs(timeout),
                show_ok,
            };

            let started = Instant::now();
            let outcome = scan::run(&entries, &options).await?;
            let elapsed = started.elapsed();

            let problem_count = outcome.problem_count();
            report::console::print_run_summary(&outcome.aggregate, problem_count, elapsed);

            if let Some(path) = &report_path {
                report::write_html_report(path, &outcome.pages, &outcome.aggregate, elapsed)?;
                println!("HTML report saved to {}", path.display());
            }

            if json {
                // Serialize the page records and the run summary and print
                let json_output = serde_json::to_string_pretty(&outcome.to_json()?)?;
                println!("{}", json_output);
            }

            if problem_count > 0 {
                Ok(1) // Exit code 1 = problems found
            } else {
                Ok(0) // Exit code 0 = all good
            }
        }
    }
}

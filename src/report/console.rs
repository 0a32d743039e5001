// src/report/console.rs
// =============================================================================
// This module prints scan progress and summaries to the terminal.
//
// Line legend:
//   ✅  link answered 200 OK (hidden unless --show-ok)
//   ➡️  link is itself a redirect (3xx before following)
//   ❌  link is broken or unreachable
//
// After each page we print the running status histograms, and at the very
// end a run-wide summary with match-outcome counts and wall time.
// =============================================================================

use std::time::Duration;

use crate::probe::{MatchOutcome, ProbeResult, StatusOutcome};
use crate::scan::RunAggregate;

/// Prints the seed's own two-phase result, plus the destination comparison
/// when the seed carried an expectation.
pub fn print_seed_result(result: &ProbeResult) {
    match &result.failure_reason {
        Some(reason) => {
            println!("❌ Seed: {} | Failed: {}", result.url, reason);
        }
        None => {
            print!(
                "🔗 Seed: {} | Original Status: {} | Final Status: {}",
                result.url, result.original_status, result.final_status
            );
            if let Some(expected) = &result.expected_url {
                print!(" | Expected: {} | {}", expected, result.match_outcome);
            }
            println!();
        }
    }
}

/// Prints one link's line. 200-OK links only appear when `show_ok` is set;
/// redirects and failures always print.
pub fn print_link_result(result: &ProbeResult, show_ok: bool) {
    if let Some(reason) = &result.failure_reason {
        println!("❌ Link: {} | {}", result.url, reason);
        return;
    }

    if result.original_status.is_redirect() {
        println!(
            "➡️  Redirect Link: {} | Original Status: {} | Final Status: {}",
            result.url, result.original_status, result.final_status
        );
    } else if result.original_status == StatusOutcome::Code(200) {
        if show_ok {
            println!(
                "✅ Link: {} | Original Status: {} | Final Status: {}",
                result.url, result.original_status, result.final_status
            );
        }
    } else {
        println!(
            "❌ Link: {} | Original Status: {} | Final Status: {}",
            result.url, result.original_status, result.final_status
        );
    }
}

/// Prints the per-page link count and the running histograms, the way the
/// scan reads while it is still going.
pub fn print_page_totals(link_count: usize, aggregate: &RunAggregate) {
    println!("\nTotal links scanned on this page: {}", link_count);

    println!("Original status codes so far:");
    for (status, count) in aggregate.original_rows() {
        println!("  {}: {}", status, count);
    }

    println!("Final status codes so far:");
    for (status, count) in aggregate.final_rows() {
        println!("  {}: {}", status, count);
    }
}

/// Prints the end-of-run summary.
pub fn print_run_summary(aggregate: &RunAggregate, problem_count: usize, elapsed: Duration) {
    println!("\n📊 Summary:");
    println!("   📋 Total probes: {}", aggregate.total_probes());
    println!("   ❌ Problems: {}", problem_count);

    // Only mention destination matching when it was actually in play
    let compared = aggregate.outcome_count(MatchOutcome::ExactMatch)
        + aggregate.outcome_count(MatchOutcome::NormalizedMatch)
        + aggregate.outcome_count(MatchOutcome::NoMatch);
    if compared > 0 {
        println!("   🎯 Exact destination matches: {}", aggregate.outcome_count(MatchOutcome::ExactMatch));
        println!("   🎯 Normalized matches: {}", aggregate.outcome_count(MatchOutcome::NormalizedMatch));
        println!("   🎯 Mismatches: {}", aggregate.outcome_count(MatchOutcome::NoMatch));
    }

    println!("\nDone. Run time: {:.2} seconds.", elapsed.as_secs_f64());
}

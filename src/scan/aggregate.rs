// src/scan/aggregate.rs
// =============================================================================
// This module accumulates run-wide statistics.
//
// Three counters, all fed by fold():
// - How many probes saw each status code BEFORE redirects
// - How many probes saw each status code AFTER redirects
// - How many probes fell into each match-outcome bucket
//
// fold() is commutative and associative: probes finish in arbitrary order,
// and the final tallies must not depend on which result arrived first.
// The aggregate lives for exactly one run - created empty, folded into as
// results complete, read once at the end. Nothing is persisted.
//
// Rust concepts:
// - BTreeMap: a sorted map, so report rows come out in status-code order
// - entry(): insert-or-update in one expression
// =============================================================================

use std::collections::BTreeMap;

use crate::probe::{MatchOutcome, ProbeResult, StatusOutcome};

/// Run-wide tallies. One `fold` per completed probe, order-independent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunAggregate {
    original_counts: BTreeMap<StatusOutcome, u64>,
    final_counts: BTreeMap<StatusOutcome, u64>,
    outcome_counts: BTreeMap<MatchOutcome, u64>,
}

impl RunAggregate {
    pub fn new() -> Self {
        RunAggregate::default()
    }

    /// Accounts for one completed probe: exactly one bump in each histogram
    /// and one in the match-outcome counts.
    pub fn fold(&mut self, result: &ProbeResult) {
        *self.original_counts.entry(result.original_status).or_insert(0) += 1;
        *self.final_counts.entry(result.final_status).or_insert(0) += 1;
        *self.outcome_counts.entry(result.match_outcome).or_insert(0) += 1;
    }

    /// Total number of probes folded in so far.
    pub fn total_probes(&self) -> u64 {
        self.original_counts.values().sum()
    }

    /// (status, pre-redirect count) rows in ascending status order.
    pub fn original_rows(&self) -> impl Iterator<Item = (StatusOutcome, u64)> + '_ {
        self.original_counts.iter().map(|(status, count)| (*status, *count))
    }

    /// (status, post-redirect count) rows in ascending status order.
    pub fn final_rows(&self) -> impl Iterator<Item = (StatusOutcome, u64)> + '_ {
        self.final_counts.iter().map(|(status, count)| (*status, *count))
    }

    /// Every status seen in either phase, with both counts side by side.
    /// This is the shape of the summary table in the report.
    pub fn combined_rows(&self) -> Vec<(StatusOutcome, u64, u64)> {
        let mut statuses: Vec<StatusOutcome> = self
            .original_counts
            .keys()
            .chain(self.final_counts.keys())
            .copied()
            .collect();
        statuses.sort();
        statuses.dedup();

        statuses
            .into_iter()
            .map(|status| {
                (
                    status,
                    self.original_counts.get(&status).copied().unwrap_or(0),
                    self.final_counts.get(&status).copied().unwrap_or(0),
                )
            })
            .collect()
    }

    /// (match outcome, count) rows for every outcome that occurred.
    pub fn outcome_rows(&self) -> impl Iterator<Item = (MatchOutcome, u64)> + '_ {
        self.outcome_counts.iter().map(|(outcome, count)| (*outcome, *count))
    }

    /// Count for one specific outcome bucket.
    pub fn outcome_count(&self, outcome: MatchOutcome) -> u64 {
        self.outcome_counts.get(&outcome).copied().unwrap_or(0)
    }

    /// JSON view of the aggregate, with the same string keys the report
    /// columns use ("Error" for transport failures, snake_case outcomes).
    pub fn to_json(&self) -> serde_json::Value {
        let status_codes: Vec<serde_json::Value> = self
            .combined_rows()
            .into_iter()
            .map(|(status, original, fin)| {
                serde_json::json!({
                    "status": status,
                    "original_count": original,
                    "final_count": fin,
                })
            })
            .collect();

        let match_outcomes: serde_json::Map<String, serde_json::Value> = self
            .outcome_rows()
            .map(|(outcome, count)| (outcome_key(outcome).to_string(), count.into()))
            .collect();

        serde_json::json!({
            "total_probes": self.total_probes(),
            "status_codes": status_codes,
            "match_outcomes": match_outcomes,
        })
    }
}

// JSON key for an outcome bucket, matching the serde tags on MatchOutcome
fn outcome_key(outcome: MatchOutcome) -> &'static str {
    match outcome {
        MatchOutcome::ExactMatch => "exact_match",
        MatchOutcome::NormalizedMatch => "normalized_match",
        MatchOutcome::NoMatch => "no_match",
        MatchOutcome::NoExpectation => "no_expectation",
        MatchOutcome::ProbeError => "probe_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(url: &str, original: StatusOutcome, fin: StatusOutcome) -> ProbeResult {
        let failed = fin == StatusOutcome::TransportError;
        ProbeResult {
            url: url.to_string(),
            original_status: original,
            final_status: fin,
            final_url: (!failed).then(|| url.to_string()),
            expected_url: None,
            match_outcome: if failed {
                MatchOutcome::ProbeError
            } else {
                MatchOutcome::NoExpectation
            },
            has_redirect: original != fin,
            failure_reason: failed.then(|| "Connection failed".to_string()),
        }
    }

    #[test]
    fn test_fold_bumps_each_dimension_once() {
        let mut aggregate = RunAggregate::new();
        aggregate.fold(&sample("https://a", StatusOutcome::Code(301), StatusOutcome::Code(200)));

        assert_eq!(aggregate.total_probes(), 1);
        assert_eq!(
            aggregate.original_rows().collect::<Vec<_>>(),
            vec![(StatusOutcome::Code(301), 1)]
        );
        assert_eq!(
            aggregate.final_rows().collect::<Vec<_>>(),
            vec![(StatusOutcome::Code(200), 1)]
        );
        assert_eq!(aggregate.outcome_count(MatchOutcome::NoExpectation), 1);
    }

    #[test]
    fn test_fold_is_order_independent() {
        let a = sample("https://a", StatusOutcome::Code(200), StatusOutcome::Code(200));
        let b = sample("https://b", StatusOutcome::Code(301), StatusOutcome::Code(200));
        let c = sample("https://c", StatusOutcome::TransportError, StatusOutcome::TransportError);

        let mut forward = RunAggregate::new();
        for result in [&a, &b, &c] {
            forward.fold(result);
        }

        let mut backward = RunAggregate::new();
        for result in [&c, &b, &a] {
            backward.fold(result);
        }

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_combined_rows_union_both_phases() {
        let mut aggregate = RunAggregate::new();
        aggregate.fold(&sample("https://a", StatusOutcome::Code(301), StatusOutcome::Code(200)));
        aggregate.fold(&sample("https://b", StatusOutcome::Code(200), StatusOutcome::Code(200)));

        let rows = aggregate.combined_rows();
        // 200 appears in both phases, 301 only pre-redirect
        assert_eq!(
            rows,
            vec![
                (StatusOutcome::Code(200), 1, 2),
                (StatusOutcome::Code(301), 1, 0),
            ]
        );
    }

    #[test]
    fn test_to_json_carries_histograms_and_outcomes() {
        let mut aggregate = RunAggregate::new();
        aggregate.fold(&sample("https://a", StatusOutcome::Code(301), StatusOutcome::Code(200)));
        aggregate.fold(&sample("https://b", StatusOutcome::TransportError, StatusOutcome::TransportError));

        let json = aggregate.to_json();

        assert_eq!(json["total_probes"], 2);
        assert_eq!(json["status_codes"][0]["status"], 200);
        assert_eq!(json["status_codes"][0]["final_count"], 1);
        assert_eq!(json["status_codes"][1]["status"], 301);
        // Transport errors keep their "Error" spelling in JSON
        assert_eq!(json["status_codes"][2]["status"], "Error");
        assert_eq!(json["match_outcomes"]["no_expectation"], 1);
        assert_eq!(json["match_outcomes"]["probe_error"], 1);
    }

    #[test]
    fn test_transport_errors_sort_after_codes() {
        let mut aggregate = RunAggregate::new();
        aggregate.fold(&sample("https://a", StatusOutcome::TransportError, StatusOutcome::TransportError));
        aggregate.fold(&sample("https://b", StatusOutcome::Code(404), StatusOutcome::Code(404)));

        let statuses: Vec<StatusOutcome> =
            aggregate.original_rows().map(|(status, _)| status).collect();
        assert_eq!(
            statuses,
            vec![StatusOutcome::Code(404), StatusOutcome::TransportError]
        );
    }
}

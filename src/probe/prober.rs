// src/probe/prober.rs
// =============================================================================
// This module performs the two-phase HTTP fetch for a single URL.
//
// Why two requests per URL?
// - Request 1 has redirect-following DISABLED: its status code tells us what
//   the server itself said (a 301 link and a 404 link both matter, even if
//   the 301 eventually lands somewhere healthy)
// - Request 2 follows the full redirect chain: its status code and terminal
//   URL tell us where the link actually ends up
// - Inspecting the redirect chain of one request could give us both, but two
//   plain GETs are simpler and link sets are small, so doubling the request
//   volume is an acceptable cost
//
// Any transport failure (DNS, refused connection, timeout, TLS) at either
// step marks the whole probe as failed; we don't record which of the two
// requests died.
//
// Rust concepts:
// - Enums with data: StatusOutcome carries the code inside the variant
// - Custom Serialize: the JSON shows 301 or "Error", not an enum wrapper
// - async/await: For concurrent network I/O
// =============================================================================

use anyhow::Result;
use reqwest::{redirect, Client};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use super::normalize::normalize_url;

/// What one HTTP request came back with: a status code, or no response at all.
///
/// Keeping the transport-failure case inside the type means no field ever
/// holds a mixed bag of integers and error strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusOutcome {
    /// The server answered with this HTTP status code
    Code(u16),
    /// The request never produced a response (DNS, connect, timeout, TLS)
    TransportError,
}

impl StatusOutcome {
    /// True for codes in the 3xx range.
    pub fn is_redirect(self) -> bool {
        matches!(self, StatusOutcome::Code(code) if (300..400).contains(&code))
    }

    /// True for 2xx and 3xx codes; transport errors and 4xx/5xx are not ok.
    pub fn is_ok(self) -> bool {
        matches!(self, StatusOutcome::Code(code) if code < 400)
    }
}

impl fmt::Display for StatusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusOutcome::Code(code) => write!(f, "{}", code),
            StatusOutcome::TransportError => write!(f, "Error"),
        }
    }
}

// Serialized as the bare code (301) or the string "Error", matching what the
// report columns show
impl Serialize for StatusOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            StatusOutcome::Code(code) => serializer.serialize_u16(*code),
            StatusOutcome::TransportError => serializer.serialize_str("Error"),
        }
    }
}

/// How the destination a probe actually reached compares to the destination
/// we expected it to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Final URL equals the expected URL (case-insensitively)
    ExactMatch,
    /// Equal only after normalization (www. prefix, trailing slash, scheme)
    NormalizedMatch,
    /// Landed somewhere else entirely
    NoMatch,
    /// No expected destination was supplied, so there is nothing to compare
    NoExpectation,
    /// The probe itself failed, so there is no final URL to compare
    ProbeError,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchOutcome::ExactMatch => "exact match",
            MatchOutcome::NormalizedMatch => "normalized match",
            MatchOutcome::NoMatch => "MISMATCH",
            MatchOutcome::NoExpectation => "-",
            MatchOutcome::ProbeError => "probe error",
        };
        write!(f, "{}", label)
    }
}

/// Everything we learned about one URL.
///
/// Exactly one of `final_url` / `failure_reason` is present: a probe either
/// reached a terminal URL or died in transit, never both.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    /// The URL that was requested
    pub url: String,
    /// Status with redirect-following disabled
    pub original_status: StatusOutcome,
    /// Status after following the full redirect chain
    pub final_status: StatusOutcome,
    /// Where the redirect chain terminated; absent when the probe failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    /// The destination this URL was supposed to resolve to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_url: Option<String>,
    /// How final_url compares to expected_url
    pub match_outcome: MatchOutcome,
    /// True if the statuses differ or the URL moved
    pub has_redirect: bool,
    /// Why the probe failed; present only on transport failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl ProbeResult {
    /// Helper to check whether this link needs attention.
    ///
    /// Healthy means: the probe completed, the final status is below 400,
    /// and the destination (if one was expected) matched at least loosely.
    pub fn is_ok(&self) -> bool {
        self.failure_reason.is_none()
            && self.final_status.is_ok()
            && self.match_outcome != MatchOutcome::NoMatch
    }

    // A probe that died in transit. Both statuses are marked, the match
    // outcome is pinned to ProbeError, and no final URL is recorded.
    fn transport_failure(url: String, expected: Option<&str>, reason: String) -> Self {
        ProbeResult {
            url,
            original_status: StatusOutcome::TransportError,
            final_status: StatusOutcome::TransportError,
            final_url: None,
            expected_url: expected.map(str::to_string),
            match_outcome: MatchOutcome::ProbeError,
            has_redirect: false,
            failure_reason: Some(reason),
        }
    }
}

/// Compares where a probe landed against where it was supposed to land.
///
/// Exact beats normalized beats nothing; with no expectation there is
/// nothing to compare.
pub(crate) fn classify_match(final_url: &str, expected: Option<&str>) -> MatchOutcome {
    let Some(expected) = expected else {
        return MatchOutcome::NoExpectation;
    };

    if final_url.eq_ignore_ascii_case(expected) {
        MatchOutcome::ExactMatch
    } else if normalize_url(final_url) == normalize_url(expected) {
        MatchOutcome::NormalizedMatch
    } else {
        MatchOutcome::NoMatch
    }
}

/// Issues the paired requests. Holds two clients because the redirect policy
/// is baked into a reqwest Client at build time.
pub struct Prober {
    /// Redirects frozen: the first hop's status is what we want
    frozen: Client,
    /// Redirects followed to the end of the chain
    following: Client,
}

impl Prober {
    /// Builds the two HTTP clients with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let frozen = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        let following = Client::builder()
            .timeout(timeout)
            // Follow up to 10 redirects before calling it a loop
            .redirect(redirect::Policy::limited(10))
            .build()?;

        Ok(Prober { frozen, following })
    }

    /// Probes one URL: two GETs, then classification.
    ///
    /// Never returns an error - transport failures become data in the result.
    pub async fn probe(&self, url: &str, expected: Option<&str>) -> ProbeResult {
        self.probe_inner(url, expected).await.0
    }

    /// Like `probe`, but also hands back the page body from the
    /// redirect-followed response, so the caller can extract links from it.
    ///
    /// The body is None when the probe failed or the body couldn't be read.
    pub async fn probe_page(&self, url: &str, expected: Option<&str>) -> (ProbeResult, Option<String>) {
        self.probe_inner(url, expected).await
    }

    async fn probe_inner(&self, url: &str, expected: Option<&str>) -> (ProbeResult, Option<String>) {
        // Phase 1: what did the server itself answer?
        let original_status = match self.frozen.get(url).send().await {
            Ok(response) => StatusOutcome::Code(response.status().as_u16()),
            Err(error) => {
                let reason = describe_transport_error(&error);
                return (
                    ProbeResult::transport_failure(url.to_string(), expected, reason),
                    None,
                );
            }
        };

        // Phase 2: where does the chain end, and with what status?
        let response = match self.following.get(url).send().await {
            Ok(response) => response,
            Err(error) => {
                let reason = describe_transport_error(&error);
                return (
                    ProbeResult::transport_failure(url.to_string(), expected, reason),
                    None,
                );
            }
        };

        let final_status = StatusOutcome::Code(response.status().as_u16());
        let final_url = response.url().to_string();

        // Reading the body can still fail mid-stream; the probe itself
        // succeeded, so we just go on without a body
        let body = response.text().await.ok();

        let result = ProbeResult {
            url: url.to_string(),
            original_status,
            final_status,
            match_outcome: classify_match(&final_url, expected),
            has_redirect: original_status != final_status || url != final_url,
            final_url: Some(final_url),
            expected_url: expected.map(str::to_string),
            failure_reason: None,
        };

        (result, body)
    }
}

// Turns a reqwest error into a short human-readable reason
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - TLS certificate issues
// - Too many redirects
// - etc.
fn describe_transport_error(error: &reqwest::Error) -> String {
    let error_string = error.to_string();

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "TLS certificate error".to_string()
    } else {
        error_string
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why two Clients instead of one?
//    - reqwest fixes the redirect policy when the Client is built
//    - Client is cheap to clone and share (internally reference-counted),
//      so holding two costs almost nothing
//
// 2. Why does probe() never return Err?
//    - A dead link is a finding, not a failure of the scanner
//    - Representing failures as data means one broken link can never abort
//      its siblings or the run
//
// 3. What is eq_ignore_ascii_case?
//    - Case-insensitive string comparison without allocating lowercase
//      copies of both sides
//
// 4. Why compare url != final_url for has_redirect?
//    - Some redirects keep the status code identical (e.g. two 200s after
//      an internal rewrite); the URL moving is the other tell
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert_eq!(
            classify_match("https://Example.com/Path", Some("https://example.com/path")),
            MatchOutcome::ExactMatch
        );
    }

    #[test]
    fn test_normalized_match_via_www_and_slash() {
        assert_eq!(
            classify_match("https://www.example.com/path/", Some("https://example.com/path")),
            MatchOutcome::NormalizedMatch
        );
    }

    #[test]
    fn test_no_match_for_different_host() {
        assert_eq!(
            classify_match("https://other.net/", Some("https://example.com")),
            MatchOutcome::NoMatch
        );
    }

    #[test]
    fn test_no_expectation() {
        assert_eq!(classify_match("https://example.com", None), MatchOutcome::NoExpectation);
    }

    #[test]
    fn test_transport_failure_invariants() {
        let result = ProbeResult::transport_failure(
            "https://example.com".to_string(),
            Some("https://example.com"),
            "Request timed out".to_string(),
        );

        // Exactly one of final_url / failure_reason is present
        assert!(result.final_url.is_none());
        assert!(result.failure_reason.is_some());
        assert_eq!(result.match_outcome, MatchOutcome::ProbeError);
        assert_eq!(result.original_status, StatusOutcome::TransportError);
        assert_eq!(result.final_status, StatusOutcome::TransportError);
        assert!(!result.is_ok());
    }

    #[test]
    fn test_status_outcome_display_and_json() {
        assert_eq!(StatusOutcome::Code(301).to_string(), "301");
        assert_eq!(StatusOutcome::TransportError.to_string(), "Error");

        assert_eq!(serde_json::to_string(&StatusOutcome::Code(200)).unwrap(), "200");
        assert_eq!(
            serde_json::to_string(&StatusOutcome::TransportError).unwrap(),
            "\"Error\""
        );
    }

    #[test]
    fn test_is_ok_semantics() {
        assert!(StatusOutcome::Code(200).is_ok());
        assert!(StatusOutcome::Code(301).is_ok());
        assert!(!StatusOutcome::Code(404).is_ok());
        assert!(!StatusOutcome::TransportError.is_ok());

        assert!(StatusOutcome::Code(302).is_redirect());
        assert!(!StatusOutcome::Code(200).is_redirect());
    }
}

// src/probe/validate.rs
// =============================================================================
// This module checks that a URL is syntactically plausible BEFORE we spend a
// network round-trip on it.
//
// What counts as valid:
// - Scheme: http, https, ftp, or ftps
// - Host: a DNS-style name (two or more labels), "localhost", a dotted-quad
//   IPv4 literal, or a hex-colon IPv6 literal (brackets optional)
// - Optionally a :port, optionally a path/query with no stray whitespace
//
// Everything is case-insensitive. This is a pure syntactic check - it never
// touches the network, and it doesn't guarantee the host exists.
//
// Rust concepts:
// - Raw strings (r"..."): No escaping of backslashes inside
// - The regex crate: Compiled patterns with (?i) for case-insensitivity
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;

// Compiled once on first use and shared by every call after that
static URL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Syntactic well-formedness check for a URL. No network I/O.
pub fn is_valid_url(url: &str) -> bool {
    // Regex::new returns Result, so we use .unwrap() which panics on error
    // This is OK here because our pattern is a constant and known to be valid
    let pattern = URL_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?xi)
        ^(?:http|ftp)s?://                                   # scheme
        (?:
            (?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+      # domain labels...
            (?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)               # ...and the TLD
            |localhost                                       # bare localhost
            |\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}              # IPv4 literal
            |\[?[A-F0-9]*:[A-F0-9:]+\]?                      # IPv6 literal
        )
        (?::\d+)?                                            # optional port
        (?:/?|[/?]\S+)$                                      # path / query
        ",
        )
        .unwrap()
    });

    pattern.is_match(url)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does (?xi) mean?
//    - 'i' makes the whole pattern case-insensitive
//    - 'x' enables verbose mode: whitespace is ignored and # starts a
//      comment, letting us annotate each alternative
//
// 2. Why validate at all when the HTTP client would just fail?
//    - A failed request takes up to the full timeout; rejecting junk like
//      "not a url" up front costs microseconds
//    - It also separates "you gave me garbage" from "the host is down" in
//      the diagnostics
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?query=1"));
        assert!(is_valid_url("http://localhost:8080/x"));
        assert!(is_valid_url("https://192.168.1.1"));
        assert!(is_valid_url("ftp://files.example.com"));
        assert!(is_valid_url("https://[2001:db8::1]/index.html"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_valid_url("HTTPS://EXAMPLE.COM"));
    }

    #[test]
    fn test_repeated_calls_reuse_the_compiled_pattern() {
        // First call initializes the OnceLock, later calls hit the cached
        // Regex; answers must be identical either way
        for _ in 0..3 {
            assert!(is_valid_url("https://example.com"));
            assert!(!is_valid_url("htp://example.com"));
        }
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("htp://example.com"));
        assert!(!is_valid_url("example.com")); // no scheme
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("https://exa mple.com/x"));
        assert!(!is_valid_url(""));
    }
}

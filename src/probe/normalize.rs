// src/probe/normalize.rs
// =============================================================================
// This module canonicalizes URLs for equivalence comparison.
//
// Why normalize?
// - "HTTP://WWW.Example.com/path/" and "https://example.com/path" point at
//   the same resource for our purposes, but compare unequal as strings
// - When verifying that a redirect landed where we expected, we want that
//   pair to count as a match (a "normalized match", weaker than exact)
//
// Steps, in order:
// 1. Lower-case the whole URL
// 2. If no scheme is present, assume https://
// 3. Treat http as https (the comparison must not care whether a site
//    upgraded its links yet), and strip a leading "www." from the host
// 4. Strip exactly one trailing "/" from the path (root path becomes empty)
// 5. Reassemble scheme + host(:port) + path + ?query + #fragment
//
// Deliberately NOT done: query-parameter reordering and fragment stripping.
// Two URLs differing only in query order are NOT considered equivalent.
//
// Rust concepts:
// - Pure functions: Same input always yields same output, no I/O
// - Option combinators: strip_prefix/strip_suffix return Option<&str>
// =============================================================================

use url::Url;

/// Canonicalizes a URL for equivalence comparison.
///
/// Pure and idempotent: `normalize_url(&normalize_url(u)) == normalize_url(u)`.
/// Input that still fails to parse after lower-casing and scheme defaulting
/// is returned in that string-massaged form, so the function is total.
pub fn normalize_url(url: &str) -> String {
    // Step 1: case-insensitive comparison is achieved by lower-casing
    // everything up front (host, path, query, fragment alike)
    let lowered = url.to_lowercase();

    // Step 2: default the scheme so bare hosts like "example.com" parse
    let candidate = if lowered.contains("://") {
        lowered
    } else {
        format!("https://{}", lowered)
    };

    // From here on we need the URL's parts, so parse it
    let parsed = match Url::parse(&candidate) {
        Ok(parsed) => parsed,
        Err(_) => return candidate,
    };

    // Step 3: "http://example.com" and "https://example.com" count as the
    // same destination, as do "www.example.com" and "example.com"
    let scheme = match parsed.scheme() {
        "http" => "https",
        other => other,
    };
    let host = parsed.host_str().unwrap_or("");
    let host = host.strip_prefix("www.").unwrap_or(host);

    // Step 4: exactly one trailing slash comes off the path,
    // so "/" becomes "" and "/path/" becomes "/path"
    let path = parsed.path();
    let path = path.strip_suffix('/').unwrap_or(path);

    // Step 5: reassemble
    let mut out = format!("{}://{}", scheme, host);
    if let Some(port) = parsed.port() {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out.push_str(path);
    if let Some(query) = parsed.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = parsed.fragment() {
        out.push('#');
        out.push_str(fragment);
    }

    out
}

/// Prepends `https://` when a URL has no scheme, leaving it otherwise intact.
///
/// Used on seed URLs before validation, so users can write "example.com".
/// Unlike `normalize_url` this does not change case or strip anything.
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalence_pair() {
        assert_eq!(
            normalize_url("HTTP://WWW.Example.com/path/"),
            normalize_url("https://example.com/path")
        );
    }

    #[test]
    fn test_http_counts_as_https() {
        assert_eq!(
            normalize_url("http://example.com/a"),
            normalize_url("https://example.com/a")
        );
    }

    #[test]
    fn test_idempotence() {
        let samples = [
            "HTTP://WWW.Example.com/path/",
            "example.com",
            "https://example.com/",
            "https://example.com/a/b?x=1&y=2#frag",
            "http://localhost:8080/x/",
        ];
        for sample in samples {
            let once = normalize_url(sample);
            assert_eq!(normalize_url(&once), once, "not idempotent for {sample}");
        }
    }

    #[test]
    fn test_scheme_defaulting() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
    }

    #[test]
    fn test_root_path_becomes_empty() {
        assert_eq!(normalize_url("https://example.com/"), "https://example.com");
    }

    #[test]
    fn test_query_order_is_preserved() {
        // Query reordering is deliberately not performed
        assert_ne!(
            normalize_url("https://example.com/p?a=1&b=2"),
            normalize_url("https://example.com/p?b=2&a=1")
        );
    }

    #[test]
    fn test_port_and_fragment_survive() {
        assert_eq!(
            normalize_url("HTTPS://www.Example.com:8443/Docs/#Intro"),
            "https://example.com:8443/docs#intro"
        );
    }

    #[test]
    fn test_ensure_scheme() {
        assert_eq!(ensure_scheme("example.com"), "https://example.com");
        assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
    }
}

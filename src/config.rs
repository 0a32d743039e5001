// src/config.rs
// =============================================================================
// This module loads the seed list: the pages we've been asked to scan.
//
// Seeds come from two places, merged in order:
// - Positional CLI arguments (plain URLs, no expected destination)
// - A JSON seeds file, where each element is either a bare URL string or an
//   object {"url": "...", "expected": "..."} carrying the destination the
//   URL is supposed to resolve to after redirects
//
// Rust concepts:
// - serde untagged enums: One JSON field that accepts two shapes
// - anyhow::Context: Attaching file paths to I/O errors
// =============================================================================

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One input unit: a URL to scan, optionally paired with the destination
/// we expect it to land on after following all redirects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl SeedEntry {
    pub fn plain(url: impl Into<String>) -> Self {
        SeedEntry {
            url: url.into(),
            expected: None,
        }
    }
}

// The two shapes a seeds-file element can take
//
// #[serde(untagged)] tells serde to try each variant in order until one
// matches the JSON, so both "example.com" and {"url": "example.com"} work
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSeed {
    Plain(String),
    WithExpected {
        url: String,
        #[serde(default)]
        expected: Option<String>,
    },
}

impl From<RawSeed> for SeedEntry {
    fn from(raw: RawSeed) -> Self {
        match raw {
            RawSeed::Plain(url) => SeedEntry {
                url,
                expected: None,
            },
            RawSeed::WithExpected { url, expected } => SeedEntry { url, expected },
        }
    }
}

// Merges positional URLs and the optional seeds file into one list
//
// Returns an error if the file can't be read or parsed, or if no seeds
// were provided at all (an empty scan is almost certainly a mistake)
pub fn load_seeds(positional: &[String], seeds_file: Option<&Path>) -> Result<Vec<SeedEntry>> {
    let mut seeds: Vec<SeedEntry> = positional
        .iter()
        .map(|url| SeedEntry::plain(url.clone()))
        .collect();

    if let Some(path) = seeds_file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seeds file {}", path.display()))?;

        let raw: Vec<RawSeed> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse seeds file {}", path.display()))?;

        seeds.extend(raw.into_iter().map(SeedEntry::from));
    }

    if seeds.is_empty() {
        bail!("No seed URLs provided (pass URLs as arguments or use --seeds-file)");
    }

    Ok(seeds)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not accept url=expected pairs on the command line?
//    - URLs legally contain '=' (query strings), so there is no safe
//      separator; the JSON file is unambiguous
//
// 2. What does .with_context() do?
//    - Wraps the underlying error with a human-readable message
//    - The original error is kept in the chain, so nothing is lost
//
// 3. What is bail!?
//    - An anyhow macro: return Err(anyhow!(...)) in one line
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_seeds() {
        let seeds = load_seeds(&["example.com".to_string()], None).unwrap();
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].url, "example.com");
        assert!(seeds[0].expected.is_none());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(load_seeds(&[], None).is_err());
    }

    #[test]
    fn test_seeds_file_accepts_both_shapes() {
        let json = r#"[
            "https://example.com",
            {"url": "https://old.example.com", "expected": "https://example.com/new"}
        ]"#;
        let raw: Vec<RawSeed> = serde_json::from_str(json).unwrap();
        let seeds: Vec<SeedEntry> = raw.into_iter().map(SeedEntry::from).collect();

        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].url, "https://example.com");
        assert!(seeds[0].expected.is_none());
        assert_eq!(
            seeds[1].expected.as_deref(),
            Some("https://example.com/new")
        );
    }

    #[test]
    fn test_object_without_expected() {
        let json = r#"[{"url": "https://example.com"}]"#;
        let raw: Vec<RawSeed> = serde_json::from_str(json).unwrap();
        let seeds: Vec<SeedEntry> = raw.into_iter().map(SeedEntry::from).collect();
        assert!(seeds[0].expected.is_none());
    }
}

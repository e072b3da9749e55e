//! Skip list for URLs that should never be probed.
//!
//! Certain URLs are known to be unreachable from the environment the checker
//! runs in (local-only addresses, internal hosts behind a VPN). Probing them
//! would only produce noise, so they are reported as skipped instead.

use crate::config::DEFAULT_SKIP_DOMAINS;

/// Substring-based skip list.
///
/// A URL is skipped when any pattern appears anywhere in it. Matching the
/// whole URL rather than just the host keeps the check cheap and catches
/// patterns in ports and paths too, at the cost of occasional over-matching
/// (a pattern like `localhost` also matches a URL with `localhost` in its
/// path). Skipped URLs count as a separate report bucket, never as broken.
#[derive(Debug, Clone)]
pub struct SkipList {
    patterns: Vec<String>,
}

impl SkipList {
    /// Creates a skip list from the given patterns.
    ///
    /// Empty patterns are dropped: an empty string is a substring of every
    /// URL and would skip the entire input.
    pub fn new(patterns: Vec<String>) -> Self {
        let patterns = patterns.into_iter().filter(|p| !p.is_empty()).collect();
        SkipList { patterns }
    }

    /// Returns true when the URL matches any skip pattern.
    pub fn should_skip(&self, url: &str) -> bool {
        self.patterns.iter().any(|pattern| url.contains(pattern))
    }

    /// Returns the patterns in this skip list.
    #[allow(dead_code)] // Reserved for future reporting/diagnostics
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for SkipList {
    /// The default skip list covers local-only addresses.
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_DOMAINS.iter().map(|s| s.to_string()).collect())
    }
}

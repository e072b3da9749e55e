//! Link target validation and normalization.

use log::warn;

// Common browser and proxy limit on URL length
const MAX_URL_LENGTH: usize = 2048;

/// Prepares one entry from a URL list for probing.
///
/// Scheme-less entries like `example.com/docs` get an `https://` prefix;
/// anything that still fails to parse as an http(s) URL afterwards is
/// dropped with a warning, as are entries longer than `MAX_URL_LENGTH`
/// characters.
///
/// Returns the probe-ready URL, or `None` when the entry is unusable.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let candidate = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    if candidate.len() > MAX_URL_LENGTH {
        let preview: String = candidate.chars().take(50).collect();
        warn!(
            "Skipping URL of {} characters (limit {}): {}...",
            candidate.len(),
            MAX_URL_LENGTH,
            preview
        );
        return None;
    }

    match url::Url::parse(&candidate) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(candidate),
        Ok(parsed) => {
            warn!(
                "Skipping URL with unsupported scheme {}: {}",
                parsed.scheme(),
                url
            );
            None
        }
        Err(e) => {
            warn!("Skipping unparseable URL {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_and_normalize_url, MAX_URL_LENGTH};

    #[test]
    fn test_scheme_defaulting() {
        assert_eq!(
            validate_and_normalize_url("example.com"),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("https://example.com"),
            Some("https://example.com".to_string())
        );
        // http is preserved, never upgraded
        assert_eq!(
            validate_and_normalize_url("http://example.com"),
            Some("http://example.com".to_string())
        );
    }

    #[test]
    fn test_path_query_and_port_survive() {
        assert_eq!(
            validate_and_normalize_url("example.com/path?query=value"),
            Some("https://example.com/path?query=value".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("example.com:8080"),
            Some("https://example.com:8080".to_string())
        );
    }

    #[test]
    fn test_ipv6_hosts() {
        assert_eq!(
            validate_and_normalize_url("http://[2001:db8::1]"),
            Some("http://[2001:db8::1]".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("[2001:db8::1]"),
            Some("https://[2001:db8::1]".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("https://[2001:db8::1]:8080"),
            Some("https://[2001:db8::1]:8080".to_string())
        );
    }

    #[test]
    fn test_unusable_entries_are_dropped() {
        assert_eq!(validate_and_normalize_url("not a valid url!!!"), None);
        assert_eq!(validate_and_normalize_url(""), None);
        assert_eq!(validate_and_normalize_url("   "), None);
        assert_eq!(validate_and_normalize_url("://example.com"), None);
    }

    #[test]
    fn test_length_limit() {
        // Exactly at the limit passes
        let at_limit = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH - 20));
        assert_eq!(at_limit.len(), MAX_URL_LENGTH);
        assert!(validate_and_normalize_url(&at_limit).is_some());

        // Over the limit is rejected
        let over = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(validate_and_normalize_url(&over), None);

        // Under the limit raw but over it once the https:// prefix lands
        let barely = format!("example.com/{}", "a".repeat(MAX_URL_LENGTH - 15));
        assert!(barely.len() <= MAX_URL_LENGTH);
        assert_eq!(validate_and_normalize_url(&barely), None);
    }

    #[test]
    fn test_length_limit_multibyte_preview_does_not_panic() {
        let over = format!("https://example.com/{}", "ü".repeat(MAX_URL_LENGTH));
        assert_eq!(validate_and_normalize_url(&over), None);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_normalization_is_idempotent(url in "[a-z]{3,20}\\.[a-z]{2,5}") {
            if let Some(first) = validate_and_normalize_url(&url) {
                prop_assert_eq!(validate_and_normalize_url(&first), Some(first.clone()));
            }
        }

        #[test]
        fn test_scheme_defaulting_properties(domain in "[a-z]{3,20}\\.[a-z]{2,5}") {
            let bare = validate_and_normalize_url(&domain);
            prop_assert!(bare.is_some());
            prop_assert!(bare.unwrap().starts_with("https://"));

            let http = validate_and_normalize_url(&format!("http://{}", domain));
            prop_assert!(http.is_some());
            prop_assert!(http.unwrap().starts_with("http://"));
        }

        #[test]
        fn test_arbitrary_paths_never_panic(
            domain in "[a-z]{3,20}\\.[a-z]{2,5}",
            path in "[^/]{0,100}"
        ) {
            let _ = validate_and_normalize_url(&format!("https://{}/{}", domain, path));
        }

        #[test]
        fn test_ports_survive_normalization(
            domain in "[a-z]{3,20}\\.[a-z]{2,5}",
            port in 1u16..=65535
        ) {
            let result = validate_and_normalize_url(&format!("{}:{}", domain, port));
            prop_assert!(result.is_some());
            prop_assert!(result.unwrap().contains(&port.to_string()));
        }
    }
}

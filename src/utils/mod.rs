//! Utility functions and helpers.

pub mod http;
pub mod time;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Extract a stable post identifier from a board URL.
///
/// Boards address posts through a query parameter; the key varies by CMS.
pub fn extract_post_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let mut fallback_numeric: Option<String> = None;

    for (key, value) in parsed.query_pairs() {
        if value.is_empty() {
            continue;
        }

        let key_lower = key.to_lowercase();
        let value_string = value.to_string();

        if matches!(
            key_lower.as_str(),
            "articleno" | "article_no" | "board_seq" | "notice_id" | "seq" | "no" | "id" | "idx"
        ) {
            return Some(value_string);
        }

        if fallback_numeric.is_none() && value_string.chars().all(|c| c.is_ascii_digit()) {
            fallback_numeric = Some(value_string);
        }
    }

    if fallback_numeric.is_some() {
        return fallback_numeric;
    }

    // Path-addressed boards: /notice/9999
    if let Some(last) = parsed.path_segments().and_then(|segments| segments.last()) {
        if !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()) {
            return Some(last.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html"),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_extract_post_id_query_key() {
        let url = "https://example.com/view?articleNo=1234&mode=view";
        assert_eq!(extract_post_id(url), Some("1234".to_string()));
    }

    #[test]
    fn test_extract_post_id_query_fallback() {
        let url = "https://example.com/view?mode=view&post=888";
        assert_eq!(extract_post_id(url), Some("888".to_string()));
    }

    #[test]
    fn test_extract_post_id_path_digits() {
        let url = "https://example.com/notice/9999";
        assert_eq!(extract_post_id(url), Some("9999".to_string()));
    }

    #[test]
    fn test_extract_post_id_none() {
        assert_eq!(extract_post_id("https://example.com/about"), None);
        assert_eq!(extract_post_id("not a url"), None);
    }
}

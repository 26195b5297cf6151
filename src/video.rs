/// Video page recognition for VideoMind
use regex::Regex;
use std::sync::LazyLock;

/// URL shapes that carry a YouTube video id, tried in order.
/// The id runs up to the next `&`, `?` or newline.
static VIDEO_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?]+)",
        r"youtube\.com/embed/([^&\n?]+)",
        r"youtube\.com/v/([^&\n?]+)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Check whether a tab URL is a video watch page.
///
/// This is a plain substring test against `marker`, so
/// `https://m.youtube.com/watch?v=x` and `https://www.youtube.com/watch?v=x`
/// both qualify, while `https://www.youtube.com/` does not.
pub fn is_watch_page(url: &str, marker: &str) -> bool {
    !marker.is_empty() && url.contains(marker)
}

/// Resolve the active tab's URL to a video URL.
///
/// Returns the URL unchanged when it is a watch page. A tab without a
/// readable URL, or one that is not a watch page, resolves to `None`.
pub fn resolve_video_url(tab_url: Option<&str>, marker: &str) -> Option<String> {
    tab_url
        .filter(|url| is_watch_page(url, marker))
        .map(str::to_string)
}

/// Extract the video id from any of the common YouTube URL formats
///
/// Examples:
/// - https://www.youtube.com/watch?v=abc123&t=42 → abc123
/// - https://youtu.be/abc123 → abc123
/// - https://www.youtube.com/embed/abc123 → abc123
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "youtube.com/watch";

    #[test]
    fn test_is_watch_page() {
        assert!(is_watch_page("https://www.youtube.com/watch?v=abc123", MARKER));
        assert!(is_watch_page("https://m.youtube.com/watch?v=abc123&t=10", MARKER));
        assert!(!is_watch_page("https://www.youtube.com/", MARKER));
        assert!(!is_watch_page("https://example.com", MARKER));
        assert!(!is_watch_page("", MARKER));
    }

    #[test]
    fn test_is_watch_page_empty_marker_never_matches() {
        assert!(!is_watch_page("https://www.youtube.com/watch?v=abc123", ""));
    }

    #[test]
    fn test_resolve_video_url_returns_url_unchanged() {
        let urls = [
            "https://www.youtube.com/watch?v=abc123",
            "https://www.youtube.com/watch?v=abc123&list=PL1&index=2",
            "https://www.youtube.com/watch?v=%E2%9C%93",
        ];

        for url in urls {
            assert_eq!(resolve_video_url(Some(url), MARKER), Some(url.to_string()));
        }
    }

    #[test]
    fn test_resolve_video_url_rejects_other_pages() {
        assert_eq!(resolve_video_url(Some("https://example.com"), MARKER), None);
        assert_eq!(resolve_video_url(Some("https://youtu.be/abc123"), MARKER), None);
        assert_eq!(resolve_video_url(Some("chrome://extensions"), MARKER), None);
        assert_eq!(resolve_video_url(None, MARKER), None);
    }

    #[test]
    fn test_extract_video_id_formats() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=abc123"), Some("abc123".to_string()));
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=abc123&t=42"), Some("abc123".to_string()));
        assert_eq!(extract_video_id("https://youtu.be/abc123?si=xyz"), Some("abc123".to_string()));
        assert_eq!(extract_video_id("https://www.youtube.com/embed/abc123"), Some("abc123".to_string()));
        assert_eq!(extract_video_id("https://www.youtube.com/v/abc123"), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_video_id_missing() {
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
        assert_eq!(extract_video_id("https://example.com/watch?v=abc123"), None);
        assert_eq!(extract_video_id(""), None);
    }
}

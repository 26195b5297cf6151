/// Links into the external VideoMind application

use url::form_urlencoded;

/// Query parameter the external application reads the video URL from
pub const VIDEO_PARAM: &str = "video";

/// Build the destination URL for opening the external application.
///
/// With a video URL the result is `<base>?video=<percent-encoded url>`.
/// Without one (`None` or an empty string) the result is exactly `base`.
pub fn build_app_url(base: &str, video: Option<&str>) -> String {
    match video.filter(|v| !v.is_empty()) {
        Some(video_url) => {
            let separator = if base.contains('?') { '&' } else { '?' };
            let encoded: String = form_urlencoded::byte_serialize(video_url.as_bytes()).collect();
            format!("{}{}{}={}", base, separator, VIDEO_PARAM, encoded)
        }
        None => base.to_string(),
    }
}

/// Read the decoded `video` parameter back out of a destination URL
pub fn video_param(destination: &str) -> Option<String> {
    let (_, query) = destination.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == VIDEO_PARAM)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8501";

    #[test]
    fn test_build_app_url_with_video() {
        assert_eq!(
            build_app_url(BASE, Some("https://www.youtube.com/watch?v=abc123")),
            "http://localhost:8501?video=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc123"
        );
    }

    #[test]
    fn test_build_app_url_without_video() {
        assert_eq!(build_app_url(BASE, None), BASE);
    }

    #[test]
    fn test_build_app_url_empty_video_is_absent() {
        assert_eq!(build_app_url(BASE, Some("")), BASE);
    }

    #[test]
    fn test_build_app_url_encodes_reserved_characters() {
        let dest = build_app_url(BASE, Some("https://www.youtube.com/watch?v=a&t=1#x"));

        let (_, encoded) = dest.split_once("?video=").unwrap();
        assert!(!encoded.contains('&'));
        assert!(!encoded.contains('#'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn test_build_app_url_base_with_query() {
        assert_eq!(
            build_app_url("https://app.example.org/?lang=en", Some("https://youtu.be/x")),
            "https://app.example.org/?lang=en&video=https%3A%2F%2Fyoutu.be%2Fx"
        );
    }

    #[test]
    fn test_video_param_decodes_what_was_encoded() {
        let videos = [
            "https://www.youtube.com/watch?v=abc123",
            "https://www.youtube.com/watch?v=abc123&list=PL1&index=2",
            "https://www.youtube.com/watch?v=abc123#t=1m2s",
            "https://www.youtube.com/watch?v=abc 123+x",
            "https://www.youtube.com/watch?v=ünïcödé%20",
        ];

        for video in videos {
            let dest = build_app_url(BASE, Some(video));
            assert_eq!(video_param(&dest), Some(video.to_string()));
        }
    }

    #[test]
    fn test_video_param_absent() {
        assert_eq!(video_param(BASE), None);
        assert_eq!(video_param("http://localhost:8501?other=1"), None);
    }
}

/// Extension configuration, read from chrome.storage.local with compiled-in defaults
use serde::{Deserialize, Serialize};

/// Storage key holding an optional JSON override of [`ExtensionConfig`]
pub const CONFIG_STORAGE_KEY: &str = "videomind_config";

pub const DEFAULT_APP_BASE_URL: &str = "http://localhost:8501";
pub const DEFAULT_WATCH_MARKER: &str = "youtube.com/watch";
pub const DEFAULT_HOST: &str = "www.youtube.com";
pub const DEFAULT_ANCHOR_SELECTOR: &str = "#top-level-buttons-computed";
pub const DEFAULT_BUTTON_ID: &str = "ai-analyze-btn";
pub const DEFAULT_BUTTON_LABEL: &str = "🤖 Analyze with AI";
pub const DEFAULT_STATUS_TIMEOUT_MS: u32 = 3000;
/// `setTimeout` takes a signed 32-bit delay
pub const MAX_STATUS_TIMEOUT_MS: u32 = i32::MAX as u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Address of the external application, without a query string
    pub app_base_url: String,
    /// Substring that marks a tab URL as a video watch page
    pub watch_marker: String,
    /// Hostname the content script augments
    pub host: String,
    /// CSS selector of the container the injected button goes into
    pub anchor_selector: String,
    /// Element id reserved for the injected button
    pub button_id: String,
    pub button_label: String,
    pub status_timeout_ms: u32,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        ExtensionConfig {
            app_base_url: DEFAULT_APP_BASE_URL.to_string(),
            watch_marker: DEFAULT_WATCH_MARKER.to_string(),
            host: DEFAULT_HOST.to_string(),
            anchor_selector: DEFAULT_ANCHOR_SELECTOR.to_string(),
            button_id: DEFAULT_BUTTON_ID.to_string(),
            button_label: DEFAULT_BUTTON_LABEL.to_string(),
            status_timeout_ms: DEFAULT_STATUS_TIMEOUT_MS,
        }
    }
}

impl ExtensionConfig {
    /// Build a config from the value stored under [`CONFIG_STORAGE_KEY`].
    ///
    /// A missing value (`null`) yields the defaults. Fields absent from the
    /// stored object keep their default values.
    pub fn from_stored(value: serde_json::Value) -> Result<Self, String> {
        if value.is_null() {
            return Ok(Self::default());
        }

        let config: ExtensionConfig = serde_json::from_value(value)
            .map_err(|e| format!("Invalid stored config: {}", e))?;

        if config.app_base_url.trim().is_empty() {
            return Err("Invalid stored config: app_base_url is empty".to_string());
        }

        if config.status_timeout_ms > MAX_STATUS_TIMEOUT_MS {
            return Err(format!(
                "Invalid stored config: status_timeout_ms {} exceeds {}",
                config.status_timeout_ms, MAX_STATUS_TIMEOUT_MS
            ));
        }

        Ok(config)
    }

    /// Same as [`ExtensionConfig::from_stored`], but never fails
    pub fn from_stored_or_default(value: serde_json::Value) -> Self {
        Self::from_stored(value).unwrap_or_else(|e| {
            log::warn!("{}; falling back to defaults", e);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ExtensionConfig::default();

        assert_eq!(config.app_base_url, "http://localhost:8501");
        assert_eq!(config.watch_marker, "youtube.com/watch");
        assert_eq!(config.anchor_selector, "#top-level-buttons-computed");
        assert_eq!(config.button_id, "ai-analyze-btn");
        assert_eq!(config.status_timeout_ms, 3000);
    }

    #[test]
    fn test_from_stored_null_is_default() {
        let config = ExtensionConfig::from_stored(serde_json::Value::Null).unwrap();
        assert_eq!(config, ExtensionConfig::default());
    }

    #[test]
    fn test_from_stored_partial_override() {
        let config = ExtensionConfig::from_stored(json!({
            "app_base_url": "https://videomind.example.org",
            "status_timeout_ms": 5000,
        }))
        .unwrap();

        assert_eq!(config.app_base_url, "https://videomind.example.org");
        assert_eq!(config.status_timeout_ms, 5000);
        // Untouched fields keep their defaults
        assert_eq!(config.watch_marker, DEFAULT_WATCH_MARKER);
        assert_eq!(config.button_id, DEFAULT_BUTTON_ID);
    }

    #[test]
    fn test_from_stored_rejects_wrong_types() {
        let result = ExtensionConfig::from_stored(json!({ "status_timeout_ms": "soon" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_stored_rejects_empty_base_url() {
        let result = ExtensionConfig::from_stored(json!({ "app_base_url": "  " }));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_stored_rejects_timeout_beyond_set_timeout_range() {
        let result = ExtensionConfig::from_stored(json!({ "status_timeout_ms": 3_000_000_000u32 }));
        assert!(result.is_err());

        let config = ExtensionConfig::from_stored(json!({ "status_timeout_ms": MAX_STATUS_TIMEOUT_MS })).unwrap();
        assert_eq!(config.status_timeout_ms, MAX_STATUS_TIMEOUT_MS);
    }

    #[test]
    fn test_from_stored_or_default_recovers() {
        let config = ExtensionConfig::from_stored_or_default(json!("not an object"));
        assert_eq!(config, ExtensionConfig::default());
    }
}

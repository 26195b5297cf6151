/// Bridge to the browser: active tab lookup, tab creation, extension storage

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::{CONFIG_STORAGE_KEY, ExtensionConfig};

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;
}

/// The parts of a `chrome.tabs.Tab` the popup cares about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: i32,
    /// Absent when the extension may not read the tab's URL
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
}

/// Query the focused tab of the current window
pub async fn active_tab() -> Result<Option<TabInfo>, String> {
    let tab_js = getActiveTab()
        .await
        .map_err(|e| format!("Failed to query active tab: {:?}", e))?;

    if tab_js.is_null() || tab_js.is_undefined() {
        return Ok(None);
    }

    let tab: TabInfo = serde_wasm_bindgen::from_value(tab_js)
        .map_err(|e| format!("Failed to parse tab: {:?}", e))?;
    log::debug!("Active tab {}: {}", tab.id, tab.title);

    Ok(Some(tab))
}

/// How a new tab gets opened in the current context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOpener {
    /// `chrome.tabs.create`, available to extension pages such as the popup
    ChromeTabs,
    /// `window.open(url, "_blank")`, for content scripts where `chrome.tabs` is absent
    Window,
}

impl TabOpener {
    pub async fn open(self, url: &str) -> Result<(), String> {
        match self {
            TabOpener::ChromeTabs => createTab(url)
                .await
                .map_err(|e| format!("Failed to create tab: {:?}", e)),
            TabOpener::Window => {
                let window = web_sys::window().ok_or("No window available")?;
                window
                    .open_with_url_and_target(url, "_blank")
                    .map(|_| ())
                    .map_err(|e| format!("Failed to open window: {:?}", e))
            }
        }
    }

    /// Open `url` without waiting on the result; failures are only logged
    pub fn open_detached(self, url: String) {
        log::info!("Opening {}", url);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = self.open(&url).await {
                log::warn!("{}", e);
            }
        });
    }
}

/// Load the extension config, falling back to defaults when storage is unavailable
pub async fn load_config() -> ExtensionConfig {
    let stored = match getStorage(CONFIG_STORAGE_KEY).await {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read config from storage: {:?}", e);
            return ExtensionConfig::default();
        }
    };

    if stored.is_null() || stored.is_undefined() {
        return ExtensionConfig::default();
    }

    match serde_wasm_bindgen::from_value::<serde_json::Value>(stored) {
        Ok(value) => ExtensionConfig::from_stored_or_default(value),
        Err(e) => {
            log::warn!("Failed to parse stored config: {:?}", e);
            ExtensionConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_info_deserializes_without_url() {
        let tab: TabInfo = serde_json::from_str(r#"{"id": 7, "title": "New Tab"}"#).unwrap();

        assert_eq!(tab.id, 7);
        assert_eq!(tab.url, None);
        assert_eq!(tab.title, "New Tab");
    }

    #[test]
    fn test_tab_info_deserializes_with_url() {
        let tab: TabInfo = serde_json::from_str(
            r#"{"id": 1, "url": "https://www.youtube.com/watch?v=abc123", "title": "A video"}"#,
        )
        .unwrap();

        assert_eq!(tab.url.as_deref(), Some("https://www.youtube.com/watch?v=abc123"));
    }
}

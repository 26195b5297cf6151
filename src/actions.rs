/// Popup actions: what clicking "Analyze" or "Open App" should do

use crate::app_link::build_app_url;
use crate::config::ExtensionConfig;
use crate::video::{extract_video_id, resolve_video_url};

pub const NO_VIDEO_MESSAGE: &str = "Please open a YouTube video first!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// A transient banner shown in the popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// The single effect a click resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a new tab navigated to this URL
    OpenTab(String),
    /// Show a banner and do nothing else
    Notify(StatusMessage),
}

/// "Analyze": forward the active tab's video, or tell the user there is none
pub fn on_analyze(tab_url: Option<&str>, config: &ExtensionConfig) -> Action {
    match resolve_video_url(tab_url, &config.watch_marker) {
        Some(video_url) => Action::OpenTab(build_app_url(&config.app_base_url, Some(&video_url))),
        None => Action::Notify(StatusMessage::error(NO_VIDEO_MESSAGE)),
    }
}

/// "Open App": open the external application with nothing pre-filled
pub fn on_open_app(config: &ExtensionConfig) -> Action {
    Action::OpenTab(build_app_url(&config.app_base_url, None))
}

/// The two popup buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Analyze,
    OpenApp,
}

/// Resolve a click against the loaded config.
///
/// Before the stored config has loaded there is nothing to act on, so the
/// click resolves to `None` rather than falling back to the default base URL.
pub fn on_click(click: Click, tab_url: Option<&str>, config: Option<&ExtensionConfig>) -> Option<Action> {
    let config = config?;
    Some(match click {
        Click::Analyze => on_analyze(tab_url, config),
        Click::OpenApp => on_open_app(config),
    })
}

/// Hint shown under the buttons when the active tab is a watch page
pub fn detected_video_hint(tab_url: Option<&str>, config: &ExtensionConfig) -> Option<String> {
    let video_url = resolve_video_url(tab_url, &config.watch_marker)?;
    Some(match extract_video_id(&video_url) {
        Some(id) => format!("Video detected: {}", id),
        None => "Video detected".to_string(),
    })
}

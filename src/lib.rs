/// VideoMind - Chrome Extension that forwards YouTube videos to the VideoMind app
/// Built with Rust + WASM + Yew

mod actions;
mod app_link;
mod browser;
mod config;
mod injector;
mod video;
pub mod ui;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export core functions for JavaScript access
#[wasm_bindgen]
pub fn is_watch_page(url: &str) -> bool {
    video::is_watch_page(url, config::DEFAULT_WATCH_MARKER)
}

#[wasm_bindgen]
pub fn build_app_url(base: &str, video_url: Option<String>) -> String {
    app_link::build_app_url(base, video_url.as_deref())
}

#[wasm_bindgen]
pub fn video_param(destination: &str) -> Option<String> {
    app_link::video_param(destination)
}

#[wasm_bindgen]
pub fn extract_video_id(url: &str) -> Option<String> {
    video::extract_video_id(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start watching the host page for the injected button's anchor
#[wasm_bindgen]
pub fn start_content_script() {
    spawn_local(async {
        let config = browser::load_config().await;
        if let Err(e) = injector::run_content_script(&config) {
            log::warn!("Content script failed to start: {}", e);
        }
    });
}

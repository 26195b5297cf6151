/// Popup UI for the VideoMind extension

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use crate::actions::{detected_video_hint, on_click, Action, Click, StatusMessage};
use crate::browser::{active_tab, load_config, TabOpener};
use crate::config::{ExtensionConfig, DEFAULT_STATUS_TIMEOUT_MS};

const OPENING_MESSAGE: &str = "Opening VideoMind...";

#[function_component(App)]
pub fn app() -> Html {
    // None until the stored config has been read
    let config = use_state(|| None::<ExtensionConfig>);
    let status = use_state(|| None::<StatusMessage>);
    let video_hint = use_state(|| None::<String>);

    // Load config and peek at the active tab on mount
    {
        let config = config.clone();
        let video_hint = video_hint.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let loaded = load_config().await;
                match active_tab().await {
                    Ok(tab) => {
                        let tab_url = tab.and_then(|t| t.url);
                        video_hint.set(detected_video_hint(tab_url.as_deref(), &loaded));
                    }
                    Err(e) => log::warn!("{}", e),
                }
                config.set(Some(loaded));
            });
            || ()
        });
    }

    // Dismiss the status banner after a fixed delay
    {
        let status = status.clone();
        let timeout_ms = (*config)
            .as_ref()
            .map_or(DEFAULT_STATUS_TIMEOUT_MS, |config| config.status_timeout_ms);
        use_effect_with((*status).clone(), move |current| {
            let handle = current.as_ref().and_then(|_| {
                let status = status.clone();
                set_timeout(timeout_ms, move || status.set(None))
            });
            move || {
                if let Some(handle) = handle {
                    clear_timeout(handle);
                }
            }
        });
    }

    // "Analyze": resolve the active tab at click time
    let on_analyze_click = {
        let config = config.clone();
        let status = status.clone();

        Callback::from(move |_: MouseEvent| {
            let config = (*config).clone();
            let status = status.clone();

            spawn_local(async move {
                let tab_url = match active_tab().await {
                    Ok(tab) => tab.and_then(|t| t.url),
                    Err(e) => {
                        log::warn!("{}", e);
                        None
                    }
                };
                if let Some(action) = on_click(Click::Analyze, tab_url.as_deref(), config.as_ref()) {
                    dispatch(action, &status);
                }
            });
        })
    };

    let on_open_app_click = {
        let config = config.clone();
        let status = status.clone();

        Callback::from(move |_: MouseEvent| {
            if let Some(action) = on_click(Click::OpenApp, None, (*config).as_ref()) {
                dispatch(action, &status);
            }
        })
    };

    let is_loading = config.is_none();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"VideoMind"}</h1>

            <div class="flex-column-gap">
                <Button onclick={on_analyze_click} disabled={is_loading} variant={ButtonVariant::Primary} block={true}>
                    {"Analyze"}
                </Button>
                <Button onclick={on_open_app_click} disabled={is_loading} variant={ButtonVariant::Secondary} block={true}>
                    {"Open App"}
                </Button>
            </div>

            if let Some(hint) = (*video_hint).clone() {
                <p class="video-hint">{hint}</p>
            }

            if let Some(message) = (*status).clone() {
                <div id="status" class={classes!("status", if message.is_error() { "error" } else { "success" })}>
                    <Alert r#type={alert_type(&message)} title={message.text.clone()} inline={true}>
                    </Alert>
                </div>
            }

            <p class="footer-popup">
                {"VideoMind v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

fn dispatch(action: Action, status: &UseStateHandle<Option<StatusMessage>>) {
    match action {
        Action::OpenTab(url) => {
            status.set(Some(StatusMessage::success(OPENING_MESSAGE)));
            TabOpener::ChromeTabs.open_detached(url);
        }
        Action::Notify(message) => status.set(Some(message)),
    }
}

fn alert_type(message: &StatusMessage) -> AlertType {
    if message.is_error() {
        AlertType::Danger
    } else {
        AlertType::Success
    }
}

fn set_timeout(timeout_ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
    let window = web_sys::window()?;
    let callback = Closure::once_into_js(f);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            i32::try_from(timeout_ms).unwrap_or(i32::MAX),
        )
        .ok()
}

fn clear_timeout(handle: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(handle);
    }
}

/// Page injector: keeps one "Analyze with AI" button inside the video page's action bar.
///
/// YouTube rewrites its DOM continuously, so the anchor region may appear late
/// or be replaced. Every mutation triggers another [`Injector::attempt`], which
/// inserts the button only when the anchor exists and the button does not.

use std::cell::Cell;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, MouseEvent, MutationObserver, MutationObserverInit};

use crate::app_link::build_app_url;
use crate::browser::TabOpener;
use crate::config::ExtensionConfig;

const BUTTON_CLASS: &str = "style-scope ytd-button-renderer style-text";

thread_local! {
    static OBSERVING: Cell<bool> = const { Cell::new(false) };
}

/// Whether the button is currently on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionState {
    NotInjected,
    Injected,
}

/// Result of a single injection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionOutcome {
    Inserted,
    AlreadyPresent,
    AnchorMissing,
    Failed(String),
}

/// What gets inserted into the anchor region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub id: String,
    pub label: String,
    pub app_base_url: String,
}

impl ButtonSpec {
    pub fn from_config(config: &ExtensionConfig) -> Self {
        ButtonSpec {
            id: config.button_id.clone(),
            label: config.button_label.clone(),
            app_base_url: config.app_base_url.clone(),
        }
    }
}

/// The DOM operations the injector needs
pub trait PageDom {
    type Anchor;

    fn find_anchor(&self, selector: &str) -> Option<Self::Anchor>;

    fn has_element(&self, id: &str) -> bool;

    fn insert_button(&self, anchor: &Self::Anchor, button: &ButtonSpec) -> Result<(), String>;
}

pub struct Injector<D: PageDom> {
    dom: D,
    anchor_selector: String,
    button: ButtonSpec,
}

impl<D: PageDom> Injector<D> {
    pub fn new(dom: D, config: &ExtensionConfig) -> Self {
        Injector {
            dom,
            anchor_selector: config.anchor_selector.clone(),
            button: ButtonSpec::from_config(config),
        }
    }

    pub fn state(&self) -> InjectionState {
        if self.dom.has_element(&self.button.id) {
            InjectionState::Injected
        } else {
            InjectionState::NotInjected
        }
    }

    /// Insert the button if the anchor exists and the button does not.
    ///
    /// The presence check and the insertion run back to back with no await
    /// in between, so two attempts against the same DOM never produce two buttons.
    pub fn attempt(&self) -> InjectionOutcome {
        let Some(anchor) = self.dom.find_anchor(&self.anchor_selector) else {
            return InjectionOutcome::AnchorMissing;
        };

        if self.state() == InjectionState::Injected {
            return InjectionOutcome::AlreadyPresent;
        }

        match self.dom.insert_button(&anchor, &self.button) {
            Ok(()) => {
                log::debug!("Inserted #{} into {}", self.button.id, self.anchor_selector);
                InjectionOutcome::Inserted
            }
            Err(e) => {
                log::warn!("Failed to insert #{}: {}", self.button.id, e);
                InjectionOutcome::Failed(e)
            }
        }
    }

    #[cfg(test)]
    fn dom(&self) -> &D {
        &self.dom
    }
}

/// [`PageDom`] over the live document
pub struct WebPageDom {
    document: Document,
}

impl WebPageDom {
    pub fn new(document: Document) -> Self {
        WebPageDom { document }
    }
}

impl PageDom for WebPageDom {
    type Anchor = Element;

    fn find_anchor(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn insert_button(&self, anchor: &Element, spec: &ButtonSpec) -> Result<(), String> {
        let button: HtmlButtonElement = self
            .document
            .create_element("button")
            .map_err(|e| format!("Failed to create button: {:?}", e))?
            .dyn_into()
            .map_err(|_| "Created element is not a button".to_string())?;

        button.set_id(&spec.id);
        button.set_class_name(BUTTON_CLASS);
        button.set_text_content(Some(spec.label.as_str()));
        button
            .style()
            .set_property("margin-left", "8px")
            .map_err(|e| format!("Failed to style button: {:?}", e))?;

        // The page is a single-page app, so read the URL at click time
        let base = spec.app_base_url.clone();
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
            match current_page_url() {
                Some(page_url) => TabOpener::Window.open_detached(build_app_url(&base, Some(&page_url))),
                None => log::warn!("Page URL unavailable"),
            }
        });
        button.set_onclick(Some(on_click.as_ref().unchecked_ref()));
        on_click.forget();

        anchor
            .append_child(&button)
            .map_err(|e| format!("Failed to append button: {:?}", e))?;

        Ok(())
    }
}

fn current_page_url() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

fn current_hostname() -> Option<String> {
    web_sys::window()?.location().hostname().ok()
}

/// Attempt once now, then again after every mutation under `document.body`.
///
/// The observer lives until the page unloads. Calling this a second time on
/// the same page is a no-op.
pub fn observe_page(config: &ExtensionConfig) -> Result<(), String> {
    if OBSERVING.with(|observing| observing.replace(true)) {
        log::debug!("Page observer already running");
        return Ok(());
    }

    start_observer(config).inspect_err(|_| OBSERVING.with(|observing| observing.set(false)))
}

fn start_observer(config: &ExtensionConfig) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or("No document available")?;
    let body = document.body().ok_or("Document has no body")?;

    let injector = Injector::new(WebPageDom::new(document), config);
    injector.attempt();

    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |_records: js_sys::Array, _observer: MutationObserver| {
            injector.attempt();
        },
    );

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| format!("Failed to create observer: {:?}", e))?;

    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);

    observer
        .observe_with_options(&body, &options)
        .map_err(|e| format!("Failed to observe body: {:?}", e))?;

    callback.forget();
    log::info!("Watching page for {}", config.anchor_selector);
    Ok(())
}

/// Whether the page's hostname is the one the content script augments
pub fn is_target_host(hostname: Option<&str>, config: &ExtensionConfig) -> bool {
    hostname == Some(config.host.as_str())
}

/// Content script entry: only augments the configured video host
pub fn run_content_script(config: &ExtensionConfig) -> Result<(), String> {
    if is_target_host(current_hostname().as_deref(), config) {
        observe_page(config)
    } else {
        Ok(())
    }
}

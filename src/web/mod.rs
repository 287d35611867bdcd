//! Browser backend.
//!
//! `mount` builds the coordinator over the live document and forwards DOM
//! events to it. Everything else in this module is a thin adapter from a
//! collaborator trait to the matching `web-sys` API.

mod document;
mod platform;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, console};

use crate::app::domain::messages::{EventResponse, UiEvent};
use crate::app::domain::settings::UiSettings;
use crate::app::infrastructure::dom::Dom;
use crate::app::infrastructure::error::UiError;
use crate::app::infrastructure::storage::PreferenceStore;
use crate::app::state::{Collaborators, UiStateCoordinator};

pub use document::WebDocument;
pub use platform::{LocalStorage, WebScheduler, WebVisibility};

type SharedUi = Rc<RefCell<UiStateCoordinator<WebDocument>>>;

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => console::error_1(&line),
            log::Level::Warn => console::warn_1(&line),
            log::Level::Info => console::info_1(&line),
            log::Level::Debug | log::Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route `log` records to the browser console. Only the first call installs.
pub fn init_logging(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn js_error(err: UiError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Entry point called from the page once the DOM is parsed.
///
/// `settings_json` may be partial; anything missing keeps its default.
#[wasm_bindgen]
pub fn mount(settings_json: Option<String>) -> Result<(), JsValue> {
    init_logging(log::LevelFilter::Info);

    // from_json validates, the defaults are known good
    let settings = match settings_json {
        Some(json) => UiSettings::from_json(&json).map_err(js_error)?,
        None => UiSettings::default(),
    };

    let window = web_sys::window().ok_or_else(|| js_error(UiError::Platform("no window".into())))?;
    let dom = Rc::new(
        WebDocument::new(window.clone()).ok_or_else(|| js_error(UiError::Platform("no document".into())))?,
    );
    let store = LocalStorage::open(&window).map(|s| Rc::new(s) as Rc<dyn PreferenceStore>);

    let selectors = settings.selectors.clone();
    let ui: SharedUi = Rc::new(RefCell::new(UiStateCoordinator::start(
        Collaborators {
            dom: dom.clone(),
            store,
            scheduler: Rc::new(WebScheduler::new(window.clone())),
            visibility: Rc::new(WebVisibility::detect(&window)),
        },
        settings,
    )));

    if let Some(toggle) = dom.query(&selectors.theme_toggle) {
        listen(&toggle, "click", false, &ui, |_| Some(UiEvent::ThemeToggleClicked))?;
    }
    if let Some(hamburger) = dom.query(&selectors.hamburger) {
        listen(&hamburger, "click", false, &ui, |_| Some(UiEvent::HamburgerClicked))?;
    }

    let mut links = dom.query_all(&selectors.nav_links);
    for anchor in dom.query_all(&selectors.anchors) {
        if !links.contains(&anchor) {
            links.push(anchor);
        }
    }
    for link in links {
        let target = link.clone();
        listen(&link, "click", false, &ui, move |_| Some(UiEvent::LinkClicked(target.clone())))?;
    }

    listen(dom.document(), "click", false, &ui, |event| {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        Some(UiEvent::DocumentClicked(target))
    })?;

    listen(dom.window(), "scroll", true, &ui, |_| Some(UiEvent::Scrolled))?;
    listen(dom.window(), "resize", true, &ui, |_| Some(UiEvent::Resized))?;

    let document = dom.document().clone();
    listen(dom.document(), "visibilitychange", false, &ui, move |_| {
        Some(UiEvent::VisibilityChanged {
            hidden: document.hidden(),
        })
    })?;

    for download in dom.query_all(&selectors.download_link) {
        listen(&download, "click", false, &ui, |_| Some(UiEvent::DownloadClicked))?;
    }
    for button in dom.query_all(&selectors.contact_buttons) {
        let target = button.clone();
        listen(&button, "click", false, &ui, move |_| Some(UiEvent::ContactClicked(target.clone())))?;
    }

    Ok(())
}

/// Forward `kind` events on `target` to the coordinator. The listener lives
/// as long as the page.
fn listen<F>(target: &EventTarget, kind: &str, passive: bool, ui: &SharedUi, to_event: F) -> Result<(), JsValue>
where
    F: Fn(&Event) -> Option<UiEvent<Element>> + 'static,
{
    let ui = ui.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(ui_event) = to_event(&event) else {
            return;
        };
        let Ok(mut ui) = ui.try_borrow_mut() else {
            log::debug!("Dropped re-entrant {} event", event.type_());
            return;
        };
        if ui.handle(ui_event) == EventResponse::PreventDefault {
            event.prevent_default();
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        handler.as_ref().unchecked_ref(),
        &options,
    )?;
    handler.forget();
    Ok(())
}

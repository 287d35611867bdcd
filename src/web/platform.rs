//! Browser implementations of the storage, timer and visibility collaborators.

use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Storage, Window};

use crate::app::infrastructure::error::{Result, UiError};
use crate::app::infrastructure::scheduler::{Callback, Scheduler, TimerId};
use crate::app::infrastructure::storage::PreferenceStore;
use crate::app::infrastructure::visibility::{EnterCallback, VisibilityWatcher, WatchDecision, WatchOptions};

/// `window.localStorage`.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// None when storage is disabled, e.g. in some private browsing modes.
    pub fn open(window: &Window) -> Option<Self> {
        let storage = window.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| UiError::Storage(format!("{:?}", err)))
    }
}

pub struct WebScheduler {
    window: Window,
}

impl WebScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for WebScheduler {
    fn set_timeout(&self, delay: Duration, callback: Callback) -> TimerId {
        let handler = Closure::once_into_js(move || callback());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(handler.unchecked_ref(), millis)
        {
            Ok(handle) => TimerId(handle as u64),
            Err(err) => {
                log::warn!("setTimeout failed: {:?}", err);
                TimerId(0)
            }
        }
    }

    fn clear_timeout(&self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0 as i32);
    }

    fn request_animation_frame(&self, callback: Callback) {
        let handler = Closure::once_into_js(move || callback());
        if let Err(err) = self.window.request_animation_frame(handler.unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?}", err);
        }
    }
}

/// `IntersectionObserver`, when the browser has one.
pub struct WebVisibility {
    available: bool,
}

impl WebVisibility {
    pub fn detect(window: &Window) -> Self {
        let available = Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        if !available {
            log::debug!("IntersectionObserver unavailable");
        }
        Self { available }
    }
}

impl VisibilityWatcher<Element> for WebVisibility {
    fn is_available(&self) -> bool {
        self.available
    }

    fn watch(&self, targets: Vec<Element>, options: WatchOptions, mut on_enter: EnterCallback<Element>) -> Result<()> {
        if !self.available {
            return Err(UiError::Platform("IntersectionObserver unavailable".to_string()));
        }

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    if on_enter(&target) == WatchDecision::Unwatch {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|err| UiError::Platform(format!("IntersectionObserver construction failed: {:?}", err)))?;
        for target in &targets {
            observer.observe(target);
        }
        // The observer lives as long as the page
        callback.forget();
        Ok(())
    }
}

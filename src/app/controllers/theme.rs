use std::rc::Rc;

use crate::app::domain::settings::{SelectorSettings, ThemeSettings};
use crate::app::domain::theme::ThemePreference;
use crate::app::infrastructure::dom::Dom;
use crate::app::infrastructure::storage::PreferenceStore;

/// Light/dark switch backed by the preference store.
pub struct ThemeManager<D: Dom> {
    dom: Rc<D>,
    store: Option<Rc<dyn PreferenceStore>>,
    settings: ThemeSettings,
    host: D::Element,
    icon: Option<D::Element>,
    current: ThemePreference,
}

impl<D: Dom> ThemeManager<D> {
    /// None when the page has no `<body>` to carry the theme class.
    pub fn attach(
        dom: Rc<D>,
        store: Option<Rc<dyn PreferenceStore>>,
        selectors: &SelectorSettings,
        settings: &ThemeSettings,
    ) -> Option<Self> {
        let host = dom.body()?;
        let icon = dom.query(&selectors.theme_icon);
        Some(Self {
            dom,
            store,
            settings: settings.clone(),
            host,
            icon,
            current: ThemePreference::default(),
        })
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Apply the persisted preference. Light when nothing is stored.
    pub fn restore(&mut self) -> ThemePreference {
        let stored = self
            .store
            .as_ref()
            .and_then(|s| s.get(&self.settings.storage_key));
        self.current = ThemePreference::from_stored(stored.as_deref());
        self.apply();
        log::debug!("Restored {} theme", self.current.as_str());
        self.current
    }

    pub fn toggle(&mut self) -> ThemePreference {
        self.current = self.current.toggled();
        self.apply();

        if let Some(store) = &self.store
            && let Err(e) = store.set(&self.settings.storage_key, self.current.as_str())
        {
            log::warn!("Failed to persist theme preference: {}", e);
        }

        log::info!("Switched to {} theme", self.current.as_str());
        self.current
    }

    fn apply(&self) {
        if self.current.is_dark() {
            self.dom.add_class(&self.host, &self.settings.dark_class);
        } else {
            self.dom.remove_class(&self.host, &self.settings.dark_class);
        }

        if let Some(icon) = &self.icon {
            let glyph = if self.current.is_dark() {
                &self.settings.icon_dark
            } else {
                &self.settings.icon_light
            };
            self.dom.set_class_name(icon, glyph);
        }
    }
}

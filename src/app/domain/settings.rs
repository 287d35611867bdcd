use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::typewriter::TypewriterTimings;
use crate::app::infrastructure::error::{Result, UiError};
use crate::app::infrastructure::visibility::WatchOptions;

/// CSS selectors for every element the behavior layer touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSettings {
    pub theme_toggle: String,
    pub theme_icon: String,
    pub hamburger: String,
    pub hamburger_icon: String,
    pub nav_menu: String,
    pub navbar: String,
    pub nav_links: String,
    pub anchors: String,
    pub sections: String,
    pub hero: String,
    pub reveal: String,
    pub typewriter: String,
    pub lazy_images: String,
    pub download_link: String,
    pub contact_buttons: String,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            theme_toggle: "#theme-toggle".to_string(),
            theme_icon: "#theme-icon".to_string(),
            hamburger: ".mobile-menu-toggle".to_string(),
            hamburger_icon: ".mobile-menu-toggle i".to_string(),
            nav_menu: "#navbar-menu".to_string(),
            navbar: ".navbar".to_string(),
            nav_links: ".navbar-menu a".to_string(),
            anchors: "a[href^=\"#\"]".to_string(),
            sections: "section[id]".to_string(),
            hero: "#home".to_string(),
            reveal: ".fade-in, .timeline-item, .project-card, .skill-category, .education-card"
                .to_string(),
            typewriter: ".hero-subtitle".to_string(),
            lazy_images: "img[data-src]".to_string(),
            download_link: "a[href$=\".pdf\"]".to_string(),
            contact_buttons: ".contact-buttons .btn".to_string(),
        }
    }
}

impl SelectorSettings {
    fn all(&self) -> [(&'static str, &str); 15] {
        [
            ("theme_toggle", self.theme_toggle.as_str()),
            ("theme_icon", self.theme_icon.as_str()),
            ("hamburger", self.hamburger.as_str()),
            ("hamburger_icon", self.hamburger_icon.as_str()),
            ("nav_menu", self.nav_menu.as_str()),
            ("navbar", self.navbar.as_str()),
            ("nav_links", self.nav_links.as_str()),
            ("anchors", self.anchors.as_str()),
            ("sections", self.sections.as_str()),
            ("hero", self.hero.as_str()),
            ("reveal", self.reveal.as_str()),
            ("typewriter", self.typewriter.as_str()),
            ("lazy_images", self.lazy_images.as_str()),
            ("download_link", self.download_link.as_str()),
            ("contact_buttons", self.contact_buttons.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub storage_key: String,
    pub dark_class: String,
    /// Icon classes shown while dark (offers the way back to light)
    pub icon_dark: String,
    pub icon_light: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            dark_class: "dark".to_string(),
            icon_dark: "bi bi-sun".to_string(),
            icon_light: "bi bi-moon".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    pub desktop_breakpoint: f64,
    pub active_class: String,
    pub icon_open: String,
    pub icon_closed: String,
    pub label_open: String,
    pub label_closed: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            desktop_breakpoint: 768.0,
            active_class: "active".to_string(),
            icon_open: "bi bi-x".to_string(),
            icon_closed: "bi bi-list".to_string(),
            label_open: "Cerrar menú de navegación".to_string(),
            label_closed: "Abrir menú de navegación".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Fixed navbar height subtracted from smooth-scroll targets
    pub header_offset: f64,
    /// Added to the scroll offset before locating the active section
    pub probe_offset: f64,
    pub navbar_threshold: f64,
    pub navbar_scrolled_class: String,
    pub navbar_blur: String,
    pub parallax_factor: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            probe_offset: 100.0,
            navbar_threshold: 50.0,
            navbar_scrolled_class: "scrolled".to_string(),
            navbar_blur: "blur(10px)".to_string(),
            parallax_factor: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    pub threshold: f64,
    pub root_margin: String,
    pub visible_class: String,
    /// Initial downward offset of hidden elements, in px
    pub offset: f64,
    pub transition: String,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            visible_class: "visible".to_string(),
            offset: 30.0,
            transition: "opacity 0.6s ease, transform 0.6s ease".to_string(),
        }
    }
}

impl RevealSettings {
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            threshold: self.threshold,
            root_margin: self.root_margin.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterSettings {
    pub texts: Vec<String>,
    pub type_speed_ms: u64,
    pub delete_speed_ms: u64,
    pub pause_ms: u64,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            texts: vec![
                "Desarrollador Frontend".to_string(),
                "Especialista en React".to_string(),
                "Creador de Experiencias Web".to_string(),
                "Apasionado por la Tecnología".to_string(),
            ],
            type_speed_ms: 100,
            delete_speed_ms: 50,
            pause_ms: 2000,
        }
    }
}

impl TypewriterSettings {
    pub fn timings(&self) -> TypewriterTimings {
        TypewriterTimings {
            type_speed: Duration::from_millis(self.type_speed_ms),
            delete_speed: Duration::from_millis(self.delete_speed_ms),
            pause_time: Duration::from_millis(self.pause_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeSettings {
    pub message: String,
    pub slide_in_ms: u64,
    pub visible_ms: u64,
    pub slide_out_ms: u64,
}

impl Default for NoticeSettings {
    fn default() -> Self {
        Self {
            message: "¡Descargando CV!".to_string(),
            slide_in_ms: 100,
            visible_ms: 3000,
            slide_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default)]
    pub selectors: SelectorSettings,

    #[serde(default)]
    pub theme: ThemeSettings,

    #[serde(default)]
    pub navigation: NavigationSettings,

    #[serde(default)]
    pub scroll: ScrollSettings,

    #[serde(default)]
    pub reveal: RevealSettings,

    #[serde(default)]
    pub typewriter: TypewriterSettings,

    #[serde(default)]
    pub notice: NoticeSettings,

    /// Added to `<body>` once everything is wired
    #[serde(default = "default_loaded_class")]
    pub loaded_class: String,

    #[serde(default = "default_parallax_enabled")]
    pub parallax_enabled: bool,

    #[serde(default = "default_typewriter_enabled")]
    pub typewriter_enabled: bool,
}

fn default_loaded_class() -> String {
    "loaded".to_string()
}

fn default_parallax_enabled() -> bool {
    true
}

fn default_typewriter_enabled() -> bool {
    true
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            selectors: SelectorSettings::default(),
            theme: ThemeSettings::default(),
            navigation: NavigationSettings::default(),
            scroll: ScrollSettings::default(),
            reveal: RevealSettings::default(),
            typewriter: TypewriterSettings::default(),
            notice: NoticeSettings::default(),
            loaded_class: default_loaded_class(),
            parallax_enabled: default_parallax_enabled(),
            typewriter_enabled: default_typewriter_enabled(),
        }
    }
}

impl UiSettings {
    pub fn from_json(contents: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a `.toml` or `.json` file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            Some("json") => Self::from_json(&contents),
            other => Err(UiError::Settings(format!(
                "unsupported settings format: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Like [`load`](Self::load), but any failure falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings from {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, selector) in self.selectors.all() {
            if selector.trim().is_empty() {
                return Err(UiError::Settings(format!("selector `{}` is empty", name)));
            }
        }

        let lengths = [
            ("navigation.desktop_breakpoint", self.navigation.desktop_breakpoint),
            ("scroll.header_offset", self.scroll.header_offset),
            ("scroll.probe_offset", self.scroll.probe_offset),
            ("scroll.navbar_threshold", self.scroll.navbar_threshold),
            ("scroll.parallax_factor", self.scroll.parallax_factor),
            ("reveal.offset", self.reveal.offset),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(UiError::Settings(format!(
                    "`{}` must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(UiError::Settings(format!(
                "`reveal.threshold` must be within 0..=1, got {}",
                self.reveal.threshold
            )));
        }

        if !is_valid_root_margin(&self.reveal.root_margin) {
            return Err(UiError::Settings(format!(
                "`reveal.root_margin` must be one to four px or % lengths, got {:?}",
                self.reveal.root_margin
            )));
        }

        let classes = [
            ("theme.dark_class", &self.theme.dark_class),
            ("navigation.active_class", &self.navigation.active_class),
            ("scroll.navbar_scrolled_class", &self.scroll.navbar_scrolled_class),
            ("reveal.visible_class", &self.reveal.visible_class),
            ("loaded_class", &self.loaded_class),
        ];
        for (name, class) in classes {
            // classList.add throws on both
            if class.is_empty() || class.contains(char::is_whitespace) {
                return Err(UiError::Settings(format!(
                    "`{}` must be a single class name, got {:?}",
                    name, class
                )));
            }
        }

        if self.theme.storage_key.is_empty() {
            return Err(UiError::Settings("`theme.storage_key` is empty".to_string()));
        }

        Ok(())
    }
}

/// Same grammar as `IntersectionObserver` accepts: 1..=4 lengths in px or %.
fn is_valid_root_margin(margin: &str) -> bool {
    let parts: Vec<&str> = margin.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 4 {
        return false;
    }
    parts.iter().all(|part| {
        let number = part
            .strip_suffix("px")
            .or_else(|| part.strip_suffix('%'));
        number.is_some_and(|n| n.parse::<f64>().is_ok_and(f64::is_finite))
    })
}

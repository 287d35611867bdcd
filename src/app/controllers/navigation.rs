use std::rc::Rc;

use crate::app::domain::menu::MenuState;
use crate::app::domain::settings::{NavigationSettings, SelectorSettings};
use crate::app::infrastructure::dom::Dom;

/// Mobile menu open/closed state and its hamburger control.
pub struct NavigationController<D: Dom> {
    dom: Rc<D>,
    settings: NavigationSettings,
    hamburger: D::Element,
    icon: Option<D::Element>,
    menu: D::Element,
    /// Clicks inside this region never count as "outside"
    region: Option<D::Element>,
    links: Vec<D::Element>,
    state: MenuState,
}

impl<D: Dom> NavigationController<D> {
    /// None unless both the hamburger and the menu container exist.
    pub fn attach(dom: Rc<D>, selectors: &SelectorSettings, settings: &NavigationSettings) -> Option<Self> {
        let hamburger = dom.query(&selectors.hamburger)?;
        let menu = dom.query(&selectors.nav_menu)?;
        let icon = dom.query(&selectors.hamburger_icon);
        let region = dom.query(&selectors.navbar);
        let links = dom.query_all(&selectors.nav_links);

        let controller = Self {
            dom,
            settings: settings.clone(),
            hamburger,
            icon,
            menu,
            region,
            links,
            state: MenuState::Closed,
        };
        controller.render();
        Some(controller)
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_link(&self, element: &D::Element) -> bool {
        self.links.contains(element)
    }

    pub fn toggle(&mut self) -> MenuState {
        self.state = self.state.toggled();
        self.render();
        self.state
    }

    /// Idempotent.
    pub fn close(&mut self) {
        self.state = MenuState::Closed;
        self.render();
    }

    pub fn on_link_click(&mut self) {
        if self.state.is_open() {
            self.close();
        }
    }

    pub fn on_document_click(&mut self, target: &D::Element) {
        if self.state.is_open() && !self.is_inside(target) {
            log::debug!("Click outside navigation, closing menu");
            self.close();
        }
    }

    pub fn on_resize(&mut self, viewport_width: f64) {
        if viewport_width > self.settings.desktop_breakpoint && self.state.is_open() {
            log::debug!("Viewport widened to {}px, closing menu", viewport_width);
            self.close();
        }
    }

    fn is_inside(&self, target: &D::Element) -> bool {
        match &self.region {
            Some(region) => self.dom.contains(region, target),
            None => {
                self.dom.contains(&self.hamburger, target) || self.dom.contains(&self.menu, target)
            }
        }
    }

    fn render(&self) {
        let open = self.state.is_open();
        let class = &self.settings.active_class;
        for element in [&self.menu, &self.hamburger] {
            if open {
                self.dom.add_class(element, class);
            } else {
                self.dom.remove_class(element, class);
            }
        }

        self.dom
            .set_attribute(&self.hamburger, "aria-expanded", if open { "true" } else { "false" });
        let label = if open {
            &self.settings.label_open
        } else {
            &self.settings.label_closed
        };
        self.dom.set_attribute(&self.hamburger, "aria-label", label);

        if let Some(icon) = &self.icon {
            let glyph = if open {
                &self.settings.icon_open
            } else {
                &self.settings.icon_closed
            };
            self.dom.set_class_name(icon, glyph);
        }
    }
}

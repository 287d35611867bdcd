//! Scroll-driven effects: active-link highlighting, navbar backdrop and hero
//! parallax.
//!
//! Scroll events arrive far more often than the page repaints, so
//! [`ScrollTracker::on_scroll`] only queues a pass for the next animation
//! frame; further scroll events before that frame are absorbed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::app::domain::section::{SectionBounds, find_active, link_target};
use crate::app::domain::settings::{NavigationSettings, ScrollSettings, SelectorSettings};
use crate::app::infrastructure::dom::Dom;
use crate::app::infrastructure::scheduler::Scheduler;

struct ScrollState<D: Dom> {
    dom: Rc<D>,
    settings: ScrollSettings,
    active_class: String,
    parallax_enabled: bool,
    sections: Vec<D::Element>,
    /// Navigation links paired with the section id they point at
    links: Vec<(D::Element, String)>,
    navbar: Option<D::Element>,
    hero: Option<D::Element>,
    active: Option<String>,
    frame_pending: bool,
    passes: usize,
}

impl<D: Dom> ScrollState<D> {
    fn update(&mut self) {
        self.frame_pending = false;
        self.passes += 1;

        let y = self.dom.scroll_y();
        self.highlight(y);
        self.update_navbar(y);
        if self.parallax_enabled {
            self.update_parallax(y);
        }
    }

    fn highlight(&mut self, y: f64) {
        if self.links.is_empty() {
            return;
        }

        let bounds: Vec<SectionBounds> = self
            .sections
            .iter()
            .filter_map(|s| {
                let id = self.dom.attribute(s, "id")?;
                Some(SectionBounds::new(id, self.dom.offset_top(s), self.dom.offset_height(s)))
            })
            .collect();

        // Between or past the sections the last highlight stays
        let Some(active) = find_active(&bounds, y + self.settings.probe_offset).map(|s| s.id.clone()) else {
            return;
        };
        if self.active.as_deref() != Some(active.as_str()) {
            log::debug!("Active section: {}", active);
        }

        for (link, target) in &self.links {
            if *target == active {
                self.dom.add_class(link, &self.active_class);
            } else {
                self.dom.remove_class(link, &self.active_class);
            }
        }
        self.active = Some(active);
    }

    fn update_navbar(&self, y: f64) {
        let Some(navbar) = &self.navbar else {
            return;
        };
        if y > self.settings.navbar_threshold {
            self.dom.add_class(navbar, &self.settings.navbar_scrolled_class);
            self.dom.set_style(navbar, "backdrop-filter", &self.settings.navbar_blur);
        } else {
            self.dom.remove_class(navbar, &self.settings.navbar_scrolled_class);
            self.dom.set_style(navbar, "backdrop-filter", "none");
        }
    }

    fn update_parallax(&self, y: f64) {
        let Some(hero) = &self.hero else {
            return;
        };
        // Past the first screen the hero is out of sight, leave it where it is
        if y < self.dom.viewport_height() {
            let offset = y * self.settings.parallax_factor;
            self.dom.set_style(hero, "transform", &format!("translateY({}px)", offset));
        }
    }
}

pub struct ScrollTracker<D: Dom> {
    state: Rc<RefCell<ScrollState<D>>>,
    scheduler: Rc<dyn Scheduler>,
}

impl<D: Dom> ScrollTracker<D> {
    /// None when the page has nothing scroll-dependent: no linked sections,
    /// no navbar and no hero.
    pub fn attach(
        dom: Rc<D>,
        scheduler: Rc<dyn Scheduler>,
        selectors: &SelectorSettings,
        navigation: &NavigationSettings,
        settings: &ScrollSettings,
        parallax_enabled: bool,
    ) -> Option<Self> {
        let sections = dom.query_all(&selectors.sections);
        let links: Vec<(D::Element, String)> = dom
            .query_all(&selectors.nav_links)
            .into_iter()
            .filter_map(|link| {
                let href = dom.attribute(&link, "href")?;
                let target = link_target(&href)?.to_string();
                Some((link, target))
            })
            .collect();
        let navbar = dom.query(&selectors.navbar);
        let hero = if parallax_enabled {
            dom.query(&selectors.hero)
        } else {
            None
        };

        let tracks_sections = !sections.is_empty() && !links.is_empty();
        if !tracks_sections && navbar.is_none() && hero.is_none() {
            return None;
        }

        Some(Self {
            state: Rc::new(RefCell::new(ScrollState {
                dom,
                settings: settings.clone(),
                active_class: navigation.active_class.clone(),
                parallax_enabled,
                sections,
                links,
                navbar,
                hero,
                active: None,
                frame_pending: false,
                passes: 0,
            })),
            scheduler,
        })
    }

    /// Queue an update for the next frame unless one is already queued.
    pub fn on_scroll(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.frame_pending {
                return;
            }
            state.frame_pending = true;
        }

        let weak: Weak<RefCell<ScrollState<D>>> = Rc::downgrade(&self.state);
        self.scheduler.request_animation_frame(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().update();
            }
        }));
    }

    /// Run a pass right away, used once at startup.
    pub fn update_now(&self) {
        self.state.borrow_mut().update();
    }

    pub fn active_section(&self) -> Option<String> {
        self.state.borrow().active.clone()
    }

    /// Number of update passes run so far.
    pub fn passes(&self) -> usize {
        self.state.borrow().passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::memory::{MemoryDocument, MemoryElement};
    use crate::app::infrastructure::scheduler::ManualScheduler;

    struct Page {
        doc: Rc<MemoryDocument>,
        scheduler: Rc<ManualScheduler>,
        links: Vec<MemoryElement>,
        navbar: MemoryElement,
        hero: MemoryElement,
    }

    /// home 0..600, about 600..1000, projects 1000..1800
    fn page() -> Page {
        let doc = Rc::new(MemoryDocument::new());
        let navbar = doc.insert("nav", &[".navbar"]);
        let mut links = Vec::new();
        for (id, top, height) in [("home", 0.0, 600.0), ("about", 600.0, 400.0), ("projects", 1000.0, 800.0)] {
            let link = doc.insert_child(navbar, "a", &[".navbar-menu a"]);
            doc.set_attribute(&link, "href", &format!("#{}", id));
            links.push(link);

            let section = doc.insert("section", &["section[id]"]);
            doc.set_attribute(&section, "id", id);
            doc.set_geometry(section, top, height);
        }
        let hero = doc.insert("div", &["#home"]);
        Page {
            doc,
            scheduler: Rc::new(ManualScheduler::new()),
            links,
            navbar,
            hero,
        }
    }

    fn tracker(p: &Page) -> ScrollTracker<MemoryDocument> {
        ScrollTracker::attach(
            p.doc.clone(),
            p.scheduler.clone(),
            &SelectorSettings::default(),
            &NavigationSettings::default(),
            &ScrollSettings::default(),
            true,
        )
        .unwrap()
    }

    fn active_links(p: &Page) -> Vec<usize> {
        p.links
            .iter()
            .enumerate()
            .filter(|(_, l)| p.doc.has_class(l, "active"))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_exactly_one_link_active_inside_section() {
        let p = page();
        let tracker = tracker(&p);

        // 550 + 100 probe lands in "about"
        p.doc.set_scroll_y(550.0);
        tracker.update_now();
        assert_eq!(active_links(&p), vec![1]);
        assert_eq!(tracker.active_section().as_deref(), Some("about"));

        p.doc.set_scroll_y(1200.0);
        tracker.update_now();
        assert_eq!(active_links(&p), vec![2]);
    }

    #[test]
    fn test_above_all_sections_marks_none() {
        let p = page();
        for section in p.doc.query_all("section[id]") {
            let top = p.doc.offset_top(&section);
            let height = p.doc.offset_height(&section);
            p.doc.set_geometry(section, top + 300.0, height);
        }
        let tracker = tracker(&p);

        // Probe at 100 lands above "home", which now starts at 300
        tracker.update_now();
        assert!(active_links(&p).is_empty());
        assert_eq!(tracker.active_section(), None);
    }

    #[test]
    fn test_highlight_kept_below_last_section() {
        let p = page();
        let tracker = tracker(&p);

        p.doc.set_scroll_y(1200.0);
        tracker.update_now();
        assert_eq!(active_links(&p), vec![2]);

        // 1800 + 100 probe is in the footer, past every section
        p.doc.set_scroll_y(1800.0);
        tracker.update_now();
        assert_eq!(active_links(&p), vec![2]);
        assert_eq!(tracker.active_section().as_deref(), Some("projects"));
    }

    #[test]
    fn test_scroll_events_coalesce_per_frame() {
        let p = page();
        let tracker = tracker(&p);

        // Only the last offset counts: 950 + 100 probe is in "projects"
        for y in [10.0, 20.0, 950.0] {
            p.doc.set_scroll_y(y);
            tracker.on_scroll();
        }
        assert_eq!(tracker.passes(), 0);
        assert_eq!(p.scheduler.pending_frames(), 1);

        p.scheduler.run_frame();
        assert_eq!(tracker.passes(), 1);
        assert_eq!(tracker.active_section().as_deref(), Some("projects"));

        // A new frame can be requested once the previous one ran
        tracker.on_scroll();
        assert_eq!(p.scheduler.pending_frames(), 1);
    }

    #[test]
    fn test_navbar_backdrop_threshold() {
        let p = page();
        let tracker = tracker(&p);

        p.doc.set_scroll_y(51.0);
        tracker.update_now();
        assert!(p.doc.has_class(&p.navbar, "scrolled"));
        assert_eq!(p.doc.style(p.navbar, "backdrop-filter").as_deref(), Some("blur(10px)"));

        p.doc.set_scroll_y(50.0);
        tracker.update_now();
        assert!(!p.doc.has_class(&p.navbar, "scrolled"));
        assert_eq!(p.doc.style(p.navbar, "backdrop-filter").as_deref(), Some("none"));
    }

    #[test]
    fn test_parallax_only_within_first_viewport() {
        let p = page();
        p.doc.set_viewport(1280.0, 800.0);
        let tracker = tracker(&p);

        p.doc.set_scroll_y(100.0);
        tracker.update_now();
        assert_eq!(p.doc.style(p.hero, "transform").as_deref(), Some("translateY(20px)"));

        p.doc.set_scroll_y(900.0);
        tracker.update_now();
        assert_eq!(p.doc.style(p.hero, "transform").as_deref(), Some("translateY(20px)"));
    }

    #[test]
    fn test_attach_on_empty_page() {
        let doc = Rc::new(MemoryDocument::new());
        let tracker = ScrollTracker::attach(
            doc,
            Rc::new(ManualScheduler::new()),
            &SelectorSettings::default(),
            &NavigationSettings::default(),
            &ScrollSettings::default(),
            true,
        );
        assert!(tracker.is_none());
    }
}

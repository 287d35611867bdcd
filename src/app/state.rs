use std::rc::Rc;

use super::controllers::{
    NavigationController, RevealAnimator, ScrollTracker, SmoothScroller, ThemeManager, TypewriterTask,
};
use super::domain::messages::{EventResponse, UiEvent};
use super::domain::settings::UiSettings;
use super::domain::typewriter::Typewriter;
use super::infrastructure::dom::Dom;
use super::infrastructure::scheduler::Scheduler;
use super::infrastructure::storage::PreferenceStore;
use super::infrastructure::visibility::VisibilityWatcher;
use super::services::{ContactTracker, DownloadNotice, LazyImageLoader};

/// Everything the page host hands to the coordinator.
pub struct Collaborators<D: Dom> {
    pub dom: Rc<D>,
    /// None when the host has no durable storage; the theme then starts light
    pub store: Option<Rc<dyn PreferenceStore>>,
    pub scheduler: Rc<dyn Scheduler>,
    pub visibility: Rc<dyn VisibilityWatcher<D::Element>>,
}

/// Composition root for the page behaviors.
///
/// Each behavior attaches only when its elements exist; a missing element
/// leaves that behavior inactive and every event meant for it is ignored.
pub struct UiStateCoordinator<D: Dom> {
    pub dom: Rc<D>,
    pub settings: UiSettings,
    pub theme: Option<ThemeManager<D>>,
    pub navigation: Option<NavigationController<D>>,
    pub scroll: Option<ScrollTracker<D>>,
    pub smooth_scroll: SmoothScroller<D>,
    pub reveal: Option<RevealAnimator>,
    pub lazy_images: Option<LazyImageLoader>,
    pub typewriter: Option<TypewriterTask<D>>,
    pub notice: DownloadNotice<D>,
    pub contacts: ContactTracker,
}

impl<D: Dom> UiStateCoordinator<D> {
    /// Wire every behavior. Runs once the DOM is parsed.
    pub fn start(collaborators: Collaborators<D>, settings: UiSettings) -> Self {
        let Collaborators {
            dom,
            store,
            scheduler,
            visibility,
        } = collaborators;
        let selectors = &settings.selectors;

        let mut theme = ThemeManager::attach(dom.clone(), store, selectors, &settings.theme);
        if let Some(theme) = theme.as_mut() {
            theme.restore();
        }

        let navigation = NavigationController::attach(dom.clone(), selectors, &settings.navigation);

        let scroll = ScrollTracker::attach(
            dom.clone(),
            scheduler.clone(),
            selectors,
            &settings.navigation,
            &settings.scroll,
            settings.parallax_enabled,
        );
        if let Some(scroll) = &scroll {
            scroll.update_now();
        }

        let reveal = RevealAnimator::attach(dom.clone(), visibility.as_ref(), &selectors.reveal, &settings.reveal);
        let lazy_images = LazyImageLoader::attach(dom.clone(), visibility.as_ref(), &selectors.lazy_images);

        let typewriter = if settings.typewriter_enabled {
            start_typewriter(&dom, &scheduler, &settings)
        } else {
            None
        };

        let smooth_scroll = SmoothScroller::new(dom.clone(), settings.scroll.header_offset);
        let notice = DownloadNotice::new(dom.clone(), scheduler, &settings.notice);

        if let Some(body) = dom.body() {
            dom.add_class(&body, &settings.loaded_class);
        }

        let coordinator = Self {
            dom,
            settings,
            theme,
            navigation,
            scroll,
            smooth_scroll,
            reveal,
            lazy_images,
            typewriter,
            notice,
            contacts: ContactTracker::new(),
        };
        log::info!("Portfolio UI initialized ({})", coordinator.summary());
        coordinator
    }

    pub fn handle(&mut self, event: UiEvent<D::Element>) -> EventResponse {
        match event {
            UiEvent::ThemeToggleClicked => {
                if let Some(theme) = self.theme.as_mut() {
                    theme.toggle();
                }
            }
            UiEvent::HamburgerClicked => {
                if let Some(nav) = self.navigation.as_mut() {
                    nav.toggle();
                }
            }
            UiEvent::LinkClicked(link) => {
                if let Some(nav) = self.navigation.as_mut()
                    && nav.is_link(&link)
                {
                    nav.on_link_click();
                }
                return self.smooth_scroll.on_link_click(&link);
            }
            UiEvent::DocumentClicked(target) => {
                if let Some(nav) = self.navigation.as_mut() {
                    nav.on_document_click(&target);
                }
            }
            UiEvent::Scrolled => {
                if let Some(scroll) = &self.scroll {
                    scroll.on_scroll();
                }
            }
            UiEvent::Resized => {
                let width = self.dom.viewport_width();
                log::debug!("Window resized to {}px", width);
                if let Some(nav) = self.navigation.as_mut() {
                    nav.on_resize(width);
                }
            }
            UiEvent::VisibilityChanged { hidden } => {
                log::debug!("Page {}", if hidden { "hidden" } else { "visible" });
            }
            UiEvent::DownloadClicked => {
                log::info!("CV download initiated");
                self.notice.show();
            }
            UiEvent::ContactClicked(button) => {
                let href = self.dom.attribute(&button, "href");
                self.contacts.record(href.as_deref());
            }
        }
        EventResponse::Default
    }

    /// Cancel every outstanding timer. The page stays as it is.
    pub fn shutdown(&mut self) {
        if let Some(typewriter) = self.typewriter.take() {
            typewriter.cancel();
        }
        self.notice.cancel_all();
        log::debug!("Portfolio UI shut down");
    }

    fn summary(&self) -> String {
        let parts = [
            ("theme", self.theme.is_some()),
            ("navigation", self.navigation.is_some()),
            ("scroll", self.scroll.is_some()),
            ("reveal", self.reveal.is_some()),
            ("lazy-images", self.lazy_images.is_some()),
            ("typewriter", self.typewriter.is_some()),
        ];
        parts
            .iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn start_typewriter<D: Dom>(
    dom: &Rc<D>,
    scheduler: &Rc<dyn Scheduler>,
    settings: &UiSettings,
) -> Option<TypewriterTask<D>> {
    let element = dom.query(&settings.selectors.typewriter)?;
    let Some(machine) = Typewriter::new(&settings.typewriter.texts, settings.typewriter.timings()) else {
        log::debug!("Typewriter has no texts, not starting");
        return None;
    };
    Some(TypewriterTask::start(dom.clone(), scheduler.clone(), element, machine))
}

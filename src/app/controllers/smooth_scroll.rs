use std::rc::Rc;

use crate::app::domain::messages::EventResponse;
use crate::app::domain::section::link_target;
use crate::app::infrastructure::dom::Dom;

/// In-page anchor navigation that leaves room for the fixed navbar.
pub struct SmoothScroller<D: Dom> {
    dom: Rc<D>,
    header_offset: f64,
}

impl<D: Dom> SmoothScroller<D> {
    pub fn new(dom: Rc<D>, header_offset: f64) -> Self {
        Self { dom, header_offset }
    }

    /// Scrolls to the section a `#id` link points at. Any `#` link has its
    /// default jump suppressed, even when the target does not exist.
    pub fn on_link_click(&self, link: &D::Element) -> EventResponse {
        let Some(href) = self.dom.attribute(link, "href") else {
            return EventResponse::Default;
        };
        if !href.starts_with('#') {
            return EventResponse::Default;
        }

        match link_target(&href).and_then(|id| self.dom.element_by_id(id)) {
            Some(target) => {
                let top = self.dom.offset_top(&target) - self.header_offset;
                self.dom.scroll_to(top);
            }
            None => log::debug!("No scroll target for {}", href),
        }
        EventResponse::PreventDefault
    }
}

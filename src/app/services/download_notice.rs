use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::app::domain::settings::NoticeSettings;
use crate::app::infrastructure::dom::Dom;
use crate::app::infrastructure::scheduler::{Scheduler, TimerId};

const TOAST_STYLE: &str = "position: fixed; top: 100px; right: 20px; background: #4CAF50; \
     color: white; padding: 10px 20px; border-radius: 8px; z-index: 10000; font-weight: 500; \
     box-shadow: 0 4px 8px rgba(0,0,0,0.15); transform: translateX(100%); \
     transition: transform 0.3s ease;";

/// Transient "download started" toast.
pub struct DownloadNotice<D: Dom> {
    dom: Rc<D>,
    scheduler: Rc<dyn Scheduler>,
    settings: NoticeSettings,
    timers: Rc<RefCell<Vec<TimerId>>>,
}

impl<D: Dom> DownloadNotice<D> {
    pub fn new(dom: Rc<D>, scheduler: Rc<dyn Scheduler>, settings: &NoticeSettings) -> Self {
        Self {
            dom,
            scheduler,
            settings: settings.clone(),
            timers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Slides a toast in, holds it, slides it out and removes it.
    pub fn show(&self) -> Option<D::Element> {
        let toast = self.dom.create_element("div")?;
        self.dom.set_attribute(&toast, "style", TOAST_STYLE);
        self.dom.set_text(&toast, &self.settings.message);
        self.dom.append_to_body(&toast);

        let slide_in = Duration::from_millis(self.settings.slide_in_ms);
        let slide_out = Duration::from_millis(self.settings.visible_ms);
        let removal = slide_out + Duration::from_millis(self.settings.slide_out_ms);

        let ids = [
            self.schedule_style(&toast, slide_in, "translateX(0)"),
            self.schedule_style(&toast, slide_out, "translateX(100%)"),
            self.schedule(removal, {
                let dom = self.dom.clone();
                let toast = toast.clone();
                move || dom.remove(&toast)
            }),
        ];

        let mut timers = self.timers.borrow_mut();
        timers.extend(ids);
        Some(toast)
    }

    /// Clears every toast timer that has not fired yet.
    pub fn cancel_all(&self) {
        for id in self.timers.borrow_mut().drain(..) {
            self.scheduler.clear_timeout(id);
        }
    }

    fn schedule_style(&self, toast: &D::Element, delay: Duration, transform: &'static str) -> TimerId {
        let dom = self.dom.clone();
        let toast = toast.clone();
        self.schedule(delay, move || dom.set_style(&toast, "transform", transform))
    }

    fn schedule(&self, delay: Duration, action: impl FnOnce() + 'static) -> TimerId {
        let timers = Rc::downgrade(&self.timers);
        let slot: Rc<RefCell<Option<TimerId>>> = Rc::new(RefCell::new(None));
        let own_id = slot.clone();
        let id = self.scheduler.set_timeout(
            delay,
            Box::new(move || {
                action();
                // Forget the id once fired so the list only holds live timers
                if let (Some(timers), Some(id)) = (timers.upgrade(), *own_id.borrow()) {
                    timers.borrow_mut().retain(|t| *t != id);
                }
            }),
        );
        *slot.borrow_mut() = Some(id);
        id
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }
}

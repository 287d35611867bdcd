use std::cell::Cell;
use std::rc::Rc;

use crate::app::domain::settings::RevealSettings;
use crate::app::infrastructure::dom::Dom;
use crate::app::infrastructure::visibility::{VisibilityWatcher, WatchDecision};

/// One-shot fade-in of elements as they scroll into view.
pub struct RevealAnimator {
    watched: usize,
    revealed: Rc<Cell<usize>>,
}

impl RevealAnimator {
    /// Hides every matching element and watches for it to appear. Without a
    /// visibility primitive, or when watching fails, the elements are shown
    /// right away instead.
    /// None when nothing matches `selector`.
    pub fn attach<D: Dom>(
        dom: Rc<D>,
        visibility: &dyn VisibilityWatcher<D::Element>,
        selector: &str,
        settings: &RevealSettings,
    ) -> Option<Self> {
        let elements = dom.query_all(selector);
        if elements.is_empty() {
            return None;
        }

        if !visibility.is_available() {
            log::debug!("No visibility watcher, showing {} elements", elements.len());
            return Some(Self::show_all(&*dom, &elements, settings));
        }

        for element in &elements {
            dom.set_style(element, "opacity", "0");
            dom.set_style(element, "transform", &format!("translateY({}px)", settings.offset));
            dom.set_style(element, "transition", &settings.transition);
        }

        let watched = elements.len();
        let revealed = Rc::new(Cell::new(0));
        let counter = revealed.clone();
        let reveal_settings = settings.clone();
        let on_enter_dom = dom.clone();
        let result = visibility.watch(
            elements.clone(),
            settings.watch_options(),
            Box::new(move |element: &D::Element| {
                show(&*on_enter_dom, element, &reveal_settings);
                counter.set(counter.get() + 1);
                // Never hidden again, so there is nothing left to watch for
                WatchDecision::Unwatch
            }),
        );

        if let Err(e) = result {
            log::warn!("Reveal watch failed, showing {} elements: {}", elements.len(), e);
            return Some(Self::show_all(&*dom, &elements, settings));
        }

        Some(Self { watched, revealed })
    }

    fn show_all<D: Dom>(dom: &D, elements: &[D::Element], settings: &RevealSettings) -> Self {
        for element in elements {
            show(dom, element, settings);
        }
        Self {
            watched: 0,
            revealed: Rc::new(Cell::new(elements.len())),
        }
    }

    /// Elements still waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.watched.saturating_sub(self.revealed.get())
    }

    pub fn revealed(&self) -> usize {
        self.revealed.get()
    }
}

fn show<D: Dom>(dom: &D, element: &D::Element, settings: &RevealSettings) {
    dom.set_style(element, "opacity", "1");
    dom.set_style(element, "transform", "translateY(0)");
    dom.add_class(element, &settings.visible_class);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::memory::{MemoryDocument, MemoryElement};
    use crate::app::infrastructure::visibility::MemoryVisibility;

    const SELECTOR: &str = ".fade-in";

    fn page() -> (Rc<MemoryDocument>, Vec<MemoryElement>) {
        let doc = Rc::new(MemoryDocument::new());
        let cards = (0..3).map(|_| doc.insert("div", &[SELECTOR])).collect();
        (doc, cards)
    }

    #[test]
    fn test_elements_start_hidden_and_watched() {
        let (doc, cards) = page();
        let visibility = MemoryVisibility::new();
        let reveal = RevealAnimator::attach(doc.clone(), &visibility, SELECTOR, &RevealSettings::default()).unwrap();

        assert_eq!(reveal.pending(), 3);
        for card in &cards {
            assert_eq!(doc.style(*card, "opacity").as_deref(), Some("0"));
            assert_eq!(doc.style(*card, "transform").as_deref(), Some("translateY(30px)"));
            assert!(visibility.is_watched(card));
        }

        let options = visibility.options_for(&cards[0]).unwrap();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn test_reveal_is_one_shot() {
        let (doc, cards) = page();
        let visibility = MemoryVisibility::new();
        let reveal = RevealAnimator::attach(doc.clone(), &visibility, SELECTOR, &RevealSettings::default()).unwrap();

        visibility.enter(&cards[1]);
        assert_eq!(doc.style(cards[1], "opacity").as_deref(), Some("1"));
        assert_eq!(doc.style(cards[1], "transform").as_deref(), Some("translateY(0)"));
        assert!(doc.has_class(&cards[1], "visible"));
        assert!(!visibility.is_watched(&cards[1]));

        // A later report for the same element changes nothing
        visibility.enter(&cards[1]);
        assert_eq!(reveal.revealed(), 1);
        assert_eq!(reveal.pending(), 2);
        assert_eq!(doc.style(cards[0], "opacity").as_deref(), Some("0"));
    }

    #[test]
    fn test_fallback_shows_everything() {
        let (doc, cards) = page();
        let visibility = MemoryVisibility::unavailable();
        let reveal = RevealAnimator::attach(doc.clone(), &visibility, SELECTOR, &RevealSettings::default()).unwrap();

        assert_eq!(reveal.pending(), 0);
        for card in &cards {
            assert_eq!(doc.style(*card, "opacity").as_deref(), Some("1"));
            assert_eq!(doc.style(*card, "transform").as_deref(), Some("translateY(0)"));
        }
    }

    #[test]
    fn test_failed_watch_shows_everything() {
        let (doc, cards) = page();
        let visibility = MemoryVisibility::rejecting();
        let reveal = RevealAnimator::attach(doc.clone(), &visibility, SELECTOR, &RevealSettings::default()).unwrap();

        assert_eq!(reveal.pending(), 0);
        assert_eq!(reveal.revealed(), 3);
        for card in &cards {
            assert_eq!(doc.style(*card, "opacity").as_deref(), Some("1"));
            assert!(doc.has_class(card, "visible"));
            assert!(!visibility.is_watched(card));
        }
    }

    #[test]
    fn test_no_elements_no_animator() {
        let doc = Rc::new(MemoryDocument::new());
        let visibility = MemoryVisibility::new();
        assert!(RevealAnimator::attach(doc, &visibility, SELECTOR, &RevealSettings::default()).is_none());
    }
}

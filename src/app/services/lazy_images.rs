use std::cell::Cell;
use std::rc::Rc;

use crate::app::infrastructure::dom::Dom;
use crate::app::infrastructure::visibility::{VisibilityWatcher, WatchDecision, WatchOptions};

const DATA_SRC: &str = "data-src";

/// Swaps `data-src` into `src` once an image is about to be seen.
pub struct LazyImageLoader {
    loaded: Rc<Cell<usize>>,
}

impl LazyImageLoader {
    /// None when there are no lazy images or they cannot be watched; the
    /// images are then left as they are.
    pub fn attach<D: Dom>(
        dom: Rc<D>,
        visibility: &dyn VisibilityWatcher<D::Element>,
        selector: &str,
    ) -> Option<Self> {
        let images = dom.query_all(selector);
        if images.is_empty() {
            return None;
        }
        if !visibility.is_available() {
            log::debug!("No visibility watcher, {} lazy images stay deferred", images.len());
            return None;
        }

        let loaded = Rc::new(Cell::new(0));
        let counter = loaded.clone();
        let watched = visibility.watch(
            images,
            WatchOptions::default(),
            Box::new(move |image: &D::Element| match dom.attribute(image, DATA_SRC) {
                Some(src) => {
                    dom.set_attribute(image, "src", &src);
                    dom.remove_attribute(image, DATA_SRC);
                    counter.set(counter.get() + 1);
                    WatchDecision::Unwatch
                }
                None => WatchDecision::Keep,
            }),
        );
        if let Err(e) = watched {
            log::warn!("Lazy image watch failed: {}", e);
            return None;
        }

        Some(Self { loaded })
    }

    pub fn loaded(&self) -> usize {
        self.loaded.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::memory::MemoryDocument;
    use crate::app::infrastructure::visibility::MemoryVisibility;

    const SELECTOR: &str = "img[data-src]";

    #[test]
    fn test_src_swapped_on_enter() {
        let doc = Rc::new(MemoryDocument::new());
        let img = doc.insert("img", &[SELECTOR]);
        doc.set_attribute(&img, DATA_SRC, "/assets/project.webp");
        let visibility = MemoryVisibility::new();

        let loader = LazyImageLoader::attach(doc.clone(), &visibility, SELECTOR).unwrap();
        assert_eq!(doc.attribute(&img, "src"), None);

        visibility.enter(&img);
        assert_eq!(doc.attribute(&img, "src").as_deref(), Some("/assets/project.webp"));
        assert_eq!(doc.attribute(&img, DATA_SRC), None);
        assert!(!visibility.is_watched(&img));
        assert_eq!(loader.loaded(), 1);
    }

    #[test]
    fn test_without_watcher_images_untouched() {
        let doc = Rc::new(MemoryDocument::new());
        let img = doc.insert("img", &[SELECTOR]);
        doc.set_attribute(&img, DATA_SRC, "/a.png");
        let visibility = MemoryVisibility::unavailable();

        assert!(LazyImageLoader::attach(doc.clone(), &visibility, SELECTOR).is_none());
        assert_eq!(doc.attribute(&img, "src"), None);
    }
}

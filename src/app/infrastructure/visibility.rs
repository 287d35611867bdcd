//! "Element entered the viewport" notifications.

use std::cell::RefCell;

use super::error::{Result, UiError};

#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Fraction of the element that must be visible, 0.0..=1.0.
    pub threshold: f64,
    /// CSS margin applied to the viewport, e.g. `0px 0px -50px 0px`.
    pub root_margin: String,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchDecision {
    Keep,
    Unwatch,
}

pub type EnterCallback<E> = Box<dyn FnMut(&E) -> WatchDecision>;

pub trait VisibilityWatcher<E> {
    /// False when the platform has no visibility primitive; callers fall back.
    fn is_available(&self) -> bool;

    /// Calls `on_enter` each time one of `targets` enters the viewport,
    /// until the callback answers [`WatchDecision::Unwatch`] for it.
    /// On `Err` nothing is watched and `on_enter` never runs.
    fn watch(&self, targets: Vec<E>, options: WatchOptions, on_enter: EnterCallback<E>) -> Result<()>;
}

struct Watch<E> {
    targets: Vec<E>,
    options: WatchOptions,
    on_enter: EnterCallback<E>,
}

/// Test double: visibility changes only when the test says so.
pub struct MemoryVisibility<E> {
    available: bool,
    rejects_watch: bool,
    watches: RefCell<Vec<Watch<E>>>,
}

impl<E> MemoryVisibility<E> {
    pub fn new() -> Self {
        Self {
            available: true,
            rejects_watch: false,
            watches: RefCell::new(Vec::new()),
        }
    }

    /// A platform without the primitive.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// The primitive exists but refuses every watch, like an observer
    /// constructed with a malformed root margin.
    pub fn rejecting() -> Self {
        Self {
            rejects_watch: true,
            ..Self::new()
        }
    }
}

impl<E> Default for MemoryVisibility<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PartialEq> MemoryVisibility<E> {
    pub fn is_watched(&self, element: &E) -> bool {
        self.watches
            .borrow()
            .iter()
            .any(|w| w.targets.contains(element))
    }

    /// Options of the first watch covering `element`.
    pub fn options_for(&self, element: &E) -> Option<WatchOptions> {
        self.watches
            .borrow()
            .iter()
            .find(|w| w.targets.contains(element))
            .map(|w| w.options.clone())
    }

    /// Report `element` as having entered the viewport.
    pub fn enter(&self, element: &E) {
        let mut watches = std::mem::take(&mut *self.watches.borrow_mut());
        for watch in watches.iter_mut() {
            if let Some(pos) = watch.targets.iter().position(|t| t == element)
                && (watch.on_enter)(element) == WatchDecision::Unwatch
            {
                watch.targets.remove(pos);
            }
        }
        watches.retain(|w| !w.targets.is_empty());

        let mut slot = self.watches.borrow_mut();
        // Watches registered from inside a callback go after the existing ones
        watches.append(&mut slot);
        *slot = watches;
    }
}

impl<E: PartialEq> VisibilityWatcher<E> for MemoryVisibility<E> {
    fn is_available(&self) -> bool {
        self.available
    }

    fn watch(&self, targets: Vec<E>, options: WatchOptions, on_enter: EnterCallback<E>) -> Result<()> {
        if !self.available {
            return Err(UiError::Platform("no visibility watcher".to_string()));
        }
        if self.rejects_watch {
            return Err(UiError::Platform(format!("watch rejected, root margin {:?}", options.root_margin)));
        }
        if !targets.is_empty() {
            self.watches.borrow_mut().push(Watch {
                targets,
                options,
                on_enter,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_unwatch_stops_notifications() {
        let visibility = MemoryVisibility::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        visibility
            .watch(
                vec![1, 2],
                WatchOptions::default(),
                Box::new(move |_: &i32| {
                    *counter.borrow_mut() += 1;
                    WatchDecision::Unwatch
                }),
            )
            .unwrap();

        visibility.enter(&1);
        visibility.enter(&1);
        assert_eq!(*hits.borrow(), 1);
        assert!(!visibility.is_watched(&1));
        assert!(visibility.is_watched(&2));
    }

    #[test]
    fn test_keep_continues_notifications() {
        let visibility = MemoryVisibility::new();
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        visibility
            .watch(
                vec!["img"],
                WatchOptions::default(),
                Box::new(move |_: &&str| {
                    *counter.borrow_mut() += 1;
                    WatchDecision::Keep
                }),
            )
            .unwrap();

        visibility.enter(&"img");
        visibility.enter(&"img");
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_unavailable_rejects_watch() {
        let visibility = MemoryVisibility::<u8>::unavailable();
        assert!(!visibility.is_available());
        let result = visibility.watch(vec![1], WatchOptions::default(), Box::new(|_: &u8| WatchDecision::Keep));
        assert!(result.is_err());
        assert!(!visibility.is_watched(&1));
    }

    #[test]
    fn test_rejecting_watcher_reports_error() {
        let visibility = MemoryVisibility::<u8>::rejecting();
        assert!(visibility.is_available());
        let result = visibility.watch(vec![1], WatchOptions::default(), Box::new(|_: &u8| WatchDecision::Keep));
        assert!(matches!(result, Err(UiError::Platform(_))));
        assert!(!visibility.is_watched(&1));
    }
}

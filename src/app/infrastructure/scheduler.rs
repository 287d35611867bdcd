//! Timer and animation-frame continuations.
//!
//! Controllers never sleep; they hand a callback to a [`Scheduler`] and return.
//! The browser backend maps these onto `setTimeout` / `requestAnimationFrame`,
//! while [`ManualScheduler`] runs them on a virtual clock for tests.

use std::cell::RefCell;
use std::time::Duration;

pub type Callback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

pub trait Scheduler {
    fn set_timeout(&self, delay: Duration, callback: Callback) -> TimerId;
    /// Cancelling a timer that already fired is a no-op.
    fn clear_timeout(&self, id: TimerId);
    fn request_animation_frame(&self, callback: Callback);
}

struct PendingTimer {
    id: TimerId,
    due: Duration,
    callback: Callback,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    timers: Vec<PendingTimer>,
    frames: Vec<Callback>,
}

/// Virtual-clock scheduler. Nothing runs until the test advances it.
#[derive(Default)]
pub struct ManualScheduler {
    inner: RefCell<ManualInner>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &inner.now)
            .field("pending_timers", &inner.timers.len())
            .field("pending_frames", &inner.frames.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    /// Fire the earliest pending timer, moving the clock to its due time.
    /// Returns false when nothing is pending.
    pub fn run_next(&self) -> bool {
        let next = {
            let mut inner = self.inner.borrow_mut();
            let earliest = inner
                .timers
                .iter()
                .enumerate()
                .min_by_key(|(_, t)| (t.due, t.id.0))
                .map(|(i, _)| i);
            match earliest {
                Some(index) => {
                    let timer = inner.timers.remove(index);
                    inner.now = inner.now.max(timer.due);
                    Some(timer.callback)
                }
                None => None,
            }
        };

        match next {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Move the clock forward, firing every timer that falls due on the way
    /// (including timers scheduled by those callbacks).
    ///
    /// A chain of zero-delay timers never lets the clock move; drive those
    /// with [`run_next`](Self::run_next) instead.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let due_soon = self.inner.borrow().timers.iter().any(|t| t.due <= target);
            if !due_soon || !self.run_next() {
                break;
            }
        }
        let mut inner = self.inner.borrow_mut();
        inner.now = inner.now.max(target);
    }

    /// Run every queued animation-frame callback once. Callbacks queued while
    /// running wait for the next frame, as in a browser.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut self.inner.borrow_mut().frames);
        let count = frames.len();
        for callback in frames {
            callback();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, callback: Callback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = TimerId(inner.next_id);
        let due = inner.now + delay;
        inner.timers.push(PendingTimer { id, due, callback });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.inner.borrow_mut().timers.retain(|t| t.id != id);
    }

    fn request_animation_frame(&self, callback: Callback) {
        self.inner.borrow_mut().frames.push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_advance_fires_in_due_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (label, ms) in [("slow", 300), ("fast", 100), ("mid", 200)] {
            let log = log.clone();
            scheduler.set_timeout(
                Duration::from_millis(ms),
                Box::new(move || log.borrow_mut().push(label)),
            );
        }

        scheduler.advance(Duration::from_millis(250));
        assert_eq!(*log.borrow(), vec!["fast", "mid"]);
        assert_eq!(scheduler.now(), Duration::from_millis(250));
        assert_eq!(scheduler.pending_timers(), 1);
    }

    #[test]
    fn test_clear_timeout_prevents_callback() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(RefCell::new(false));
        let flag = fired.clone();
        let id = scheduler.set_timeout(Duration::from_millis(10), Box::new(move || *flag.borrow_mut() = true));

        scheduler.clear_timeout(id);
        scheduler.advance(Duration::from_secs(1));
        assert!(!*fired.borrow());
    }

    #[test]
    fn test_frame_callbacks_queued_while_running_wait() {
        let scheduler = Rc::new(ManualScheduler::new());
        let inner = scheduler.clone();
        scheduler.request_animation_frame(Box::new(move || {
            inner.request_animation_frame(Box::new(|| {}));
        }));

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(scheduler.pending_frames(), 1);
    }
}

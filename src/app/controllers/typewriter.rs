use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::app::domain::typewriter::{Typewriter, TypewriterPhase, TypewriterState};
use crate::app::infrastructure::dom::Dom;
use crate::app::infrastructure::scheduler::{Scheduler, TimerId};

struct TaskInner<D: Dom> {
    dom: Rc<D>,
    element: D::Element,
    machine: Typewriter,
    scheduler: Rc<dyn Scheduler>,
    pending: Option<TimerId>,
    cancelled: bool,
}

/// Drives a [`Typewriter`] on the scheduler until cancelled or dropped.
pub struct TypewriterTask<D: Dom> {
    inner: Rc<RefCell<TaskInner<D>>>,
}

impl<D: Dom> TypewriterTask<D> {
    /// Renders the first character immediately, then keeps rescheduling itself.
    pub fn start(dom: Rc<D>, scheduler: Rc<dyn Scheduler>, element: D::Element, machine: Typewriter) -> Self {
        let inner = Rc::new(RefCell::new(TaskInner {
            dom,
            element,
            machine,
            scheduler,
            pending: None,
            cancelled: false,
        }));
        step(&inner);
        Self { inner }
    }

    /// Stops the loop and clears the outstanding timer. Safe to call twice.
    pub fn cancel(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.cancelled = true;
        if let Some(id) = inner.pending.take() {
            inner.scheduler.clear_timeout(id);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.inner.borrow().cancelled
    }

    pub fn state(&self) -> TypewriterState {
        self.inner.borrow().machine.state()
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.inner.borrow().machine.phase()
    }
}

impl<D: Dom> Drop for TypewriterTask<D> {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn step<D: Dom>(inner: &Rc<RefCell<TaskInner<D>>>) {
    let mut task = inner.borrow_mut();
    if task.cancelled {
        return;
    }

    let tick = task.machine.tick();
    task.dom.set_text(&task.element, &tick.text);

    let weak: Weak<RefCell<TaskInner<D>>> = Rc::downgrade(inner);
    let id = task.scheduler.set_timeout(
        tick.delay,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().pending = None;
                step(&inner);
            }
        }),
    );
    task.pending = Some(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::typewriter::TypewriterTimings;
    use crate::app::infrastructure::memory::{MemoryDocument, MemoryElement};
    use crate::app::infrastructure::scheduler::ManualScheduler;
    use std::time::Duration;

    fn setup(texts: &[&str], timings: TypewriterTimings) -> (Rc<MemoryDocument>, Rc<ManualScheduler>, MemoryElement, TypewriterTask<MemoryDocument>) {
        let doc = Rc::new(MemoryDocument::new());
        let subtitle = doc.insert("p", &[".hero-subtitle"]);
        let scheduler = Rc::new(ManualScheduler::new());
        let machine = Typewriter::new(texts.iter().copied(), timings).unwrap();
        let task = TypewriterTask::start(doc.clone(), scheduler.clone(), subtitle, machine);
        (doc, scheduler, subtitle, task)
    }

    fn instant() -> TypewriterTimings {
        TypewriterTimings {
            type_speed: Duration::ZERO,
            delete_speed: Duration::ZERO,
            pause_time: Duration::ZERO,
        }
    }

    #[test]
    fn test_two_cycles_return_to_first_string() {
        let (doc, scheduler, subtitle, task) = setup(&["A", "BB"], instant());
        assert_eq!(doc.text(subtitle), "A");

        // One cycle types and deletes both strings: 6 ticks, one already ran
        for _ in 0..(2 * 6 - 1) {
            assert!(scheduler.run_next());
        }
        assert_eq!(doc.text(subtitle), "");
        assert_eq!(
            task.state(),
            TypewriterState {
                text_index: 0,
                char_count: 0,
                deleting: false
            }
        );
        assert_eq!(task.phase(), TypewriterPhase::Typing);

        scheduler.run_next();
        assert_eq!(doc.text(subtitle), "A");
    }

    #[test]
    fn test_real_timings_on_virtual_clock() {
        let (doc, scheduler, subtitle, _task) = setup(&["Hola"], TypewriterTimings::default());
        assert_eq!(doc.text(subtitle), "H");

        scheduler.advance(Duration::from_millis(300));
        assert_eq!(doc.text(subtitle), "Hola");

        // Still pausing 1.9s later
        scheduler.advance(Duration::from_millis(1900));
        assert_eq!(doc.text(subtitle), "Hola");

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(doc.text(subtitle), "Hol");

        scheduler.advance(Duration::from_millis(150));
        assert_eq!(doc.text(subtitle), "");
    }

    #[test]
    fn test_cancel_leaves_no_pending_timers() {
        let (doc, scheduler, subtitle, task) = setup(&["abc"], TypewriterTimings::default());
        assert_eq!(scheduler.pending_timers(), 1);

        task.cancel();
        task.cancel();
        assert!(!task.is_running());
        assert_eq!(scheduler.pending_timers(), 0);

        scheduler.advance(Duration::from_secs(10));
        assert_eq!(doc.text(subtitle), "a");
    }

    #[test]
    fn test_drop_cancels() {
        let (_doc, scheduler, _subtitle, task) = setup(&["abc"], TypewriterTimings::default());
        drop(task);
        assert_eq!(scheduler.pending_timers(), 0);
    }
}

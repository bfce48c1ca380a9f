//! Deferred execution on the login thread
//!
//! Cache hits are delivered on a later tick, never inside the caller's
//! `login` frame, so callers see the same timing whether or not the popup
//! was needed.

use std::cell::RefCell;
use std::collections::VecDeque;

/// A unit of work to run on a later tick.
pub type Task = Box<dyn FnOnce()>;

/// Runs tasks after the current call stack unwinds.
pub trait Scheduler {
    fn defer(&self, task: Task);
}

/// Queue drained explicitly by the host loop (or a test).
#[derive(Default)]
pub struct DeferredQueue {
    tasks: RefCell<VecDeque<Task>>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Run queued tasks until the queue is empty, including tasks deferred
    /// while draining. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        // The borrow ends before each task runs so tasks may defer more work.
        while let Some(task) = self.pop() {
            task();
            ran += 1;
        }
        ran
    }

    fn pop(&self) -> Option<Task> {
        self.tasks.borrow_mut().pop_front()
    }
}

impl Scheduler for DeferredQueue {
    fn defer(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

/// Spawns each task onto the current tokio `LocalSet`.
///
/// Must be used from inside `LocalSet::run_until` / `block_on`;
/// `spawn_local` panics anywhere else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTaskScheduler;

impl Scheduler for LocalTaskScheduler {
    fn defer(&self, task: Task) {
        tokio::task::spawn_local(async move { task() });
    }
}

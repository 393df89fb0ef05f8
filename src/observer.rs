// Fri Oct 16 2026 - Alex

use crate::scheduler::task::TaskId;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Hooks for task lifecycle events. All hooks default to doing nothing.
///
/// Hooks run on the thread that triggered the event (submitter, dispatcher
/// or worker) and must not block for long.
pub trait SchedulerObserver: Send + Sync {
    fn on_submit(&self, _id: TaskId) {}

    fn on_dispatch(&self, _id: TaskId) {}

    fn on_complete(&self, _id: TaskId, _elapsed: Duration, _succeeded: bool) {}

    fn on_shutdown(&self, _abandoned: usize) {}
}

/// Runs one observer hook. A panicking hook is logged and swallowed so it
/// cannot take a worker slot, the dispatcher or shutdown down with it.
pub(crate) fn guarded<F: FnOnce()>(hook: &str, call: F) {
    if panic::catch_unwind(AssertUnwindSafe(call)).is_err() {
        log::error!("observer hook {} panicked", hook);
    }
}

pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}

pub struct LogObserver;

impl SchedulerObserver for LogObserver {
    fn on_submit(&self, id: TaskId) {
        log::debug!("task {} queued", id);
    }

    fn on_dispatch(&self, id: TaskId) {
        log::debug!("task {} dispatched", id);
    }

    fn on_complete(&self, id: TaskId, elapsed: Duration, succeeded: bool) {
        if succeeded {
            log::debug!("task {} completed in {:?}", id, elapsed);
        } else {
            log::warn!("task {} failed after {:?}", id, elapsed);
        }
    }

    fn on_shutdown(&self, abandoned: usize) {
        if abandoned > 0 {
            log::info!("scheduler stopped, {} queued tasks abandoned", abandoned);
        } else {
            log::info!("scheduler stopped");
        }
    }
}

#[derive(Default)]
pub struct CountingObserver {
    submitted: AtomicU64,
    dispatched: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::SeqCst)
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::SeqCst)
    }
}

impl SchedulerObserver for CountingObserver {
    fn on_submit(&self, _id: TaskId) {
        self.submitted.fetch_add(1, Ordering::SeqCst);
    }

    fn on_dispatch(&self, _id: TaskId) {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
    }

    fn on_complete(&self, _id: TaskId, _elapsed: Duration, succeeded: bool) {
        if succeeded {
            self.completed.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

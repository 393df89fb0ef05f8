// Fri Oct 16 2026 - Alex

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use thiserror::Error;

/// Task identifier: the issuing scheduler's tag plus a per-scheduler sequence
/// number. Ids from different schedulers never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId {
    scheduler: u64,
    seq: u64,
}

impl TaskId {
    pub fn new(scheduler: u64, seq: u64) -> Self {
        Self { scheduler, seq }
    }

    pub fn scheduler(&self) -> u64 {
        self.scheduler
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.scheduler, self.seq)
    }
}

/// Failure reported by a work function, delivered in place of its output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("task failed: {0}")]
    Failed(String),
    #[error("task panicked: {0}")]
    Panicked(String),
}

pub type TaskOutcome<T> = Result<T, TaskError>;

pub type Job<T> = Box<dyn FnOnce() -> TaskOutcome<T> + Send + 'static>;

pub struct Task<T> {
    id: TaskId,
    job: Job<T>,
    submitted_at: Instant,
}

impl<T> Task<T> {
    pub fn new(id: TaskId, job: Job<T>) -> Self {
        Self {
            id,
            job,
            submitted_at: Instant::now(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn submitted_at(&self) -> Instant {
        self.submitted_at
    }

    pub fn run(self) -> TaskOutcome<T> {
        match panic::catch_unwind(AssertUnwindSafe(self.job)) {
            Ok(outcome) => outcome,
            Err(payload) => Err(TaskError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl<T> fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("submitted_at", &self.submitted_at)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

// Fri Oct 16 2026 - Alex

use crate::scheduler::error::SchedulerError;
use crate::scheduler::task::{TaskId, TaskOutcome};
use parking_lot::{Condvar, Mutex};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// Completed results keyed by task id, each retrievable exactly once.
///
/// Every publish wakes all waiters; each waiter rechecks its own id, so a
/// wakeup caused by another task's result just sends it back to sleep.
pub struct ResultStore<T> {
    state: Mutex<StoreState<T>>,
    published: Condvar,
}

enum Completion<T> {
    Finished(TaskOutcome<T>),
    Abandoned,
}

struct StoreState<T> {
    ready: HashMap<TaskId, Completion<T>>,
    outstanding: HashSet<TaskId>,
}

impl<T> ResultStore<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                ready: HashMap::new(),
                outstanding: HashSet::new(),
            }),
            published: Condvar::new(),
        }
    }

    pub fn register(&self, id: TaskId) {
        self.state.lock().outstanding.insert(id);
    }

    pub fn forget(&self, id: TaskId) {
        let mut state = self.state.lock();
        state.outstanding.remove(&id);
        state.ready.remove(&id);
        self.published.notify_all();
    }

    pub fn publish(&self, id: TaskId, outcome: TaskOutcome<T>) {
        self.insert(id, Completion::Finished(outcome));
    }

    pub fn abandon(&self, id: TaskId) {
        self.insert(id, Completion::Abandoned);
    }

    fn insert(&self, id: TaskId, completion: Completion<T>) {
        let mut state = self.state.lock();
        state.ready.insert(id, completion);
        self.published.notify_all();
    }

    /// Blocks until `id` is published, or until `deadline` passes.
    pub fn fetch(&self, id: TaskId, deadline: Option<Instant>) -> Result<T, SchedulerError> {
        let started = Instant::now();
        let mut state = self.state.lock();

        loop {
            if !state.outstanding.contains(&id) {
                return Err(SchedulerError::NotFound(id));
            }

            if let Some(completion) = state.ready.remove(&id) {
                state.outstanding.remove(&id);
                return Self::resolve(id, completion);
            }

            match deadline {
                Some(deadline) if Instant::now() >= deadline => {
                    return Err(SchedulerError::Timeout {
                        id,
                        waited: started.elapsed(),
                    });
                }
                Some(deadline) => {
                    self.published.wait_until(&mut state, deadline);
                }
                None => self.published.wait(&mut state),
            }
        }
    }

    /// A timeout too large to express as a deadline waits without one.
    pub fn fetch_timeout(&self, id: TaskId, timeout: Duration) -> Result<T, SchedulerError> {
        self.fetch(id, Instant::now().checked_add(timeout))
    }

    pub fn try_fetch(&self, id: TaskId) -> Result<Option<T>, SchedulerError> {
        let mut state = self.state.lock();

        if !state.outstanding.contains(&id) {
            return Err(SchedulerError::NotFound(id));
        }

        match state.ready.remove(&id) {
            Some(completion) => {
                state.outstanding.remove(&id);
                Self::resolve(id, completion).map(Some)
            }
            None => Ok(None),
        }
    }

    fn resolve(id: TaskId, completion: Completion<T>) -> Result<T, SchedulerError> {
        match completion {
            Completion::Finished(Ok(value)) => Ok(value),
            Completion::Finished(Err(reason)) => Err(SchedulerError::WorkerFailure { id, reason }),
            Completion::Abandoned => Err(SchedulerError::Abandoned(id)),
        }
    }

    pub fn ready_count(&self) -> usize {
        self.state.lock().ready.len()
    }

    pub fn outstanding_count(&self) -> usize {
        self.state.lock().outstanding.len()
    }
}

impl<T> Default for ResultStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

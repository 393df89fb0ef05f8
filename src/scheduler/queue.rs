// Fri Oct 16 2026 - Alex

use crate::scheduler::error::SchedulerError;
use crate::scheduler::task::{Task, TaskId};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// Bounded FIFO of tasks waiting for a worker slot.
///
/// Producers block in [`TaskQueue::push`] while `capacity` tasks are pending;
/// the dispatcher blocks in [`TaskQueue::take_next`] while nothing is pending.
/// Closing the queue turns both waits into an explicit outcome.
pub struct TaskQueue<T> {
    state: Mutex<QueueState<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
    tag: u64,
    next_seq: AtomicU64,
}

struct QueueState<T> {
    tasks: VecDeque<Task<T>>,
    closed: bool,
}

impl<T> TaskQueue<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(QueueState {
                tasks: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
            tag: NEXT_TAG.fetch_add(1, Ordering::Relaxed),
            next_seq: AtomicU64::new(1),
        }
    }

    /// Issues the next id. Every queue carries a process-unique tag, so ids
    /// minted by one queue never match another's.
    pub fn next_id(&self) -> TaskId {
        TaskId::new(self.tag, self.next_seq.fetch_add(1, Ordering::SeqCst))
    }

    pub fn tag(&self) -> u64 {
        self.tag
    }

    pub fn push(&self, task: Task<T>) -> Result<(), SchedulerError> {
        let mut state = self.state.lock();

        while !state.closed && state.tasks.len() >= self.capacity {
            log::trace!("queue full ({}), {} waiting", self.capacity, task.id());
            self.not_full.wait(&mut state);
        }

        if state.closed {
            return Err(SchedulerError::QueueClosed);
        }

        state.tasks.push_back(task);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Returns `None` once the queue is closed and every pending task is gone.
    pub fn take_next(&self) -> Option<Task<T>> {
        let mut state = self.state.lock();

        loop {
            if let Some(task) = state.tasks.pop_front() {
                self.not_full.notify_one();
                return Some(task);
            }
            if state.closed {
                return None;
            }
            self.not_empty.wait(&mut state);
        }
    }

    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn drain(&self) -> Vec<Task<T>> {
        let mut state = self.state.lock();
        let drained: Vec<_> = state.tasks.drain(..).collect();
        self.not_full.notify_all();
        drained
    }

    pub fn len(&self) -> usize {
        self.state.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

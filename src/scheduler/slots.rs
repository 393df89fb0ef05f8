// Fri Oct 16 2026 - Alex

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

/// Counting semaphore bounding the number of live workers.
pub struct WorkerSlots {
    state: Mutex<SlotState>,
    changed: Condvar,
    limit: usize,
}

struct SlotState {
    active: usize,
    peak: usize,
}

impl WorkerSlots {
    pub fn new(limit: usize) -> Self {
        Self {
            state: Mutex::new(SlotState { active: 0, peak: 0 }),
            changed: Condvar::new(),
            limit: limit.max(1),
        }
    }

    pub fn acquire(&self) {
        let mut state = self.state.lock();
        while state.active >= self.limit {
            self.changed.wait(&mut state);
        }
        state.active += 1;
        state.peak = state.peak.max(state.active);
    }

    pub fn release(&self) {
        let mut state = self.state.lock();
        state.active = state.active.saturating_sub(1);
        // Both the dispatcher and idle waiters sleep on the same condvar.
        self.changed.notify_all();
    }

    pub fn wait_idle(&self) {
        let mut state = self.state.lock();
        while state.active > 0 {
            self.changed.wait(&mut state);
        }
    }

    pub fn active(&self) -> usize {
        self.state.lock().active
    }

    pub fn peak(&self) -> usize {
        self.state.lock().peak
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// One held slot. Dropping the guard releases it, including during unwinding.
pub struct SlotGuard {
    slots: Arc<WorkerSlots>,
}

impl SlotGuard {
    /// Blocks until a slot is free.
    pub fn acquire(slots: &Arc<WorkerSlots>) -> Self {
        slots.acquire();
        Self { slots: slots.clone() }
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.slots.release();
    }
}

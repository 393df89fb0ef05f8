// Fri Oct 16 2026 - Alex

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SchedulerStats {
    pub submitted: u64,
    pub completed: u64,
    pub failed: u64,
    pub abandoned: u64,
    pub peak_active: usize,
}

impl SchedulerStats {
    pub fn finished(&self) -> u64 {
        self.completed + self.failed
    }

    pub fn success_rate(&self) -> f64 {
        let finished = self.finished();
        if finished == 0 {
            0.0
        } else {
            self.completed as f64 / finished as f64
        }
    }
}

#[derive(Default)]
pub(crate) struct StatsCounters {
    submitted: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    abandoned: AtomicU64,
}

impl StatsCounters {
    pub fn record_submit(&self) {
        self.submitted.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_completion(&self, succeeded: bool) {
        if succeeded {
            self.completed.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn record_abandoned(&self, count: usize) {
        self.abandoned.fetch_add(count as u64, Ordering::SeqCst);
    }

    pub fn snapshot(&self, peak_active: usize) -> SchedulerStats {
        SchedulerStats {
            submitted: self.submitted.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            abandoned: self.abandoned.load(Ordering::SeqCst),
            peak_active,
        }
    }
}

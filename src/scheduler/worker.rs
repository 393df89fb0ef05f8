// Fri Oct 16 2026 - Alex

use crate::observer::{self, SchedulerObserver};
use crate::scheduler::slots::{SlotGuard, WorkerSlots};
use crate::scheduler::stats::StatsCounters;
use crate::scheduler::store::ResultStore;
use crate::scheduler::task::{Task, TaskError, TaskId};
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Everything a worker touches after it leaves the dispatcher.
pub(crate) struct WorkerContext<T> {
    pub store: Arc<ResultStore<T>>,
    pub slots: Arc<WorkerSlots>,
    pub observer: Arc<dyn SchedulerObserver>,
    pub stats: Arc<StatsCounters>,
}

impl<T> Clone for WorkerContext<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            slots: self.slots.clone(),
            observer: self.observer.clone(),
            stats: self.stats.clone(),
        }
    }
}

impl<T> WorkerContext<T> {
    /// Counts the outcome, publishes it, then notifies the observer. Stats
    /// already include a task by the time its result can be fetched.
    pub fn finish(&self, id: TaskId, outcome: Result<T, TaskError>, started: Instant) {
        let succeeded = outcome.is_ok();
        self.stats.record_completion(succeeded);
        self.store.publish(id, outcome);
        observer::guarded("on_complete", || {
            self.observer.on_complete(id, started.elapsed(), succeeded)
        });
    }
}

/// Runs one task on its own detached thread.
///
/// The worker owns its slot; the slot is freed when the worker is done with
/// `finish`, or immediately if the thread cannot be started. Once every slot
/// is free, every dispatched result is retrievable.
pub struct Worker;

impl Worker {
    pub(crate) fn spawn<T: Send + 'static>(
        task: Task<T>,
        ctx: WorkerContext<T>,
        slot: SlotGuard,
    ) -> io::Result<()> {
        let id = task.id();

        thread::Builder::new()
            .name(format!("dispatch-worker-{}-{}", id.scheduler(), id.seq()))
            .spawn(move || {
                let _slot = slot;
                Worker::run(task, ctx)
            })
            .map(|_detached| ())
    }

    fn run<T>(task: Task<T>, ctx: WorkerContext<T>) {
        let id = task.id();
        let started = Instant::now();
        log::trace!("worker for task {} started after {:?} in queue", id, task.submitted_at().elapsed());

        let outcome = task.run();
        if let Err(ref e) = outcome {
            log::debug!("task {} returned failure: {}", id, e);
        }

        ctx.finish(id, outcome, started);
    }
}

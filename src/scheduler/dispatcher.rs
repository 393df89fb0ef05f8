// Fri Oct 16 2026 - Alex

use crate::observer;
use crate::scheduler::queue::TaskQueue;
use crate::scheduler::slots::SlotGuard;
use crate::scheduler::task::TaskError;
use crate::scheduler::worker::{Worker, WorkerContext};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Control loop moving tasks from the queue onto worker threads.
///
/// The only coupling to a running worker is its slot: the slot guard moves
/// into the worker and is dropped when the worker finishes, so capacity comes
/// back one task at a time and the loop never joins a worker.
pub struct Dispatcher;

impl Dispatcher {
    pub(crate) fn start<T: Send + 'static>(
        queue: Arc<TaskQueue<T>>,
        ctx: WorkerContext<T>,
    ) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("dispatcher".to_string())
            .spawn(move || Dispatcher::run(queue, ctx))
    }

    fn run<T: Send + 'static>(queue: Arc<TaskQueue<T>>, ctx: WorkerContext<T>) {
        log::debug!("dispatcher started with {} worker slots", ctx.slots.limit());
        let mut dispatched = 0u64;

        loop {
            let slot = SlotGuard::acquire(&ctx.slots);

            let task = match queue.take_next() {
                Some(task) => task,
                None => break,
            };

            let id = task.id();
            observer::guarded("on_dispatch", || ctx.observer.on_dispatch(id));
            dispatched += 1;

            if let Err(e) = Worker::spawn(task, ctx.clone(), slot) {
                log::error!("could not spawn worker for task {}: {}", id, e);
                let failure = TaskError::Failed(format!("failed to spawn worker: {}", e));
                ctx.finish(id, Err(failure), Instant::now());
            }
        }

        log::debug!("dispatcher exiting after {} tasks", dispatched);
    }
}

// Fri Oct 16 2026 - Alex

use crate::config::SchedulerConfig;
use crate::observer::{self, LogObserver, SchedulerObserver};
use crate::scheduler::dispatcher::Dispatcher;
use crate::scheduler::error::SchedulerError;
use crate::scheduler::queue::TaskQueue;
use crate::scheduler::slots::WorkerSlots;
use crate::scheduler::stats::{SchedulerStats, StatsCounters};
use crate::scheduler::store::ResultStore;
use crate::scheduler::task::{Job, Task, TaskError, TaskId};
use crate::scheduler::worker::WorkerContext;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Draining,
    Stopped,
}

/// Bounded task scheduler: submit work, get an id, fetch the result by id.
///
/// At most `queue_capacity` tasks wait in the queue (further submitters
/// block) and at most `max_concurrency` tasks run at once, each on its own
/// worker thread. Every issued id resolves exactly once, to the work's output
/// or to a [`SchedulerError::WorkerFailure`].
///
/// `shutdown` must not be called from inside a task: it waits for every
/// worker, including the caller.
pub struct Scheduler<T: Send + 'static> {
    config: SchedulerConfig,
    queue: Arc<TaskQueue<T>>,
    ctx: WorkerContext<T>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
    state: RwLock<SchedulerState>,
}

impl<T: Send + 'static> Scheduler<T> {
    pub fn start(max_concurrency: usize, queue_capacity: usize) -> Result<Self, SchedulerError> {
        SchedulerBuilder::new()
            .max_concurrency(max_concurrency)
            .queue_capacity(queue_capacity)
            .build()
    }

    pub fn from_config(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        SchedulerBuilder::new().config(config).build()
    }

    fn launch(config: SchedulerConfig, observer: Arc<dyn SchedulerObserver>) -> Result<Self, SchedulerError> {
        config
            .validate()
            .map_err(|e| SchedulerError::InvalidConfig(e.to_string()))?;

        let queue = Arc::new(TaskQueue::new(config.queue_capacity));
        let ctx = WorkerContext {
            store: Arc::new(ResultStore::new()),
            slots: Arc::new(WorkerSlots::new(config.max_concurrency)),
            observer,
            stats: Arc::new(StatsCounters::default()),
        };

        let handle = Dispatcher::start(queue.clone(), ctx.clone())?;
        log::info!(
            "scheduler started: {} workers, queue capacity {}",
            config.max_concurrency,
            config.queue_capacity
        );

        Ok(Self {
            config,
            queue,
            ctx,
            dispatcher: Mutex::new(Some(handle)),
            state: RwLock::new(SchedulerState::Running),
        })
    }

    /// Queues `work`, blocking while the queue is full.
    pub fn submit<F, E>(&self, work: F) -> Result<TaskId, SchedulerError>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        E: fmt::Display,
    {
        self.enqueue(Box::new(move || work().map_err(|e| TaskError::Failed(e.to_string()))))
    }

    pub fn submit_with<I, F, E>(&self, input: I, work: F) -> Result<TaskId, SchedulerError>
    where
        I: Send + 'static,
        F: FnOnce(I) -> Result<T, E> + Send + 'static,
        E: fmt::Display,
    {
        self.submit(move || work(input))
    }

    pub fn submit_infallible<F>(&self, work: F) -> Result<TaskId, SchedulerError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        self.enqueue(Box::new(move || Ok(work())))
    }

    fn enqueue(&self, job: Job<T>) -> Result<TaskId, SchedulerError> {
        if self.queue.is_closed() {
            return Err(SchedulerError::QueueClosed);
        }

        let id = self.queue.next_id();
        // Registered before the task is visible, so a fast worker can't
        // publish an id the store doesn't know yet.
        self.ctx.store.register(id);

        match self.queue.push(Task::new(id, job)) {
            Ok(()) => {
                self.ctx.stats.record_submit();
                observer::guarded("on_submit", || self.ctx.observer.on_submit(id));
                Ok(id)
            }
            Err(e) => {
                self.ctx.store.forget(id);
                Err(e)
            }
        }
    }

    /// Blocks until the result for `id` is available and removes it.
    ///
    /// Bounded by the configured `fetch_timeout_ms` when one is set. Fails
    /// with `NotFound` for ids never issued here or already retrieved.
    pub fn await_result(&self, id: TaskId) -> Result<T, SchedulerError> {
        match self.config.fetch_timeout() {
            Some(timeout) => self.ctx.store.fetch_timeout(id, timeout),
            None => self.ctx.store.fetch(id, None),
        }
    }

    pub fn await_result_timeout(&self, id: TaskId, timeout: Duration) -> Result<T, SchedulerError> {
        self.ctx.store.fetch_timeout(id, timeout)
    }

    pub fn try_result(&self, id: TaskId) -> Result<Option<T>, SchedulerError> {
        self.ctx.store.try_fetch(id)
    }

    /// Stops accepting work, runs everything already queued, and returns once
    /// every worker has published. Idempotent.
    pub fn shutdown(&self) {
        self.stop(false);
    }

    /// Like [`Scheduler::shutdown`], but queued tasks that no worker has
    /// claimed yet resolve to [`SchedulerError::Abandoned`] instead of running.
    pub fn shutdown_now(&self) {
        self.stop(true);
    }

    fn stop(&self, abandon_queued: bool) {
        // Held for the whole teardown; concurrent callers wait here.
        let mut dispatcher = self.dispatcher.lock();

        if *self.state.read() == SchedulerState::Stopped {
            return;
        }

        *self.state.write() = SchedulerState::Draining;
        log::debug!("scheduler draining, {} tasks queued", self.queue.len());

        self.queue.close();

        let mut abandoned = 0;
        if abandon_queued {
            for task in self.queue.drain() {
                self.ctx.store.abandon(task.id());
                abandoned += 1;
            }
            self.ctx.stats.record_abandoned(abandoned);
        }

        if let Some(handle) = dispatcher.take() {
            if handle.join().is_err() {
                log::error!("dispatcher thread panicked");
            }
        }

        self.ctx.slots.wait_idle();

        *self.state.write() = SchedulerState::Stopped;
        observer::guarded("on_shutdown", || self.ctx.observer.on_shutdown(abandoned));
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.read()
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }

    pub fn stats(&self) -> SchedulerStats {
        self.ctx.stats.snapshot(self.ctx.slots.peak())
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn active_workers(&self) -> usize {
        self.ctx.slots.active()
    }

    pub fn unclaimed_results(&self) -> usize {
        self.ctx.store.ready_count()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }
}

impl<T: Send + 'static> Drop for Scheduler<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub struct SchedulerBuilder {
    config: SchedulerConfig,
    observer: Option<Arc<dyn SchedulerObserver>>,
}

impl SchedulerBuilder {
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            observer: None,
        }
    }

    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_concurrency(mut self, workers: usize) -> Self {
        self.config.max_concurrency = workers;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_fetch_timeout(timeout);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn SchedulerObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build<T: Send + 'static>(self) -> Result<Scheduler<T>, SchedulerError> {
        let observer = self.observer.unwrap_or_else(|| Arc::new(LogObserver));
        Scheduler::launch(self.config, observer)
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::CountingObserver;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;

    const WAIT: Duration = Duration::from_secs(10);

    fn double(x: i64) -> Result<i64, String> {
        Ok(x * 2)
    }

    #[test]
    fn test_doubles_three_inputs_with_small_queue() {
        let scheduler: Scheduler<i64> = Scheduler::start(1, 2).unwrap();

        let ids: Vec<_> = (1..=3)
            .map(|x| scheduler.submit_with(x, double).unwrap())
            .collect();

        let outputs: Vec<_> = ids
            .iter()
            .map(|id| scheduler.await_result_timeout(*id, WAIT).unwrap())
            .collect();

        assert_eq!(outputs, vec![2, 4, 6]);
    }

    #[test]
    fn test_results_matched_to_ids_when_finishing_out_of_order() {
        let scheduler: Scheduler<u64> = Scheduler::start(4, 8).unwrap();

        let ids: Vec<_> = (0..8u64)
            .map(|i| {
                scheduler
                    .submit_infallible(move || {
                        thread::sleep(Duration::from_millis(5 * (8 - i)));
                        i * 10
                    })
                    .unwrap()
            })
            .collect();

        for (i, id) in ids.iter().enumerate().rev() {
            assert_eq!(scheduler.await_result_timeout(*id, WAIT).unwrap(), i as u64 * 10);
        }
    }

    #[test]
    fn test_ids_unique_and_increasing_across_submitters() {
        let scheduler: Arc<Scheduler<usize>> = Arc::new(Scheduler::start(4, 4).unwrap());

        let submitters: Vec<_> = (0..4)
            .map(|_| {
                let scheduler = scheduler.clone();
                thread::spawn(move || {
                    (0..25)
                        .map(|i| scheduler.submit_infallible(move || i).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = Vec::new();
        for submitter in submitters {
            let ids = submitter.join().unwrap();
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            all.extend(ids);
        }

        let unique: HashSet<_> = all.iter().copied().collect();
        assert_eq!(unique.len(), 100);

        for id in all {
            assert!(scheduler.await_result_timeout(id, WAIT).is_ok());
        }
    }

    #[test]
    fn test_second_fetch_is_not_found() {
        let scheduler: Scheduler<i64> = Scheduler::start(2, 2).unwrap();
        let id = scheduler.submit_with(21, double).unwrap();

        assert_eq!(scheduler.await_result_timeout(id, WAIT).unwrap(), 42);
        assert!(matches!(scheduler.await_result(id), Err(SchedulerError::NotFound(x)) if x == id));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let scheduler: Scheduler<i64> = Scheduler::start(1, 1).unwrap();

        assert!(matches!(
            scheduler.await_result(TaskId::new(0, 1000)),
            Err(SchedulerError::NotFound(_))
        ));
    }

    #[test]
    fn test_ids_from_other_instance_are_not_found() {
        let first: Scheduler<i64> = Scheduler::start(1, 1).unwrap();
        let second: Scheduler<i64> = Scheduler::start(1, 1).unwrap();

        let mine = first.submit_with(1, double).unwrap();
        let theirs = second.submit_with(50, double).unwrap();
        first.shutdown();
        second.shutdown();

        assert_ne!(mine, theirs);
        assert!(matches!(second.try_result(mine), Err(SchedulerError::NotFound(x)) if x == mine));
        assert!(matches!(
            second.await_result_timeout(mine, WAIT),
            Err(SchedulerError::NotFound(_))
        ));
        assert!(matches!(first.try_result(theirs), Err(SchedulerError::NotFound(_))));

        assert_eq!(first.await_result_timeout(mine, WAIT).unwrap(), 2);
        assert_eq!(second.await_result_timeout(theirs, WAIT).unwrap(), 100);
    }

    #[test]
    fn test_submit_blocks_while_queue_full() {
        let scheduler: Arc<Scheduler<u32>> = Arc::new(Scheduler::start(1, 1).unwrap());
        let (gate_tx, gate_rx) = mpsc::channel::<()>();

        let blocker = scheduler
            .submit(move || gate_rx.recv().map(|_| 1).map_err(|e| e.to_string()))
            .unwrap();
        let queued = scheduler.submit_infallible(|| 2).unwrap();

        let third_done = Arc::new(AtomicBool::new(false));
        let producer = {
            let scheduler = scheduler.clone();
            let third_done = third_done.clone();
            thread::spawn(move || {
                let id = scheduler.submit_infallible(|| 3).unwrap();
                third_done.store(true, Ordering::SeqCst);
                id
            })
        };

        thread::sleep(Duration::from_millis(150));
        assert!(!third_done.load(Ordering::SeqCst));
        assert_eq!(scheduler.pending(), 1);

        gate_tx.send(()).unwrap();
        let third = producer.join().unwrap();

        assert!(third_done.load(Ordering::SeqCst));
        assert_eq!(scheduler.await_result_timeout(blocker, WAIT).unwrap(), 1);
        assert_eq!(scheduler.await_result_timeout(queued, WAIT).unwrap(), 2);
        assert_eq!(scheduler.await_result_timeout(third, WAIT).unwrap(), 3);
    }

    #[test]
    fn test_concurrency_never_exceeds_limit() {
        let limit = 3;
        let scheduler: Scheduler<()> = Scheduler::start(limit, 4).unwrap();
        let running = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let ids: Vec<_> = (0..20)
            .map(|_| {
                let running = running.clone();
                let max_seen = max_seen.clone();
                scheduler
                    .submit_infallible(move || {
                        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(10));
                        running.fetch_sub(1, Ordering::SeqCst);
                    })
                    .unwrap()
            })
            .collect();

        for id in ids {
            scheduler.await_result_timeout(id, WAIT).unwrap();
        }

        assert!(max_seen.load(Ordering::SeqCst) <= limit);
        assert!(scheduler.stats().peak_active <= limit);
    }

    #[test]
    fn test_failing_work_yields_worker_failure() {
        let scheduler: Scheduler<i32> = Scheduler::start(2, 2).unwrap();

        let failing = scheduler.submit(|| Err::<i32, _>("no such file")).unwrap();
        let panicking = scheduler.submit_infallible(|| panic!("divide by zero")).unwrap();

        match scheduler.await_result_timeout(failing, WAIT) {
            Err(SchedulerError::WorkerFailure { id, reason }) => {
                assert_eq!(id, failing);
                assert_eq!(reason, TaskError::Failed("no such file".to_string()));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            scheduler.await_result_timeout(panicking, WAIT),
            Err(SchedulerError::WorkerFailure { reason: TaskError::Panicked(_), .. })
        ));

        // Still usable after failures.
        let ok = scheduler.submit_infallible(|| 7).unwrap();
        assert_eq!(scheduler.await_result_timeout(ok, WAIT).unwrap(), 7);

        let stats = scheduler.stats();
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn test_shutdown_waits_for_in_flight_tasks() {
        let scheduler: Scheduler<usize> = Scheduler::start(5, 5).unwrap();

        let ids: Vec<_> = (0..5)
            .map(|i| {
                scheduler
                    .submit_infallible(move || {
                        thread::sleep(Duration::from_millis(50));
                        i
                    })
                    .unwrap()
            })
            .collect();

        scheduler.shutdown();

        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert_eq!(scheduler.active_workers(), 0);
        assert_eq!(scheduler.unclaimed_results(), 5);
        for (i, id) in ids.into_iter().enumerate() {
            assert_eq!(scheduler.try_result(id).unwrap(), Some(i));
        }
    }

    #[test]
    fn test_shutdown_runs_queued_tasks() {
        let scheduler: Scheduler<usize> = Scheduler::start(1, 8).unwrap();

        let ids: Vec<_> = (0..8)
            .map(|i| {
                scheduler
                    .submit_infallible(move || {
                        thread::sleep(Duration::from_millis(5));
                        i
                    })
                    .unwrap()
            })
            .collect();

        scheduler.shutdown();

        for (i, id) in ids.into_iter().enumerate() {
            assert_eq!(scheduler.try_result(id).unwrap(), Some(i));
        }
        assert_eq!(scheduler.stats().completed, 8);
    }

    #[test]
    fn test_submit_after_shutdown_fails() {
        let scheduler: Scheduler<i64> = Scheduler::start(1, 1).unwrap();
        scheduler.shutdown();

        assert!(matches!(
            scheduler.submit_with(1, double),
            Err(SchedulerError::QueueClosed)
        ));
        assert_eq!(scheduler.stats().submitted, 0);
    }

    #[test]
    fn test_shutdown_releases_blocked_submitter() {
        let scheduler: Arc<Scheduler<u32>> = Arc::new(Scheduler::start(1, 1).unwrap());
        let (gate_tx, gate_rx) = mpsc::channel::<()>();

        let blocker = scheduler
            .submit(move || gate_rx.recv().map(|_| 1).map_err(|e| e.to_string()))
            .unwrap();
        let queued = scheduler.submit_infallible(|| 2).unwrap();

        let producer = {
            let scheduler = scheduler.clone();
            thread::spawn(move || scheduler.submit_infallible(|| 3))
        };
        thread::sleep(Duration::from_millis(100));

        let stopper = {
            let scheduler = scheduler.clone();
            thread::spawn(move || scheduler.shutdown())
        };

        assert!(matches!(producer.join().unwrap(), Err(SchedulerError::QueueClosed)));

        gate_tx.send(()).unwrap();
        stopper.join().unwrap();

        assert_eq!(scheduler.try_result(blocker).unwrap(), Some(1));
        assert_eq!(scheduler.try_result(queued).unwrap(), Some(2));
        assert_eq!(scheduler.state(), SchedulerState::Stopped);
    }

    #[test]
    fn test_shutdown_is_idempotent_and_concurrent() {
        let scheduler: Arc<Scheduler<u8>> = Arc::new(Scheduler::start(2, 2).unwrap());
        let id = scheduler
            .submit_infallible(|| {
                thread::sleep(Duration::from_millis(50));
                9
            })
            .unwrap();

        let stoppers: Vec<_> = (0..3)
            .map(|_| {
                let scheduler = scheduler.clone();
                thread::spawn(move || {
                    scheduler.shutdown();
                    scheduler.state()
                })
            })
            .collect();

        for stopper in stoppers {
            assert_eq!(stopper.join().unwrap(), SchedulerState::Stopped);
        }
        scheduler.shutdown();

        assert_eq!(scheduler.try_result(id).unwrap(), Some(9));
    }

    #[test]
    fn test_shutdown_now_abandons_queued_tasks() {
        let scheduler: Scheduler<u32> = Scheduler::start(1, 4).unwrap();
        let (gate_tx, gate_rx) = mpsc::channel::<()>();

        let running = scheduler
            .submit(move || gate_rx.recv().map(|_| 1).map_err(|e| e.to_string()))
            .unwrap();
        thread::sleep(Duration::from_millis(50));
        let queued: Vec<_> = (0..3).map(|i| scheduler.submit_infallible(move || i).unwrap()).collect();

        let opener = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            gate_tx.send(()).ok();
        });

        scheduler.shutdown_now();
        opener.join().unwrap();

        assert_eq!(scheduler.try_result(running).unwrap(), Some(1));
        for id in queued {
            assert!(matches!(scheduler.try_result(id), Err(SchedulerError::Abandoned(x)) if x == id));
        }
        assert_eq!(scheduler.stats().abandoned, 3);
    }

    #[test]
    fn test_default_fetch_timeout() {
        let scheduler: Scheduler<u32> = SchedulerBuilder::new()
            .max_concurrency(1)
            .queue_capacity(1)
            .fetch_timeout(Duration::from_millis(50))
            .build()
            .unwrap();

        let id = scheduler
            .submit_infallible(|| {
                thread::sleep(Duration::from_millis(300));
                1
            })
            .unwrap();

        assert!(matches!(
            scheduler.await_result(id),
            Err(SchedulerError::Timeout { id: x, .. }) if x == id
        ));
        assert_eq!(scheduler.await_result_timeout(id, WAIT).unwrap(), 1);
    }

    #[test]
    fn test_observer_sees_lifecycle() {
        let observer = Arc::new(CountingObserver::new());
        let scheduler: Scheduler<i64> = SchedulerBuilder::new()
            .max_concurrency(2)
            .queue_capacity(2)
            .observer(observer.clone())
            .build()
            .unwrap();

        for x in 0..4 {
            scheduler.submit_with(x, double).unwrap();
        }
        scheduler.submit(|| Err::<i64, _>("bad")).unwrap();
        scheduler.shutdown();

        assert_eq!(observer.submitted(), 5);
        assert_eq!(observer.dispatched(), 5);
        assert_eq!(observer.completed(), 4);
        assert_eq!(observer.failed(), 1);
    }

    #[test]
    fn test_unbounded_fetch_timeouts() {
        let scheduler: Scheduler<u32> = Scheduler::start(1, 1).unwrap();
        let id = scheduler.submit_infallible(|| 9).unwrap();
        assert_eq!(scheduler.await_result_timeout(id, Duration::MAX).unwrap(), 9);

        let config = SchedulerConfig {
            max_concurrency: 1,
            queue_capacity: 1,
            fetch_timeout_ms: Some(u64::MAX),
        };
        let scheduler: Scheduler<u32> = Scheduler::from_config(config).unwrap();
        let id = scheduler
            .submit_infallible(|| {
                thread::sleep(Duration::from_millis(20));
                3
            })
            .unwrap();
        assert_eq!(scheduler.await_result(id).unwrap(), 3);
    }

    struct PanickingObserver;

    impl SchedulerObserver for PanickingObserver {
        fn on_submit(&self, _id: TaskId) {
            panic!("on_submit bug");
        }

        fn on_dispatch(&self, _id: TaskId) {
            panic!("on_dispatch bug");
        }

        fn on_complete(&self, _id: TaskId, _elapsed: Duration, _succeeded: bool) {
            panic!("on_complete bug");
        }

        fn on_shutdown(&self, _abandoned: usize) {
            panic!("on_shutdown bug");
        }
    }

    #[test]
    fn test_panicking_observer_does_not_stall_scheduler() {
        let scheduler: Arc<Scheduler<i64>> = Arc::new(
            SchedulerBuilder::new()
                .max_concurrency(1)
                .queue_capacity(1)
                .observer(Arc::new(PanickingObserver))
                .build()
                .unwrap(),
        );

        let first = scheduler.submit_with(1, double).unwrap();
        let second = scheduler.submit_with(2, double).unwrap();

        assert_eq!(scheduler.await_result_timeout(first, WAIT).unwrap(), 2);
        assert_eq!(scheduler.await_result_timeout(second, WAIT).unwrap(), 4);

        let (done_tx, done_rx) = mpsc::channel();
        {
            let scheduler = scheduler.clone();
            thread::spawn(move || {
                scheduler.shutdown();
                done_tx.send(()).ok();
            });
        }
        assert!(done_rx.recv_timeout(WAIT).is_ok());

        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert_eq!(scheduler.active_workers(), 0);
        assert_eq!(scheduler.stats().completed, 2);
    }

    #[test]
    fn test_stats_current_once_result_fetched() {
        let scheduler: Scheduler<i64> = Scheduler::start(2, 4).unwrap();

        for round in 0..20 {
            let id = scheduler.submit(move || Err::<i64, _>(format!("fail {}", round))).unwrap();
            assert!(scheduler.await_result_timeout(id, WAIT).is_err());
            assert_eq!(scheduler.stats().failed, round + 1);

            let id = scheduler.submit_with(round as i64, double).unwrap();
            assert_eq!(scheduler.await_result_timeout(id, WAIT).unwrap(), round as i64 * 2);
            assert_eq!(scheduler.stats().completed, round + 1);
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result: Result<Scheduler<u8>, _> = Scheduler::start(0, 4);
        assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));

        let result: Result<Scheduler<u8>, _> = Scheduler::start(4, 0);
        assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_config() {
        let config = SchedulerConfig::new().with_max_concurrency(2).with_queue_capacity(3);
        let scheduler: Scheduler<u8> = Scheduler::from_config(config.clone()).unwrap();

        assert_eq!(scheduler.config(), &config);
        assert!(scheduler.is_running());
    }
}

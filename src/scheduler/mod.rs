// Fri Oct 16 2026 - Alex

pub mod core;
pub mod dispatcher;
pub mod error;
pub mod queue;
pub mod slots;
pub mod stats;
pub mod store;
pub mod task;
pub mod worker;

pub use self::core::{Scheduler, SchedulerBuilder, SchedulerState};
pub use dispatcher::Dispatcher;
pub use error::SchedulerError;
pub use queue::TaskQueue;
pub use slots::{SlotGuard, WorkerSlots};
pub use stats::SchedulerStats;
pub use store::ResultStore;
pub use task::{Job, Task, TaskError, TaskId, TaskOutcome};
pub use worker::Worker;

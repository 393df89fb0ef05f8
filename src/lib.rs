// Fri Oct 16 2026 - Alex

pub mod cli;
pub mod config;
pub mod observer;
pub mod scheduler;

pub use config::{ConfigError, SchedulerConfig};
pub use observer::{CountingObserver, LogObserver, NoopObserver, SchedulerObserver};
pub use scheduler::{Scheduler, SchedulerBuilder, SchedulerError, SchedulerState, SchedulerStats, TaskError, TaskId};

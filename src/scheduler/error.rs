// Fri Oct 16 2026 - Alex

use crate::scheduler::task::{TaskError, TaskId};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Submission after shutdown started.
    #[error("scheduler is closed to new submissions")]
    QueueClosed,
    /// The id was never issued by this scheduler or was already retrieved.
    #[error("no result for task {0}: unknown id or already retrieved")]
    NotFound(TaskId),
    #[error("task {id} failed: {reason}")]
    WorkerFailure { id: TaskId, reason: TaskError },
    #[error("timed out after {waited:?} waiting for task {id}")]
    Timeout { id: TaskId, waited: Duration },
    #[error("task {0} was abandoned by an immediate shutdown")]
    Abandoned(TaskId),
    #[error("invalid scheduler configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to spawn dispatcher thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl SchedulerError {
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            SchedulerError::NotFound(id)
            | SchedulerError::Abandoned(id)
            | SchedulerError::WorkerFailure { id, .. }
            | SchedulerError::Timeout { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn is_task_failure(&self) -> bool {
        matches!(self, SchedulerError::WorkerFailure { .. } | SchedulerError::Abandoned(_))
    }
}

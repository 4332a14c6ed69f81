use std::time::Duration;
use thiserror::Error;

/// Outcome of a background operation that did not succeed.
///
/// `Canceled` and `DeadlineExceeded` interrupt a task and are never retried.
/// Everything else is a `Failed` attempt and may be retried.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("canceled")]
    Canceled,

    #[error("timed out after {0:?}")]
    DeadlineExceeded(Duration),

    #[error("{0:#}")]
    Failed(anyhow::Error),
}

impl TaskError {
    /// Classifies an operation error, recognising interruptions raised by the operation itself.
    pub fn classify(err: anyhow::Error) -> Self {
        match err.downcast::<TaskError>() {
            Ok(task_err) => task_err,
            Err(err) => TaskError::Failed(err),
        }
    }

    pub fn is_interrupt(&self) -> bool {
        matches!(self, TaskError::Canceled | TaskError::DeadlineExceeded(_))
    }
}

/// Preconditions that block a task from starting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("select a version (refresh with ctrl+r and choose one)")]
    NoTagSelected,

    #[error("output path is required")]
    OutputUnresolved,
}

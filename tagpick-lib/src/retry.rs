//! Bounded retries with exponential backoff under a cancellation scope.
//!
//! A [`TaskScope`] combines an explicit [`CancellationToken`] with a deadline.
//! [`run_with_retry`] checks the scope before every attempt, races each attempt
//! and each backoff sleep against it, and never retries an interruption.

use crate::error::TaskError;
use std::time::Duration;
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

/// Cancellation trigger plus an outer deadline.
#[derive(Debug, Clone)]
pub struct TaskScope {
    token: CancellationToken,
    deadline: Instant,
    timeout: Duration,
}

impl TaskScope {
    pub fn new(token: CancellationToken, timeout: Duration) -> Self {
        Self {
            token,
            deadline: Instant::now() + timeout,
            timeout,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the interruption if the scope has already fired.
    pub fn check(&self) -> Result<(), TaskError> {
        if self.token.is_cancelled() {
            Err(TaskError::Canceled)
        } else if Instant::now() >= self.deadline {
            Err(TaskError::DeadlineExceeded(self.timeout))
        } else {
            Ok(())
        }
    }

    /// Resolves once the token is cancelled or the deadline passes.
    pub async fn interrupted(&self) -> TaskError {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => TaskError::Canceled,
            _ = sleep_until(self.deadline) => TaskError::DeadlineExceeded(self.timeout),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay after the first failure; doubled after every further failure.
    pub base_delay: Duration,
    /// Outer deadline for all attempts together.
    pub timeout: Duration,
}

impl RetryPolicy {
    pub const REFRESH: RetryPolicy = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(250),
        timeout: Duration::from_secs(30),
    };

    pub const DOWNLOAD: RetryPolicy = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(500),
        timeout: Duration::from_secs(120),
    };

    /// Derives a fresh scope bounded by this policy's deadline.
    pub fn scope(&self, token: CancellationToken) -> TaskScope {
        TaskScope::new(token, self.timeout)
    }
}

/// Runs `operation` until it succeeds, the attempt budget is spent, or the scope fires.
///
/// A budget of zero attempts still runs the operation once.
pub async fn run_with_retry<T, F, Fut>(
    scope: &TaskScope,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, TaskError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.base_delay;
    let mut attempt = 1;

    loop {
        scope.check()?;

        let result = tokio::select! {
            biased;
            interrupt = scope.interrupted() => return Err(interrupt),
            result = operation() => result,
        };

        let err = match result {
            Ok(value) => return Ok(value),
            Err(err) => TaskError::classify(err),
        };
        if err.is_interrupt() || attempt >= max_attempts {
            return Err(err);
        }

        tracing::debug!(
            attempt,
            max_attempts,
            ?delay,
            "Attempt failed, retrying: {err}"
        );

        tokio::select! {
            biased;
            interrupt = scope.interrupted() => return Err(interrupt),
            _ = sleep(delay) => {}
        }

        delay = delay.saturating_mul(2);
        attempt += 1;
    }
}

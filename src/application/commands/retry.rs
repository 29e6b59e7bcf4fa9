// src/application/commands/retry.rs
use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::errors::DomainError;

/// Bounded retry for ledger operations that lost a lock race.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// Upper bound for a single attempt. Elapsing counts as a storage conflict.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(25),
            max_backoff: Duration::from_millis(500),
            attempt_timeout: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    fn next_backoff(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_backoff)
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// `max_attempts` is spent.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &'static str,
    mut operation: F,
) -> ApplicationResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApplicationResult<T>>,
{
    let mut backoff = policy.initial_backoff;
    let mut attempt = 0;

    loop {
        attempt += 1;
        let outcome = match timeout(policy.attempt_timeout, operation()).await {
            Ok(result) => result,
            Err(_) => Err(ApplicationError::Domain(DomainError::StorageConflict(
                format!("{operation_name} timed out"),
            ))),
        };

        match outcome {
            Ok(value) => {
                if attempt > 1 {
                    debug!(operation = operation_name, attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                warn!(
                    operation = operation_name,
                    attempt,
                    error = %err,
                    backoff_ms = backoff.as_millis() as u64,
                    "retrying after storage conflict"
                );
                sleep(backoff).await;
                backoff = policy.next_backoff(backoff);
            }
            Err(err) => {
                if err.is_retryable() {
                    warn!(operation = operation_name, attempt, error = %err, "giving up");
                }
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
            attempt_timeout: Duration::from_millis(200),
        }
    }

    #[tokio::test]
    async fn stops_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result: ApplicationResult<()> = with_retry(&fast_policy(3), "test", || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(DomainError::StorageConflict("lock timeout".into()).into())
            }
        })
        .await;

        assert!(result.unwrap_err().is_retryable());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_business_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result: ApplicationResult<()> = with_retry(&fast_policy(5), "test", || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(DomainError::InsufficientStock {
                    requested: 4,
                    available: 1,
                }
                .into())
            }
        })
        .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::InsufficientStock { .. }))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recovers_when_a_later_attempt_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let result = with_retry(&fast_policy(3), "test", || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(DomainError::StorageConflict("serialization failure".into()).into())
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn slow_attempt_times_out_as_storage_conflict() {
        let mut policy = fast_policy(1);
        policy.attempt_timeout = Duration::from_millis(5);
        let result: ApplicationResult<()> = with_retry(&policy, "slow", || async {
            sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::StorageConflict(_)))
        ));
    }
}

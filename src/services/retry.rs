//! Bounded retry for upstream catalog fetches, built on `backon`.

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};

use crate::repository::{RepositoryError, RepositoryResult};

/// How often and how patiently a failed fetch is repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for every further retry.
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    /// One immediate retry with identical parameters.
    fn default() -> Self {
        Self {
            max_retries: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    fn build_backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_max_delay(self.max_delay.max(self.initial_delay))
            .with_max_times(self.max_retries as usize)
            .with_factor(2.0)
    }
}

/// Runs `fetch` until it succeeds or the policy is exhausted, returning the
/// last error in the latter case. Only transient failures are retried.
pub async fn retry_fetch<F, Fut, T>(
    policy: &RetryPolicy,
    operation: &str,
    fetch: F,
) -> RepositoryResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RepositoryResult<T>>,
{
    let max_retries = policy.max_retries;
    let mut attempt = 0u32;
    let notify = |err: &RepositoryError, delay: Duration| {
        attempt += 1;
        log::warn!(
            "{operation} failed, retry {attempt}/{max_retries} in {}ms: {err}",
            delay.as_millis()
        );
    };

    fetch
        .retry(policy.build_backoff())
        .when(RepositoryError::is_transient)
        .notify(notify)
        .await
}

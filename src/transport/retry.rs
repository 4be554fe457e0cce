//! Retry with exponential backoff for transient request failures.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: config.retry_backoff,
            max_delay: config.max_backoff,
        }
    }

    fn next_delay(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_delay)
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// the retry budget is spent.
pub async fn with_retry<T, Op, Fut>(policy: &RetryPolicy, mut operation: Op) -> Result<T>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = policy.initial_delay.min(policy.max_delay);
    let mut retries = 0u32;

    loop {
        let e = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };
        if !e.is_retryable() {
            return Err(e);
        }
        if retries >= policy.max_retries {
            if policy.max_retries == 0 {
                return Err(e);
            }
            return Err(Error::MaxRetriesExceeded {
                retries,
                last: Box::new(e),
            });
        }

        retries += 1;
        tracing::warn!(
            retry = retries,
            max_retries = policy.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %e.safe_message(),
            "Request failed with retryable error; retrying"
        );
        sleep(delay).await;
        delay = policy.next_delay(delay);
    }
}

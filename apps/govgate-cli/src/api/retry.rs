//! Backoff retry for API operations.

use crate::config::{Backoff, RetrySettings};
use crate::error::{CliError, CliResult};
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (0 = no retries).
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            backoff: settings.backoff,
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Request detail right after creation: the record may not be readable
    /// yet, so a 404 is retried three times, waiting 1 s, 2 s, then 3 s.
    pub fn not_found_detail() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(3),
            backoff: Backoff::Linear,
        }
    }

    /// Same schedule shape with a different unit delay.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self.max_delay = base_delay.saturating_mul(self.max_retries.max(1));
        self
    }

    /// Delay before retry number `attempt + 1`.
    ///
    /// Linear: `base * (attempt + 1)`. Exponential: `base * 2^attempt`.
    /// Both are capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            Backoff::Linear => self.base_delay.saturating_mul(attempt.saturating_add(1)),
            Backoff::Exponential => self
                .base_delay
                .saturating_mul(2u32.saturating_pow(attempt)),
        };
        delay.min(self.max_delay)
    }

    /// Run `f` until it succeeds, fails with an error `should_retry`
    /// rejects, or retries run out. The last error is returned unchanged.
    pub async fn execute<F, Fut, T, P>(
        &self,
        operation_name: &str,
        should_retry: P,
        mut f: F,
    ) -> CliResult<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = CliResult<T>>,
        P: Fn(&CliError) -> bool,
    {
        let mut attempt: u32 = 0;
        loop {
            match f().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(
                            operation = operation_name,
                            attempt = attempt + 1,
                            "Operation succeeded after retries"
                        );
                    }
                    return Ok(value);
                }
                Err(error) if should_retry(&error) && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    debug!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    if attempt > 0 {
                        warn!(
                            operation = operation_name,
                            attempts = attempt + 1,
                            error = %error,
                            "Giving up after retries"
                        );
                    }
                    return Err(error);
                }
            }
        }
    }
}

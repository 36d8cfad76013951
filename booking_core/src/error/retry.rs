//! Retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use super::error_log::{ErrorContext, ErrorLog};
use super::AppResult;

/// Backoff parameters for [`with_retry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    /// Maximum relative deviation applied to each delay, in `[0, 1)`.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            jitter: 0.3,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            ..Self::default()
        }
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = 0.0;
        self
    }

    /// Delay before retry number `attempt` (1-based), jitter excluded.
    pub fn nominal_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let nominal = self.nominal_delay(attempt);
        if self.jitter <= 0.0 {
            return nominal;
        }
        let spread = self.jitter.min(0.99);
        let factor = rand::thread_rng().gen_range(1.0 - spread..=1.0 + spread);
        nominal.mul_f64(factor)
    }
}

/// Run `operation` until it succeeds or `policy.max_retries` retries are used.
///
/// Each retry is recorded in `log` with action `retry_attempt`; exhaustion is
/// recorded with action `retry_failed` and the last error is returned.
///
/// # Arguments
/// * `log` - Error log receiving retry records
/// * `policy` - Retry count and backoff parameters
/// * `context` - Component context attached to every record
/// * `operation` - Factory producing a fresh attempt future
pub async fn with_retry<T, F, Fut>(
    log: &ErrorLog,
    policy: RetryPolicy,
    context: ErrorContext,
    mut operation: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= policy.max_retries => {
                let details = serde_json::json!({ "attempts": attempt + 1 });
                log.record(&err, context.clone().action("retry_failed").details(details));
                return Err(err);
            }
            Err(err) => {
                attempt += 1;
                let delay = policy.delay_for(attempt);
                let details = serde_json::json!({
                    "attempt": attempt,
                    "delay_ms": delay.as_millis() as u64,
                });
                log.record(&err, context.clone().action("retry_attempt").details(details));
                tokio::time::sleep(delay).await;
            }
        }
    }
}

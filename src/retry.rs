//! Blocking retry with exponential backoff for provider requests.

use std::thread::sleep;
use std::time::Duration;

use anyhow::{Result, anyhow};
use tracing::{debug, warn};

use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl RetryConfig {
    pub fn network() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or the retry
/// budget is spent. A provider-suggested wait replaces the computed delay (still capped).
pub fn retry<T>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: impl FnMut() -> Result<T, FetchError>,
) -> Result<T> {
    let mut attempt = 0u32;
    loop {
        match operation() {
            Ok(value) => {
                if attempt > 0 {
                    debug!(operation = operation_name, attempt, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(FetchError::Fatal(err)) => return Err(err),
            Err(err) if attempt >= config.max_retries => {
                return Err(anyhow!(
                    "{operation_name} failed after {} attempts: {err}",
                    attempt + 1
                ));
            }
            Err(err) => {
                let delay = err
                    .suggested_wait()
                    .unwrap_or_else(|| config.delay_for_attempt(attempt))
                    .min(config.max_delay);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    "retrying: {err}"
                );
                sleep(delay);
                attempt += 1;
            }
        }
    }
}

//! Retry policy applied around a whole load
//!
//! Loaders never retry on their own; a failed request aborts the load.
//! This policy re-runs the complete load when a retrieval error occurs.

use std::thread;
use std::time::Duration;
use swagger_import_common::{ImportError, RetrySettings};
use tracing::{debug, warn};

/// Exponential backoff policy
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first failure
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Policy that runs the operation exactly once
    pub fn none() -> Self {
        Self::from(&RetrySettings::default())
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self
            .backoff_multiplier
            .powi(attempt.saturating_sub(1) as i32);
        let millis = (self.initial_delay.as_millis() as f64 * factor.max(0.0)) as u64;
        Duration::from_millis(millis).min(self.max_delay)
    }

    /// Run `operation`, retrying retrieval errors with backoff
    ///
    /// Input and translation errors are returned immediately.
    pub fn run<T, F>(&self, mut operation: F) -> Result<T, ImportError>
    where
        F: FnMut() -> Result<T, ImportError>,
    {
        let mut attempt = 0;

        loop {
            match operation() {
                Ok(result) => {
                    if attempt > 0 {
                        debug!("Load succeeded after {} retries", attempt);
                    }
                    return Ok(result);
                }
                Err(e) if e.is_retrieval() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    debug!(
                        "Load failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempt,
                        self.max_retries,
                        e,
                        delay.as_millis()
                    );
                    thread::sleep(delay);
                }
                Err(e) => {
                    if attempt > 0 {
                        warn!("Load failed after {} attempts: {}", attempt + 1, e);
                    }
                    return Err(e);
                }
            }
        }
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            backoff_multiplier: settings.backoff_multiplier,
        }
    }
}

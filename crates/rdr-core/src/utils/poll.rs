use crate::error::ApiError;
use backoff::{ExponentialBackoff, backoff::Backoff};
use std::future::Future;
use std::time::Duration;

/// Polling configuration for waiting on execution jobs
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Maximum number of status reads
    pub max_attempts: u32,
    /// Delay before the second read
    pub initial_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl PollConfig {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_delay,
            initial_interval: self.initial_delay,
            max_interval: self.max_delay,
            multiplier: self.multiplier,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

/// Call `check` until it yields a value, sleeping with exponential backoff between calls.
///
/// Returns `Ok(None)` once `max_attempts` reads produced nothing. Errors from
/// `check` end polling immediately.
pub async fn poll_until<F, Fut, T>(config: &PollConfig, mut check: F) -> Result<Option<T>, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, ApiError>>,
{
    let mut backoff = config.backoff();

    for attempt in 1..=config.max_attempts {
        if let Some(value) = check(attempt).await? {
            return Ok(Some(value));
        }

        if attempt == config.max_attempts {
            break;
        }

        let delay = backoff.next_backoff().unwrap_or(config.max_delay);
        log::debug!("Polling again after {:?} (attempt {})", delay, attempt);
        tokio::time::sleep(delay).await;
    }

    log::warn!("Gave up polling after {} attempts", config.max_attempts);
    Ok(None)
}

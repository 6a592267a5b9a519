//! Bounded retry with exponential backoff

use crate::shared::constants::{
    DEFAULT_RETRY_BACKOFF_FACTOR, DEFAULT_RETRY_COUNT, DEFAULT_RETRY_INITIAL_DELAY_MS,
};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryOptions {
    /// Total attempts, clamped to at least one
    pub retries: u32,
    pub initial_delay: Duration,
    pub backoff_factor: f64,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRY_COUNT,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_INITIAL_DELAY_MS),
            backoff_factor: DEFAULT_RETRY_BACKOFF_FACTOR,
        }
    }
}

impl RetryOptions {
    pub fn new(retries: u32, initial_delay: Duration, backoff_factor: f64) -> Self {
        Self {
            retries,
            initial_delay,
            backoff_factor,
        }
    }

    /// Delay slept after failed attempt `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        self.initial_delay.mul_f64(self.backoff_factor.max(0.0).powi(exponent))
    }
}

/// Run `operation` until it succeeds or the attempts run out.
///
/// Returns the last error unchanged when every attempt fails.
pub async fn with_retry<T, E, F, Fut>(mut operation: F, options: &RetryOptions) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = options.retries.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    log::info!("Operation succeeded on attempt {}/{}", attempt, attempts);
                }
                return Ok(value);
            }
            Err(error) if attempt >= attempts => {
                log::error!("Attempt {}/{} failed, giving up: {}", attempt, attempts, error);
                return Err(error);
            }
            Err(error) => {
                let delay = options.delay_after(attempt);
                log::warn!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt,
                    attempts,
                    error,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::WalletError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn options(retries: u32) -> RetryOptions {
        RetryOptions::new(retries, Duration::from_millis(1000), 2.0)
    }

    #[test]
    fn test_backoff_schedule() {
        let options = options(3);
        assert_eq!(options.delay_after(1), Duration::from_millis(1000));
        assert_eq!(options.delay_after(2), Duration::from_millis(2000));
        assert_eq!(options.delay_after(3), Duration::from_millis(4000));
        assert_eq!(RetryOptions::default(), options);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_two_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let counter = calls.clone();
        let result = with_retry(
            move || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < 3 {
                        Err(WalletError::network(format!("attempt {} failed", n)))
                    } else {
                        Ok(n)
                    }
                }
            },
            &options(3),
        )
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // slept 1000 ms then 2000 ms
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(3000), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(3100), "{:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_last_error_when_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = Instant::now();

        let result: Result<(), WalletError> = with_retry(
            move || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(WalletError::network(format!("failure {}", n)))
                }
            },
            &options(3),
        )
        .await;

        assert_eq!(result, Err(WalletError::network("failure 3")));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1000 ms + 2000 ms, no sleep after the last failure
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(3000), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(3100), "{:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_still_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = Instant::now();

        let result: Result<(), WalletError> = with_retry(
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(WalletError::network("down"))
                }
            },
            &options(0),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_does_not_sleep() {
        let started = Instant::now();
        let result: Result<&str, WalletError> = with_retry(|| async { Ok("ok") }, &options(5)).await;
        assert_eq!(result, Ok("ok"));
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}

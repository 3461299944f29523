//! Retry policy for extraction API calls
//!
//! An explicit policy value rather than inline control flow: attempt budget,
//! backoff schedule, and the retryable predicate live here so they can be
//! exercised with a fake sleeper and a scripted transport.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{Error, Result};

/// Retry budget and backoff schedule for one extraction call
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff unit; attempt n waits `base_delay * 2^n` before the next try
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Whether an HTTP status warrants another attempt.
    ///
    /// Only rate limiting and server-side failures are retryable; every
    /// other status is surfaced immediately.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 500 | 503)
    }

    /// Delay before the attempt after `attempt` (0-based): 1, 2, 4, 8... units.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }

    /// Run `op` under this policy, sleeping with `tokio::time::sleep`.
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run_with_sleep(op, |d| tokio::time::sleep(d)).await
    }

    /// Run `op` with a caller-supplied sleeper (fake clock in tests).
    ///
    /// `op` receives the 0-based attempt number. Errors for which
    /// [`Error::is_transient`] is false end the loop immediately; transient
    /// errors are retried until the attempt budget runs out, with
    /// exponential backoff between attempts.
    pub async fn run_with_sleep<T, F, Fut, S, SFut>(&self, mut op: F, sleep: S) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
        S: Fn(Duration) -> SFut,
        SFut: Future<Output = ()>,
    {
        let mut attempt = 0;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt + 1 < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_secs = delay.as_secs_f64(),
                        error = %err,
                        "Transient extraction failure, backing off"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    fn transient() -> Error {
        Error::Transient {
            status: 503,
            message: "unavailable".into(),
        }
    }

    /// Records requested delays instead of sleeping.
    fn recording_sleeper(log: Arc<Mutex<Vec<Duration>>>) -> impl Fn(Duration) -> std::future::Ready<()> {
        move |d| {
            log.lock().unwrap().push(d);
            std::future::ready(())
        }
    }

    #[tokio::test]
    async fn test_backoff_schedule_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(RetryPolicy::is_retryable_status(429));
        assert!(RetryPolicy::is_retryable_status(500));
        assert!(RetryPolicy::is_retryable_status(503));
        assert!(!RetryPolicy::is_retryable_status(400));
        assert!(!RetryPolicy::is_retryable_status(401));
        assert!(!RetryPolicy::is_retryable_status(404));
        assert!(!RetryPolicy::is_retryable_status(502));
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt_after_backoff() {
        let policy = RetryPolicy::default();
        let delays = Arc::new(Mutex::new(Vec::new()));
        let calls = AtomicU32::new(0);

        let result = policy
            .run_with_sleep(
                |_attempt| {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if n < 2 {
                            Err(transient())
                        } else {
                            Ok(42)
                        }
                    }
                },
                recording_sleeper(delays.clone()),
            )
            .await
            .unwrap();

        assert_eq!(result, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Backoff before attempt 3 totals at least 1 + 2 units
        let slept: Duration = delays.lock().unwrap().iter().sum();
        assert!(slept >= Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_gives_up_after_five_attempts() {
        let policy = RetryPolicy::default();
        let delays = Arc::new(Mutex::new(Vec::new()));
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run_with_sleep(
                |_attempt| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(transient()) }
                },
                recording_sleeper(delays.clone()),
            )
            .await;

        assert!(matches!(result, Err(Error::Transient { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        // Four backoffs between five attempts: 1 + 2 + 4 + 8
        assert_eq!(
            delays.lock().unwrap().iter().sum::<Duration>(),
            Duration::from_secs(15)
        );
    }

    #[tokio::test]
    async fn test_terminal_error_is_not_retried() {
        let policy = RetryPolicy::default();
        let delays = Arc::new(Mutex::new(Vec::new()));
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run_with_sleep(
                |_attempt| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async {
                        Err(Error::Remote {
                            status: 400,
                            message: "bad image".into(),
                        })
                    }
                },
                recording_sleeper(delays.clone()),
            )
            .await;

        assert!(matches!(result, Err(Error::Remote { status: 400, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(delays.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_contract_violation_is_not_retried() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run_with_sleep(
                |_attempt| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(Error::MissingField("monthly_volume")) }
                },
                |_d| std::future::ready(()),
            )
            .await;

        assert!(matches!(result, Err(Error::MissingField(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

//! The retry poller.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};

/// Result of one assertion attempt.
///
/// `Fail` means the remote state does not match expectation *yet*, and the
/// attempt will be re-invoked. Attempts must therefore be read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// The assertion holds.
    Pass,
    /// The assertion does not hold yet; carries the observed mismatch.
    Fail(String),
}

impl Check {
    /// Builds a failing check from any displayable reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Check::Fail(reason.into())
    }
}

/// Terminal result of a poll run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The assertion eventually passed.
    Converged {
        /// Number of attempts made, including the passing one.
        attempts: u32,
    },
    /// The wall-clock budget expired without a pass.
    TimedOut {
        /// Number of attempts made.
        attempts: u32,
        /// The mismatch observed on the last attempt.
        last_failure: String,
    },
}

impl PollOutcome {
    /// Returns true if the assertion eventually passed.
    pub fn converged(&self) -> bool {
        matches!(self, PollOutcome::Converged { .. })
    }
}

/// Polls an assertion on a fixed interval until it passes or `max_wait`
/// elapses.
///
/// The first attempt happens immediately, so an already-consistent system
/// incurs no artificial delay. No exponential backoff: the workload is a
/// small number of independent convergence checks, not a load scenario.
#[derive(Debug, Clone)]
pub struct RetryPoller {
    max_wait: Duration,
    interval: Duration,
}

impl Default for RetryPoller {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), Duration::from_millis(500))
    }
}

impl RetryPoller {
    /// Creates a poller with the given wall-clock budget and retry interval.
    pub fn new(max_wait: Duration, interval: Duration) -> Self {
        Self { max_wait, interval }
    }

    /// Evaluates `attempt` until it passes or the budget expires.
    ///
    /// At least one attempt is always made. `Check::Fail` results are
    /// absorbed and retried after `interval`; an `Err` from the attempt is
    /// terminal and propagates without further retries. The wait between
    /// attempts is a cooperative `tokio::time::sleep`, so total elapsed time
    /// is bounded by `max_wait + interval`.
    pub async fn poll_until<F, Fut, E>(
        &self,
        description: &str,
        mut attempt: F,
    ) -> Result<PollOutcome, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Check, E>>,
    {
        let started = Instant::now();
        let mut attempts = 0u32;
        let mut last_failure = String::new();

        loop {
            attempts += 1;
            tracing::debug!(description, attempt = attempts, "evaluating assertion");
            metrics::counter!("poll_attempts_total").increment(1);

            match attempt().await? {
                Check::Pass => {
                    let waited = started.elapsed();
                    metrics::histogram!("convergence_wait_seconds").record(waited.as_secs_f64());
                    if attempts > 1 {
                        tracing::info!(
                            description,
                            attempts,
                            waited_ms = waited.as_millis() as u64,
                            "converged after retry"
                        );
                    }
                    return Ok(PollOutcome::Converged { attempts });
                }
                Check::Fail(reason) => {
                    tracing::debug!(description, attempt = attempts, %reason, "not converged yet");
                    last_failure = reason;
                }
            }

            sleep(self.interval).await;

            if started.elapsed() >= self.max_wait {
                metrics::counter!("poll_timeouts_total").increment(1);
                tracing::warn!(
                    description,
                    attempts,
                    %last_failure,
                    "assertion did not converge within budget"
                );
                return Ok(PollOutcome::TimedOut {
                    attempts,
                    last_failure,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_immediate_pass_makes_single_attempt_without_sleeping() {
        let poller = RetryPoller::new(Duration::from_secs(10), Duration::from_secs(5));
        let started = std::time::Instant::now();

        let outcome = poller
            .poll_until("already consistent", || async { Ok::<_, &str>(Check::Pass) })
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::Converged { attempts: 1 });
        // A pass must return before the 5s interval sleep could have run.
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_converges_after_retries() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let poller = RetryPoller::new(Duration::from_secs(5), Duration::from_millis(20));
        let outcome = poller
            .poll_until("state propagating", || {
                let counter = counter_clone.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Ok::<_, &str>(Check::fail("state is PENDING"))
                    } else {
                        Ok(Check::Pass)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::Converged { attempts: 3 });
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_never_passing_assertion_times_out() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let poller = RetryPoller::new(Duration::from_millis(500), Duration::from_millis(100));
        let started = std::time::Instant::now();

        let outcome = poller
            .poll_until("never converges", || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, &str>(Check::fail("state is PENDING"))
                }
            })
            .await
            .unwrap();

        let elapsed = started.elapsed();
        let attempts = counter.load(Ordering::SeqCst);

        match outcome {
            PollOutcome::TimedOut {
                attempts: reported,
                last_failure,
            } => {
                assert_eq!(reported, attempts);
                assert_eq!(last_failure, "state is PENDING");
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        // ~5 attempts at a 100ms cadence within a 500ms budget.
        assert!((4..=6).contains(&attempts), "attempts = {attempts}");
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(800), "elapsed = {elapsed:?}");
    }

    #[tokio::test]
    async fn test_attempt_error_is_terminal() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let poller = RetryPoller::new(Duration::from_secs(5), Duration::from_millis(10));
        let result = poller
            .poll_until("failing transport", || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<Check, _>("connection refused")
                }
            })
            .await;

        assert_eq!(result, Err("connection refused"));
        // No retry after a terminal error.
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_outcome_converged_predicate() {
        assert!(PollOutcome::Converged { attempts: 1 }.converged());
        assert!(
            !PollOutcome::TimedOut {
                attempts: 3,
                last_failure: "nope".to_string()
            }
            .converged()
        );
    }
}

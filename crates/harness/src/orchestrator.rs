//! Step sequencing for one scenario run.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use poller::{Check, PollOutcome, RetryPoller};
use probe::{ProbeResponse, StatusCode};
use tokio::time::Instant;

use crate::context::RunContext;
use crate::error::HarnessError;
use crate::report::{RunReport, StepKind, StepOutcome, StepReport};
use crate::state::RunState;

/// Checks that an action response carries exactly the required status.
pub fn expect_status(
    step: &str,
    response: &ProbeResponse,
    expected: StatusCode,
) -> Result<(), HarnessError> {
    if response.status == expected {
        Ok(())
    } else {
        Err(HarnessError::UnexpectedStatus {
            step: step.to_string(),
            expected: expected.as_u16(),
            actual: response.status.as_u16(),
        })
    }
}

/// Sequences the steps of one scenario run.
///
/// Owns the run's context, its state machine and its poller. Actions
/// execute exactly once and any failure is fatal; convergence checks are
/// delegated to the poller and only a timeout (or a transport failure) is
/// fatal. The first fatal failure moves the run to `Aborted` and every
/// later step is rejected. No compensation is attempted on abort.
pub struct Orchestrator {
    context: RunContext,
    poller: RetryPoller,
    state: RunState,
    steps: Vec<StepReport>,
    started: Instant,
    run_deadline: Option<Duration>,
}

impl Orchestrator {
    /// Creates an orchestrator for one run.
    ///
    /// `run_deadline` is an optional whole-run safety net on top of the
    /// per-check budgets of `poller`.
    pub fn new(context: RunContext, poller: RetryPoller, run_deadline: Option<Duration>) -> Self {
        metrics::counter!("runs_started_total").increment(1);
        Self {
            context,
            poller,
            state: RunState::Running,
            steps: Vec::new(),
            started: Instant::now(),
            run_deadline,
        }
    }

    /// Returns the run context.
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Returns the run context for updating after an action.
    pub fn context_mut(&mut self) -> &mut RunContext {
        &mut self.context
    }

    /// Returns the current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Executes a mutating action exactly once.
    ///
    /// Actions are assumed synchronous: an unexpected status, a missing
    /// field or a transport failure aborts the run immediately, and no
    /// retry is ever attempted.
    pub async fn run_action<T, Fut>(&mut self, name: &str, action: Fut) -> Result<T, HarnessError>
    where
        Fut: Future<Output = Result<T, HarnessError>>,
    {
        self.ensure_accepting()?;
        tracing::info!(run_id = %self.context.run_id(), step = name, "action started");
        let started_at = Utc::now();
        let t0 = Instant::now();

        let result = action.await;
        self.record(
            name,
            StepKind::Action,
            started_at,
            t0.elapsed(),
            result.as_ref().err(),
        );
        result
    }

    /// Polls a read-only assertion until it holds or the poller's budget
    /// expires.
    ///
    /// `Check::Fail` results are absorbed and retried; a timeout or a
    /// transport failure aborts the run.
    pub async fn run_convergence_check<F, Fut>(
        &mut self,
        name: &str,
        description: &str,
        attempt: F,
    ) -> Result<(), HarnessError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Check, HarnessError>>,
    {
        self.ensure_accepting()?;
        tracing::info!(
            run_id = %self.context.run_id(),
            step = name,
            description,
            "convergence check started"
        );
        let started_at = Utc::now();
        let t0 = Instant::now();

        let result = match self.poller.poll_until(description, attempt).await {
            Ok(PollOutcome::Converged { .. }) => Ok(()),
            Ok(PollOutcome::TimedOut { last_failure, .. }) => Err(HarnessError::PollTimeout {
                step: name.to_string(),
                description: description.to_string(),
                last_failure,
            }),
            Err(e) => Err(e),
        };
        self.record(
            name,
            StepKind::ConvergenceCheck,
            started_at,
            t0.elapsed(),
            result.as_ref().err(),
        );
        result
    }

    /// Ends the run and returns its report. A run that is still `Running`
    /// becomes `Finished`; an aborted run stays `Aborted`.
    pub fn finish(mut self) -> RunReport {
        if self.state.accepts_steps() {
            self.state = RunState::Finished;
            metrics::counter!("runs_completed_total").increment(1);
            tracing::info!(
                run_id = %self.context.run_id(),
                steps = self.steps.len(),
                "run finished"
            );
        }
        RunReport {
            run_id: self.context.run_id(),
            state: self.state,
            context: self.context,
            steps: self.steps,
        }
    }

    fn ensure_accepting(&mut self) -> Result<(), HarnessError> {
        if !self.state.accepts_steps() {
            return Err(HarnessError::RunTerminated(self.state));
        }
        if let Some(deadline) = self.run_deadline {
            let elapsed = self.started.elapsed();
            if elapsed >= deadline {
                self.state = RunState::Aborted;
                metrics::counter!("runs_aborted_total").increment(1);
                tracing::warn!(
                    run_id = %self.context.run_id(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "run deadline exceeded"
                );
                return Err(HarnessError::DeadlineExceeded { elapsed });
            }
        }
        Ok(())
    }

    fn record(
        &mut self,
        name: &str,
        kind: StepKind,
        started_at: chrono::DateTime<Utc>,
        duration: Duration,
        error: Option<&HarnessError>,
    ) {
        metrics::histogram!("step_duration_seconds").record(duration.as_secs_f64());
        let outcome = match error {
            None => {
                tracing::info!(
                    step = name,
                    duration_ms = duration.as_millis() as u64,
                    "step succeeded"
                );
                StepOutcome::Succeeded
            }
            Some(e) => {
                self.state = RunState::Aborted;
                metrics::counter!("runs_aborted_total").increment(1);
                tracing::warn!(step = name, error = %e, "step failed, aborting run");
                StepOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        self.steps.push(StepReport {
            name: name.to_string(),
            kind,
            started_at,
            duration,
            outcome,
        });
    }
}

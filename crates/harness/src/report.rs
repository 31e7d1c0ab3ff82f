//! Run reports.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::context::RunContext;
use crate::state::RunState;

/// The kind of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepKind {
    /// A mutating request expected to succeed synchronously.
    Action,
    /// A polled read-only assertion.
    ConvergenceCheck,
}

/// How a step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// The step completed.
    Succeeded,
    /// The step failed and aborted the run.
    Failed { error: String },
}

/// Record of one executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub name: String,
    pub kind: StepKind,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub outcome: StepOutcome,
}

impl StepReport {
    /// Returns true if the step completed.
    pub fn succeeded(&self) -> bool {
        self.outcome == StepOutcome::Succeeded
    }
}

/// Full record of one scenario run: final state, the context accumulated by
/// its actions, and one entry per executed step in order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub state: RunState,
    pub context: RunContext,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    /// Returns true if the run finished with every step succeeding.
    pub fn succeeded(&self) -> bool {
        self.state == RunState::Finished && self.steps.iter().all(StepReport::succeeded)
    }

    /// Returns the first failed step, if any.
    pub fn failed_step(&self) -> Option<&StepReport> {
        self.steps.iter().find(|s| !s.succeeded())
    }

    /// Returns the executed step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ScenarioSeed;

    fn step(name: &str, outcome: StepOutcome) -> StepReport {
        StepReport {
            name: name.to_string(),
            kind: StepKind::Action,
            started_at: Utc::now(),
            duration: Duration::from_millis(5),
            outcome,
        }
    }

    #[test]
    fn test_succeeded_requires_finished_state() {
        let ctx = RunContext::new(ScenarioSeed::default());
        let report = RunReport {
            run_id: ctx.run_id(),
            state: RunState::Aborted,
            context: ctx,
            steps: vec![step("create_consumer", StepOutcome::Succeeded)],
        };
        assert!(!report.succeeded());
        assert!(report.failed_step().is_none());
    }

    #[test]
    fn test_failed_step_is_first_failure() {
        let ctx = RunContext::new(ScenarioSeed::default());
        let report = RunReport {
            run_id: ctx.run_id(),
            state: RunState::Aborted,
            context: ctx,
            steps: vec![
                step("create_consumer", StepOutcome::Succeeded),
                step(
                    "create_order",
                    StepOutcome::Failed {
                        error: "expected status 200, got 500".to_string(),
                    },
                ),
            ],
        };
        assert!(!report.succeeded());
        assert_eq!(report.failed_step().unwrap().name, "create_order");
        assert_eq!(report.step_names(), vec!["create_consumer", "create_order"]);
    }
}

//! Harness error types.

use std::time::Duration;

use probe::ProbeError;
use thiserror::Error;

use crate::state::RunState;

/// Errors that abort a harness run.
///
/// Every variant is fatal for the run it occurs in. Convergence-check
/// mismatches are *not* errors; they are absorbed by the poller and only
/// surface here as [`HarnessError::PollTimeout`] once the budget expires.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Transport failure or unusable response body.
    #[error("probe failed: {0}")]
    Probe(#[from] ProbeError),

    /// An action received a status code other than the one it requires.
    #[error("step '{step}': expected status {expected}, got {actual}")]
    UnexpectedStatus {
        step: String,
        expected: u16,
        actual: u16,
    },

    /// A convergence check did not pass within its budget.
    #[error("step '{step}': '{description}' did not converge; last observed: {last_failure}")]
    PollTimeout {
        step: String,
        description: String,
        last_failure: String,
    },

    /// A step referenced an entity no earlier action has created.
    #[error("entity '{0}' has not been created in this run")]
    MissingEntity(&'static str),

    /// The whole-run deadline elapsed.
    #[error("run deadline exceeded after {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },

    /// A step was submitted to a run that already ended.
    #[error("run is already {0}, no further steps accepted")]
    RunTerminated(RunState),
}

/// Convenience type alias for harness results.
pub type Result<T> = std::result::Result<T, HarnessError>;

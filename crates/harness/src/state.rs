//! Run state machine.

use serde::{Deserialize, Serialize};

/// The state of one scenario run.
///
/// State transitions:
/// ```text
/// Running ──┬──► Finished
///           └──► Aborted
/// ```
/// Both `Finished` and `Aborted` are terminal; a terminated run accepts no
/// further steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RunState {
    /// Steps are being executed.
    #[default]
    Running,

    /// All steps completed (terminal state).
    Finished,

    /// A fatal failure ended the run early (terminal state).
    Aborted,
}

impl RunState {
    /// Returns true if the run can accept another step.
    pub fn accepts_steps(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Finished | RunState::Aborted)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Running => "Running",
            RunState::Finished => "Finished",
            RunState::Aborted => "Aborted",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Observable order state machine.

use serde::{Deserialize, Serialize};

/// The state of an order as observed through `GET /orders/{id}`.
///
/// Observed transitions:
/// ```text
/// PENDING ──┬──► APPROVED ──► CANCELLED
///           └──► REJECTED
/// ```
/// This is the closed set the harness can see from outside; a revision
/// leaves an approved order in `APPROVED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Order created, authorization still propagating.
    Pending,

    /// Order authorized by the accounting service.
    Approved,

    /// Order was cancelled (terminal state).
    Cancelled,

    /// Authorization was rejected (terminal state).
    Rejected,
}

impl OrderState {
    /// Returns true if the order can be revised in this state.
    pub fn can_revise(&self) -> bool {
        matches!(self, OrderState::Approved)
    }

    /// Returns true if the order can be cancelled in this state.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderState::Pending | OrderState::Approved)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Cancelled | OrderState::Rejected)
    }

    /// Returns the wire representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Pending => "PENDING",
            OrderState::Approved => "APPROVED",
            OrderState::Cancelled => "CANCELLED",
            OrderState::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

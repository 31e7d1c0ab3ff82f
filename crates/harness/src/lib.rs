//! Verification harness for saga-driven workflows on eventually-consistent
//! services.
//!
//! The harness drives a multi-step business transaction over HTTP and
//! asserts that it converges to the expected state. Steps come in two
//! kinds:
//! 1. *Actions* mutate remote state and must succeed synchronously on the
//!    first try.
//! 2. *Convergence checks* poll a read-only assertion until it holds or a
//!    budget expires.
//!
//! Every mutating action on an eventually-consistent backend is followed by
//! a convergence check before its output is trusted as input to the next
//! action; the [`Orchestrator`] sequences the steps and aborts the run on
//! the first fatal failure. No compensation is issued on abort: the
//! services under test own their own compensating transactions.

pub mod config;
pub mod context;
pub mod endpoints;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod scenario;
pub mod state;
pub mod steps;

pub use config::HarnessConfig;
pub use context::{RunContext, ScenarioSeed};
pub use error::HarnessError;
pub use orchestrator::{Orchestrator, expect_status};
pub use report::{RunReport, StepKind, StepOutcome, StepReport};
pub use scenario::{OrderSagaScenario, Scenario};
pub use state::RunState;

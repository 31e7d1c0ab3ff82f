//! Convergence polling for eventually-consistent systems.
//!
//! A [`RetryPoller`] repeatedly evaluates a read-only assertion against
//! remote state until it holds or a wall-clock budget expires. Assertions
//! report [`Check::Fail`] while the system is still propagating; the poller
//! absorbs those and retries on a fixed interval. Errors (transport
//! failures and the like) are not absorbed; they propagate immediately.

pub mod poller;

pub use poller::{Check, PollOutcome, RetryPoller};

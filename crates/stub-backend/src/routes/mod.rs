//! HTTP route handlers, one module per stub service.

pub mod accounts;
pub mod consumers;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod restaurants;

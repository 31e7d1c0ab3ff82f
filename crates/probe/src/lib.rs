//! Single-attempt HTTP/JSON probing.
//!
//! A probe issues exactly one request and reports what it saw: the status
//! code and the parsed JSON body. Non-2xx statuses are data, not errors;
//! the caller owns pass/fail semantics. Retrying belongs to the poller, not
//! here.

pub mod error;
pub mod probe;
pub mod response;

pub use error::ProbeError;
pub use probe::HttpProbe;
pub use response::ProbeResponse;

// The HTTP vocabulary callers need to talk about probes.
pub use reqwest::{Method, StatusCode};

//! Observability subsystem
//!
//! Structured JSON logging for server lifecycle and request-path events.
//! Logging is synchronous and has no side effects on execution.

mod logger;

pub use logger::{Logger, Severity};

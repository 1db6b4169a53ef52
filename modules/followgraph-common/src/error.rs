use thiserror::Error;

/// Cooperative shutdown signal.
///
/// Raised by any blocking operation that observes the lifecycle flip to
/// CLOSED. It is the one condition allowed to break an otherwise unbounded
/// retry loop, and it is never a failure: callers treat it as a clean stop
/// and must not log it as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("consumer is shutting down")]
pub struct Closed;

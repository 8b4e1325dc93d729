//! Error types for fleetdispatch

use thiserror::Error;

/// Main error type for dispatch operations.
///
/// A solver timeout is deliberately absent: it is a recoverable solve
/// outcome consumed by the feasibility-repair loop, not an error surfaced
/// to callers.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A referenced location, vehicle or order does not exist in the world
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Engine operation called out of sequence
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// No feasible assignment found within the bounded relaxation retries
    #[error("no feasible assignment after {attempts} attempts (last relaxation factor {factor})")]
    RelaxationExhausted {
        /// Number of build-and-solve attempts made.
        attempts: u32,
        /// Relaxation factor in effect on the last attempt.
        factor: f64,
    },
}

impl DispatchError {
    /// Convenience constructor for configuration errors.
    pub fn configuration(msg: impl Into<String>) -> Self {
        DispatchError::Configuration(msg.into())
    }

    /// Convenience constructor for protocol violations.
    pub fn protocol(msg: impl Into<String>) -> Self {
        DispatchError::ProtocolViolation(msg.into())
    }
}

/// Result type alias for dispatch operations
pub type Result<T> = std::result::Result<T, DispatchError>;

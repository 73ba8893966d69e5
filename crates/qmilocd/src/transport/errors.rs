//! Error types reported by transport collaborators.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single transport request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete within its bounded wait.
    #[error("{operation} timed out after {} ms", timeout.as_millis())]
    Timeout {
        /// Request that timed out.
        operation: &'static str,
        /// Wait that elapsed.
        timeout: Duration,
    },
    /// The remote end rejected or failed the request.
    #[error("{operation} failed: {message}")]
    Failed {
        /// Request that failed.
        operation: &'static str,
        /// Description supplied by the transport.
        message: String,
    },
    /// The transport is not usable in this process.
    #[error("transport unavailable: {message}")]
    Unavailable {
        /// Reason the transport cannot be used.
        message: String,
    },
}

impl TransportError {
    /// Builds a [`TransportError::Failed`] value.
    #[must_use]
    pub fn failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            operation,
            message: message.into(),
        }
    }
}

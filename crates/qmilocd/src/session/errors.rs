//! Failures of the session bootstrap and release.

use thiserror::Error;

use super::machine::SessionStage;
use crate::transport::{ServiceId, StartRequestError, TransportError};

/// Why the session start stage failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StartFailure {
    /// The start request could not be built; nothing was submitted.
    #[error("invalid start request: {0}")]
    Request(#[from] StartRequestError),
    /// The transport failed the submitted request.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors raised while establishing or releasing the positioning session.
///
/// Every bootstrap variant is terminal for the process run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Connecting to the service-discovery bus failed.
    #[error("bus unavailable: {source}")]
    BusUnavailable {
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },
    /// No node on the bus exposes the positioning service.
    #[error("service {service} not found on any of {nodes} bus nodes")]
    ServiceNotFound {
        /// Service that was looked up.
        service: ServiceId,
        /// Number of nodes inspected.
        nodes: usize,
    },
    /// Creating or opening the device failed.
    #[error("failed to open device: {source}")]
    DeviceOpenFailed {
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },
    /// Allocating the positioning client failed.
    #[error("failed to allocate positioning client: {source}")]
    ClientAllocationFailed {
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },
    /// Enabling position report delivery failed.
    #[error("failed to register position report events: {source}")]
    EventRegistrationFailed {
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },
    /// Starting the positioning session failed.
    #[error("failed to start positioning session: {source}")]
    SessionStartFailed {
        /// Underlying failure.
        #[source]
        source: StartFailure,
    },
    /// Releasing the positioning client at shutdown failed.
    #[error("failed to release positioning client: {source}")]
    ReleaseFailed {
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },
}

impl SessionError {
    /// Bootstrap stage the error belongs to. Release failures happen after
    /// bootstrap and have none.
    #[must_use]
    pub const fn stage(&self) -> Option<SessionStage> {
        match self {
            Self::BusUnavailable { .. } => Some(SessionStage::Connecting),
            Self::ServiceNotFound { .. } => Some(SessionStage::Discovering),
            Self::DeviceOpenFailed { .. } => Some(SessionStage::OpeningDevice),
            Self::ClientAllocationFailed { .. } => Some(SessionStage::AllocatingClient),
            Self::EventRegistrationFailed { .. } => Some(SessionStage::RegisteringEvents),
            Self::SessionStartFailed { .. } => Some(SessionStage::Starting),
            Self::ReleaseFailed { .. } => None,
        }
    }
}

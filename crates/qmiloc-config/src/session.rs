//! Session tuning derived from the loaded configuration.

use std::time::Duration;

use thiserror::Error;

/// Bounded waits applied to each request submitted to the modem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimeouts {
    /// Wait for the service-discovery bus to connect.
    pub bus_connect: Duration,
    /// Wait for the device to open.
    pub device_open: Duration,
    /// Wait for the positioning client to be allocated.
    pub client_allocate: Duration,
    /// Wait for event registration and session start.
    pub request: Duration,
    /// Wait for the client release issued at shutdown.
    pub release: Duration,
}

/// Parameters of the periodic positioning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionParameters {
    /// Fixed session identifier.
    pub session_id: u8,
    /// Minimum time between two reports.
    pub min_report_interval: Duration,
}

/// Errors raised when the configured session parameters are unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionConfigError {
    /// A bounded wait was configured as zero.
    #[error("timeout '{name}' must be greater than zero")]
    ZeroTimeout {
        /// Configuration key holding the zero value.
        name: &'static str,
    },
}

impl SessionTimeouts {
    /// Rejects zero waits, which the transport would treat as an immediate
    /// timeout.
    pub fn validate(&self) -> Result<(), SessionConfigError> {
        let checks = [
            ("bus_timeout_ms", self.bus_connect),
            ("device_open_timeout_secs", self.device_open),
            ("client_timeout_secs", self.client_allocate),
            ("request_timeout_secs", self.request),
            ("release_timeout_secs", self.release),
        ];
        match checks.iter().find(|(_, wait)| wait.is_zero()) {
            Some((name, _)) => Err(SessionConfigError::ZeroTimeout { name: *name }),
            None => Ok(()),
        }
    }
}

//! Layered configuration for the modem location daemon.
//!
//! Values are resolved by `ortho_config` from built-in defaults, an optional
//! TOML file (`--config-path` or `QMILOC_CONFIG_PATH`), `QMILOC_*` environment
//! variables and finally command-line flags, later layers winning.

mod defaults;
mod logging;
mod session;

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_BUS_TIMEOUT_MS, DEFAULT_CLIENT_TIMEOUT_SECS, DEFAULT_DEVICE_OPEN_TIMEOUT_SECS,
    DEFAULT_LOG_FILTER, DEFAULT_MIN_REPORT_INTERVAL_MS, DEFAULT_RELEASE_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SESSION_ID, default_log_filter,
    default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use session::{SessionConfigError, SessionParameters, SessionTimeouts};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "QMILOC")]
pub struct Config {
    /// `tracing` filter directive applied to daemon logs.
    #[serde(default = "defaults::default_log_filter_string")]
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Output format for daemon logs.
    #[serde(default = "defaults::default_log_format")]
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Wait for the service-discovery bus, in milliseconds.
    #[serde(default = "defaults::default_bus_timeout_ms")]
    #[ortho_config(default = defaults::DEFAULT_BUS_TIMEOUT_MS)]
    pub bus_timeout_ms: u64,
    /// Wait for the device to open, in seconds.
    #[serde(default = "defaults::default_device_open_timeout_secs")]
    #[ortho_config(default = defaults::DEFAULT_DEVICE_OPEN_TIMEOUT_SECS)]
    pub device_open_timeout_secs: u64,
    /// Wait for the positioning client allocation, in seconds.
    #[serde(default = "defaults::default_client_timeout_secs")]
    #[ortho_config(default = defaults::DEFAULT_CLIENT_TIMEOUT_SECS)]
    pub client_timeout_secs: u64,
    /// Wait for event registration and session start, in seconds.
    #[serde(default = "defaults::default_request_timeout_secs")]
    #[ortho_config(default = defaults::DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
    /// Wait for the client release at shutdown, in seconds.
    #[serde(default = "defaults::default_release_timeout_secs")]
    #[ortho_config(default = defaults::DEFAULT_RELEASE_TIMEOUT_SECS)]
    pub release_timeout_secs: u64,
    /// Identifier of the periodic positioning session.
    #[serde(default = "defaults::default_session_id")]
    #[ortho_config(default = defaults::DEFAULT_SESSION_ID)]
    pub session_id: u8,
    /// Minimum interval between position reports, in milliseconds.
    #[serde(default = "defaults::default_min_report_interval_ms")]
    #[ortho_config(default = defaults::DEFAULT_MIN_REPORT_INTERVAL_MS)]
    pub min_report_interval_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            bus_timeout_ms: DEFAULT_BUS_TIMEOUT_MS,
            device_open_timeout_secs: DEFAULT_DEVICE_OPEN_TIMEOUT_SECS,
            client_timeout_secs: DEFAULT_CLIENT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            release_timeout_secs: DEFAULT_RELEASE_TIMEOUT_SECS,
            session_id: DEFAULT_SESSION_ID,
            min_report_interval_ms: DEFAULT_MIN_REPORT_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Filter directive for the telemetry subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format for the telemetry subscriber.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Bounded waits grouped per request kind.
    #[must_use]
    pub fn timeouts(&self) -> SessionTimeouts {
        SessionTimeouts {
            bus_connect: Duration::from_millis(self.bus_timeout_ms),
            device_open: Duration::from_secs(self.device_open_timeout_secs),
            client_allocate: Duration::from_secs(self.client_timeout_secs),
            request: Duration::from_secs(self.request_timeout_secs),
            release: Duration::from_secs(self.release_timeout_secs),
        }
    }

    /// Parameters of the periodic positioning session.
    #[must_use]
    pub fn session_parameters(&self) -> SessionParameters {
        SessionParameters {
            session_id: self.session_id,
            min_report_interval: Duration::from_millis(u64::from(self.min_report_interval_ms)),
        }
    }
}

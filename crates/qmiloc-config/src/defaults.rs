//! Built-in defaults shared by [`Config::default`](crate::Config) and the
//! layered loader.

use crate::logging::LogFormat;

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Bounded wait for connecting to the service-discovery bus.
pub const DEFAULT_BUS_TIMEOUT_MS: u64 = 1000;

/// Bounded wait for opening the modem device.
pub const DEFAULT_DEVICE_OPEN_TIMEOUT_SECS: u64 = 15;

/// Bounded wait for allocating the positioning client.
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 10;

/// Bounded wait for event registration and session start requests.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Bounded wait for releasing the positioning client at shutdown.
pub const DEFAULT_RELEASE_TIMEOUT_SECS: u64 = 10;

/// Session identifier used when starting periodic fixes.
pub const DEFAULT_SESSION_ID: u8 = 2;

/// Minimum interval between two position reports.
pub const DEFAULT_MIN_REPORT_INTERVAL_MS: u32 = 1000;

/// Default log filter expression used by the daemon.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the daemon.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

pub(crate) fn default_bus_timeout_ms() -> u64 {
    DEFAULT_BUS_TIMEOUT_MS
}

pub(crate) fn default_device_open_timeout_secs() -> u64 {
    DEFAULT_DEVICE_OPEN_TIMEOUT_SECS
}

pub(crate) fn default_client_timeout_secs() -> u64 {
    DEFAULT_CLIENT_TIMEOUT_SECS
}

pub(crate) fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

pub(crate) fn default_release_timeout_secs() -> u64 {
    DEFAULT_RELEASE_TIMEOUT_SECS
}

pub(crate) fn default_session_id() -> u8 {
    DEFAULT_SESSION_ID
}

pub(crate) fn default_min_report_interval_ms() -> u32 {
    DEFAULT_MIN_REPORT_INTERVAL_MS
}

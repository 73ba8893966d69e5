//! Structured logging for the location daemon.
//!
//! A bare level such as `debug` applies to the daemon's own targets
//! (`qmilocd`, `qmilocd::session`, `qmilocd::transport` and so on) while
//! every other crate stays at `warn`. Any expression containing a directive
//! is handed to [`EnvFilter`] unchanged.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use qmiloc_config::{Config, LogFormat};

const DAEMON_TARGET: &str = env!("CARGO_PKG_NAME");

static LOGGING: OnceCell<LogFormat> = OnceCell::new();

/// Proof that the global subscriber is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Output format chosen by the first successful installation.
    #[must_use]
    pub const fn format(self) -> LogFormat {
        self.format
    }
}

/// Reasons the daemon could not set up logging.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `log_filter` is neither a level nor a valid directive list.
    #[error("invalid log filter `{expression}`: {reason}")]
    Filter {
        /// Expression as configured.
        expression: String,
        /// Parser message.
        reason: String,
    },
    /// Another global subscriber was installed first.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the daemon's global subscriber once per process.
///
/// Repeated bootstraps in the same process reuse the first installation.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    LOGGING
        .get_or_try_init(|| install(config))
        .map(|format| TelemetryHandle { format: *format })
}

fn install(config: &Config) -> Result<LogFormat, TelemetryError> {
    let format = config.log_format();
    let dispatch = dispatch_for(daemon_filter(config.log_filter())?, format);
    tracing::dispatcher::set_global_default(dispatch).map_err(TelemetryError::Subscriber)?;
    Ok(format)
}

fn daemon_filter(expression: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives(expression)?).map_err(|error| TelemetryError::Filter {
        expression: expression.to_owned(),
        reason: error.to_string(),
    })
}

/// Expands a bare level into directives scoped to the daemon's targets.
fn directives(expression: &str) -> Result<String, TelemetryError> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(TelemetryError::Filter {
            expression: expression.to_owned(),
            reason: String::from("expression is empty"),
        });
    }
    if LevelFilter::from_str(trimmed).is_ok() {
        let level = trimmed.to_ascii_lowercase();
        return Ok(format!("warn,{DAEMON_TARGET}={level}"));
    }
    Ok(trimmed.to_owned())
}

fn dispatch_for(filter: EnvFilter, format: LogFormat) -> Dispatch {
    // The signal forwarder logs from its own named thread.
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());
    match format {
        LogFormat::Json => Dispatch::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Dispatch::new(builder.compact().finish()),
    }
}

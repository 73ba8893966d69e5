//! Modem location-service adapter.
//!
//! The daemon discovers the positioning service on the local QRTR bus, opens
//! the modem device that hosts it and establishes a periodic positioning
//! session through an ordered chain of stages: bus connection, node
//! discovery, device open, client allocation, event registration and session
//! start. Position reports produced by that session are cached and
//! republished through a provider facade that answers status, position and
//! velocity queries and announces changes to a [`LocationSink`].
//!
//! Bus and device access sit behind the [`LocationTransport`] trait. Requests
//! never block: their results are posted back onto a single-threaded
//! [`Runtime`] that serializes completions, reports, queries and shutdown.
//! Every stage failure is terminal and leaves the provider in
//! [`qmiloc_types::Status::Error`]. At shutdown the positioning client is
//! released at most once before the loop quits.

mod bootstrap;
mod health;
mod process;
pub mod provider;
pub mod report;
pub mod runtime;
pub mod session;
pub mod subscription;
mod telemetry;
pub mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon};
pub use provider::{
    LocationProvider, LocationSink, ProviderDetails, ProviderOptions, StructuredLocationSink,
};
pub use report::PositionReport;
pub use runtime::{LoopError, ProviderHandle, Runtime};
pub use session::{SessionError, SessionStage, SessionState};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{LocationTransport, TransportError, UnsupportedTransport};

#[cfg(test)]
mod tests;

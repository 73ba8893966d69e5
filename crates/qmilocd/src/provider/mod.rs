//! Provider facade: queries and change notifications over the report cache.
//!
//! [`LocationProvider`] is what the publishing layer talks to. Queries return
//! snapshots of [`ProviderState`] taken at call time and never fail. Status
//! changes and ingested reports are pushed to a [`LocationSink`]; a status
//! event fires only when the value actually changes.

mod cache;
mod sink;

use std::collections::BTreeMap;

use qmiloc_types::{PositionFix, Status, VelocityFix};

pub use self::cache::{Ingested, ProviderState};
pub use self::sink::{LocationSink, StructuredLocationSink};

use crate::report::PositionReport;

pub(crate) const PROVIDER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::provider");

/// Options accepted by [`LocationProvider::set_options`].
pub type ProviderOptions = BTreeMap<String, String>;

/// Identification published alongside the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDetails {
    /// Well-known service name.
    pub service: &'static str,
    /// Object path of the provider.
    pub path: &'static str,
    /// Short provider name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

impl ProviderDetails {
    /// Details of the modem location provider.
    pub const QMI: Self = Self {
        service: "org.freedesktop.Geoclue.Providers.Qmi",
        path: "/org/freedesktop/Geoclue/Providers/Qmi",
        name: "Qmi",
        description: "Qmi Loc provider",
    };
}

/// Location provider built on the report cache.
#[derive(Debug)]
pub struct LocationProvider<S> {
    state: ProviderState,
    sink: S,
    details: ProviderDetails,
}

impl<S> LocationProvider<S>
where
    S: LocationSink,
{
    /// Builds a provider in the acquiring state.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self {
            state: ProviderState::new(),
            sink,
            details: ProviderDetails::QMI,
        }
    }

    /// Identification details.
    #[must_use]
    pub const fn details(&self) -> &ProviderDetails {
        &self.details
    }

    /// Current status.
    #[must_use]
    pub const fn get_status(&self) -> Status {
        self.state.status()
    }

    /// Last position snapshot.
    #[must_use]
    pub fn get_position(&self) -> PositionFix {
        self.state.position()
    }

    /// Last velocity snapshot.
    #[must_use]
    pub fn get_velocity(&self) -> VelocityFix {
        self.state.velocity()
    }

    /// Accepts provider options. No option is currently honoured.
    pub fn set_options(&mut self, options: &ProviderOptions) {
        tracing::debug!(
            target: PROVIDER_TARGET,
            count = options.len(),
            "ignoring provider options: not implemented"
        );
    }

    /// Updates the status, notifying the sink when it changed.
    pub fn set_status(&mut self, status: Status) {
        if self.state.set_status(status) {
            self.sink.status_changed(status);
        }
    }

    /// Ingests a report and emits the resulting change events.
    pub fn ingest(&mut self, report: &PositionReport) {
        let Ingested { position, velocity } = self.state.ingest(report);
        if let Some(fix) = position {
            self.sink.position_changed(&fix);
        }
        if let Some(fix) = velocity {
            self.sink.velocity_changed(&fix);
        }
    }

    /// Read-only view of the cached state.
    #[must_use]
    pub const fn state(&self) -> &ProviderState {
        &self.state
    }

    /// Sink receiving change events.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }
}

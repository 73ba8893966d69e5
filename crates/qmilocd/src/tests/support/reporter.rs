//! Test double for [`HealthReporter`] that records structured events for assertions.
//!
//! The recorder captures bootstrap and session lifecycle telemetry so tests
//! can validate the order of observable events.

use std::sync::Mutex;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::session::{SessionError, SessionStage};

use qmiloc_config::Config;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    StageStarting(SessionStage),
    SessionAvailable,
    SessionFailed {
        stage: Option<SessionStage>,
        message: String,
    },
    ReleaseStarting,
    ReleaseCompleted,
    ReleaseFailed(String),
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    /// Stages reported as starting, in order.
    #[must_use]
    pub fn stages(&self) -> Vec<SessionStage> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HealthEvent::StageStarting(stage) => Some(stage),
                _ => None,
            })
            .collect()
    }

    pub fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn stage_starting(&self, stage: SessionStage) {
        self.record(HealthEvent::StageStarting(stage));
    }

    fn session_available(&self) {
        self.record(HealthEvent::SessionAvailable);
    }

    fn session_failed(&self, error: &SessionError) {
        self.record(HealthEvent::SessionFailed {
            stage: error.stage(),
            message: error.to_string(),
        });
    }

    fn release_starting(&self) {
        self.record(HealthEvent::ReleaseStarting);
    }

    fn release_completed(&self) {
        self.record(HealthEvent::ReleaseCompleted);
    }

    fn release_failed(&self, error: &SessionError) {
        self.record(HealthEvent::ReleaseFailed(error.to_string()));
    }
}

//! Structured health reporting for daemon lifecycle events.

use std::sync::Arc;

use crate::bootstrap::BootstrapError;
use crate::session::{SessionError, SessionStage};

use qmiloc_config::Config;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

const QRTR_ACCESS_HINT: &str =
    "grant the daemon access to the AF_QIPCRTR address family (socket creation is denied otherwise)";

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked before a session stage submits its request.
    fn stage_starting(&self, stage: SessionStage);

    /// Invoked once the positioning session is running.
    fn session_available(&self);

    /// Invoked when a session stage fails.
    fn session_failed(&self, error: &SessionError);

    /// Invoked when the client release is submitted at shutdown.
    fn release_starting(&self);

    /// Invoked when the client release succeeds.
    fn release_completed(&self);

    /// Invoked when the client release fails.
    fn release_failed(&self, error: &SessionError);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn stage_starting(&self, stage: SessionStage) {
        (**self).stage_starting(stage);
    }

    fn session_available(&self) {
        (**self).session_available();
    }

    fn session_failed(&self, error: &SessionError) {
        (**self).session_failed(error);
    }

    fn release_starting(&self) {
        (**self).release_starting();
    }

    fn release_completed(&self) {
        (**self).release_completed();
    }

    fn release_failed(&self, error: &SessionError) {
        (**self).release_failed(error);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting daemon bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            session_id = config.session_id,
            min_report_interval_ms = config.min_report_interval_ms,
            "daemon bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "daemon bootstrap failed"
        );
    }

    fn stage_starting(&self, stage: SessionStage) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "stage_starting",
            stage = %stage,
            "starting session stage"
        );
    }

    fn session_available(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "session_available",
            "positioning session started"
        );
    }

    fn session_failed(&self, error: &SessionError) {
        let stage = error.stage().map(|stage| stage.to_string());
        if matches!(error, SessionError::BusUnavailable { .. }) {
            tracing::error!(
                target: HEALTH_TARGET,
                event = "session_failed",
                stage = stage.as_deref(),
                error = %error,
                hint = QRTR_ACCESS_HINT,
                "positioning session failed"
            );
        } else {
            tracing::error!(
                target: HEALTH_TARGET,
                event = "session_failed",
                stage = stage.as_deref(),
                error = %error,
                "positioning session failed"
            );
        }
    }

    fn release_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "release_starting",
            "releasing positioning client"
        );
    }

    fn release_completed(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "release_completed",
            "positioning client released"
        );
    }

    fn release_failed(&self, error: &SessionError) {
        tracing::warn!(
            target: HEALTH_TARGET,
            event = "release_failed",
            error = %error,
            "positioning client release failed"
        );
    }
}

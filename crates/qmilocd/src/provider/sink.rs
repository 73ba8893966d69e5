//! Outbound change notifications.

use qmiloc_types::{PositionFix, Status, VelocityFix};

use super::PROVIDER_TARGET;

/// Receiver of provider change events.
///
/// Implementations publish the events to consumers. Calls are made from the
/// event loop and must not block.
pub trait LocationSink {
    /// The provider status changed.
    fn status_changed(&mut self, status: Status);

    /// A report carried at least one position attribute.
    fn position_changed(&mut self, fix: &PositionFix);

    /// A report carried at least one velocity attribute.
    fn velocity_changed(&mut self, fix: &VelocityFix);
}

/// Sink that records change events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredLocationSink;

impl StructuredLocationSink {
    /// Builds a new sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LocationSink for StructuredLocationSink {
    fn status_changed(&mut self, status: Status) {
        tracing::info!(
            target: PROVIDER_TARGET,
            event = "status_changed",
            %status,
            "provider status changed"
        );
    }

    fn position_changed(&mut self, fix: &PositionFix) {
        tracing::debug!(
            target: PROVIDER_TARGET,
            event = "position_changed",
            fields = %fix.fields,
            timestamp = fix.timestamp,
            latitude = fix.latitude,
            longitude = fix.longitude,
            altitude = fix.altitude,
            accuracy_horizontal = fix.accuracy.horizontal(),
            accuracy_vertical = fix.accuracy.vertical(),
            "position updated"
        );
    }

    fn velocity_changed(&mut self, fix: &VelocityFix) {
        tracing::debug!(
            target: PROVIDER_TARGET,
            event = "velocity_changed",
            fields = %fix.fields,
            timestamp = fix.timestamp,
            speed = fix.speed,
            direction = fix.direction,
            climb = fix.climb,
            "velocity updated"
        );
    }
}

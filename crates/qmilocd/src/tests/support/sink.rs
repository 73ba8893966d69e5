//! Test double for [`LocationSink`] that keeps every change event.

use qmiloc_types::{PositionFix, Status, VelocityFix};

use crate::provider::LocationSink;

/// Change event captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Status(Status),
    Position(PositionFix),
    Velocity(VelocityFix),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn statuses(&self) -> Vec<Status> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Status(status) => Some(*status),
                _ => None,
            })
            .collect()
    }

    pub fn positions(&self) -> Vec<&PositionFix> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Position(fix) => Some(fix),
                _ => None,
            })
            .collect()
    }

    pub fn velocities(&self) -> Vec<&VelocityFix> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Velocity(fix) => Some(fix),
                _ => None,
            })
            .collect()
    }
}

impl LocationSink for RecordingSink {
    fn status_changed(&mut self, status: Status) {
        self.events.push(SinkEvent::Status(status));
    }

    fn position_changed(&mut self, fix: &PositionFix) {
        self.events.push(SinkEvent::Position(fix.clone()));
    }

    fn velocity_changed(&mut self, fix: &VelocityFix) {
        self.events.push(SinkEvent::Velocity(fix.clone()));
    }
}

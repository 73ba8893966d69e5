//! Latest known fix and provider status.

use qmiloc_types::{
    Accuracy, AccuracyLevel, PositionField, PositionFields, PositionFix, Status, VelocityField,
    VelocityFields, VelocityFix,
};

use crate::report::PositionReport;

/// Snapshots produced by ingesting a single report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingested {
    /// Present when the report carried at least one position attribute.
    pub position: Option<PositionFix>,
    /// Present when the report carried at least one velocity attribute.
    pub velocity: Option<VelocityFix>,
}

/// Cached provider state.
///
/// Owned by the event loop; every read and write happens on the loop, so no
/// locking is involved.
#[derive(Debug, Clone)]
pub struct ProviderState {
    status: Status,
    position_fields: PositionFields,
    velocity_fields: VelocityFields,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    horizontal_speed: f32,
    vertical_speed: f32,
    heading: f32,
    horizontal_uncertainty: f32,
    vertical_uncertainty: f32,
    accuracy: Accuracy,
    timestamp: u64,
}

impl ProviderState {
    /// Builds the start-up state: acquiring, with no valid field.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: Status::Acquiring,
            position_fields: PositionFields::new(),
            velocity_fields: VelocityFields::new(),
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            horizontal_speed: 0.0,
            vertical_speed: 0.0,
            heading: 0.0,
            horizontal_uncertainty: 0.0,
            vertical_uncertainty: 0.0,
            accuracy: Accuracy::new(AccuracyLevel::None, 0.0, 0.0),
            timestamp: 0,
        }
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Records `status`, returning `true` when it differs from the previous
    /// value.
    ///
    /// Leaving [`Status::Available`] invalidates every cached field.
    pub fn set_status(&mut self, status: Status) -> bool {
        if status == self.status {
            return false;
        }
        self.status = status;
        if !status.is_available() {
            self.position_fields.clear();
            self.velocity_fields.clear();
        }
        true
    }

    /// Overwrites the cache with the contents of `report`.
    ///
    /// Field sets are rebuilt from scratch, so attributes missing from this
    /// report are no longer flagged as valid even if an earlier report had
    /// them.
    pub fn ingest(&mut self, report: &PositionReport) -> Ingested {
        self.position_fields.clear();
        self.velocity_fields.clear();

        if let Some(speed) = report.horizontal_speed {
            self.horizontal_speed = speed;
            self.velocity_fields.insert(VelocityField::Speed);
        }
        if let Some(climb) = report.vertical_speed {
            self.vertical_speed = climb;
            self.velocity_fields.insert(VelocityField::Climb);
        }
        if let Some(heading) = report.heading {
            self.heading = heading;
            self.velocity_fields.insert(VelocityField::Direction);
        }
        if let Some(latitude) = report.latitude {
            self.latitude = latitude;
            self.position_fields.insert(PositionField::Latitude);
        }
        if let Some(longitude) = report.longitude {
            self.longitude = longitude;
            self.position_fields.insert(PositionField::Longitude);
        }
        if let Some(altitude) = report.altitude {
            self.altitude = altitude;
            self.position_fields.insert(PositionField::Altitude);
        }

        self.horizontal_uncertainty = report.horizontal_uncertainty.unwrap_or_default();
        self.vertical_uncertainty = report.vertical_uncertainty.unwrap_or_default();
        self.timestamp = report.utc_timestamp.unwrap_or_default();

        let position = if self.position_fields.is_empty() {
            None
        } else {
            self.accuracy.set_details(
                AccuracyLevel::Detailed,
                f64::from(self.horizontal_uncertainty),
                f64::from(self.vertical_uncertainty),
            );
            Some(self.position())
        };
        let velocity = if self.velocity_fields.is_empty() {
            None
        } else {
            Some(self.velocity())
        };

        Ingested { position, velocity }
    }

    /// Position snapshot with an independent copy of the accuracy.
    #[must_use]
    pub fn position(&self) -> PositionFix {
        PositionFix {
            fields: self.position_fields.clone(),
            timestamp: self.timestamp,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            accuracy: self.accuracy,
        }
    }

    /// Velocity snapshot.
    #[must_use]
    pub fn velocity(&self) -> VelocityFix {
        VelocityFix {
            fields: self.velocity_fields.clone(),
            timestamp: self.timestamp,
            speed: f64::from(self.horizontal_speed),
            direction: f64::from(self.heading),
            climb: f64::from(self.vertical_speed),
        }
    }
}

impl Default for ProviderState {
    fn default() -> Self {
        Self::new()
    }
}

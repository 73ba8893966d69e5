//! Snapshots returned by provider queries and carried by change events.

use serde::{Deserialize, Serialize};

use crate::accuracy::Accuracy;
use crate::fields::{PositionFields, VelocityFields};

/// Position snapshot.
///
/// Values whose tag is missing from `fields` hold whatever was last reported
/// and must not be read as current.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PositionFix {
    /// Attributes that are valid in this snapshot.
    pub fields: PositionFields,
    /// Device supplied UTC time of the report.
    pub timestamp: u64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Altitude above sea level in metres.
    pub altitude: f64,
    /// Accuracy of the fix.
    pub accuracy: Accuracy,
}

/// Velocity snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VelocityFix {
    /// Attributes that are valid in this snapshot.
    pub fields: VelocityFields,
    /// Device supplied UTC time of the report.
    pub timestamp: u64,
    /// Horizontal speed in metres per second.
    pub speed: f64,
    /// Heading in degrees.
    pub direction: f64,
    /// Vertical speed in metres per second.
    pub climb: f64,
}

//! Decoded position report indications.

/// Position report delivered by the positioning client.
///
/// Every attribute is optional: a report only carries what the modem measured
/// for that particular fix.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionReport {
    /// Horizontal speed in metres per second.
    pub horizontal_speed: Option<f32>,
    /// Vertical speed in metres per second.
    pub vertical_speed: Option<f32>,
    /// Heading in degrees.
    pub heading: Option<f32>,
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Altitude above sea level in metres.
    pub altitude: Option<f64>,
    /// Circular horizontal uncertainty in metres.
    pub horizontal_uncertainty: Option<f32>,
    /// Vertical uncertainty in metres.
    pub vertical_uncertainty: Option<f32>,
    /// Device supplied UTC timestamp.
    pub utc_timestamp: Option<u64>,
}

impl PositionReport {
    /// Builds a report without any attribute.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            horizontal_speed: None,
            vertical_speed: None,
            heading: None,
            latitude: None,
            longitude: None,
            altitude: None,
            horizontal_uncertainty: None,
            vertical_uncertainty: None,
            utc_timestamp: None,
        }
    }

    /// Sets latitude and longitude.
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Sets the altitude.
    #[must_use]
    pub const fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Sets the heading.
    #[must_use]
    pub const fn with_heading(mut self, heading: f32) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Sets horizontal and vertical speed.
    #[must_use]
    pub const fn with_speeds(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_speed = Some(horizontal);
        self.vertical_speed = Some(vertical);
        self
    }

    /// Sets both uncertainty radii.
    #[must_use]
    pub const fn with_uncertainty(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_uncertainty = Some(horizontal);
        self.vertical_uncertainty = Some(vertical);
        self
    }

    /// Sets the UTC timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.utc_timestamp = Some(timestamp);
        self
    }
}

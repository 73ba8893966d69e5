use serde::{Deserialize, Serialize};

/// Level of detail carried by an [`Accuracy`] descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyLevel {
    /// No accuracy information is known.
    #[default]
    None,
    /// Horizontal and vertical radii are populated.
    Detailed,
}

/// Confidence descriptor attached to a position fix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Accuracy {
    level: AccuracyLevel,
    horizontal: f64,
    vertical: f64,
}

impl Accuracy {
    /// Builds an accuracy descriptor.
    #[must_use]
    pub const fn new(level: AccuracyLevel, horizontal: f64, vertical: f64) -> Self {
        Self {
            level,
            horizontal,
            vertical,
        }
    }

    /// Replaces the level and radii in place.
    pub const fn set_details(&mut self, level: AccuracyLevel, horizontal: f64, vertical: f64) {
        self.level = level;
        self.horizontal = horizontal;
        self.vertical = vertical;
    }

    /// Detail level.
    #[must_use]
    pub const fn level(&self) -> AccuracyLevel {
        self.level
    }

    /// Horizontal uncertainty radius in metres.
    #[must_use]
    pub const fn horizontal(&self) -> f64 {
        self.horizontal
    }

    /// Vertical uncertainty in metres.
    #[must_use]
    pub const fn vertical(&self) -> f64 {
        self.vertical
    }
}

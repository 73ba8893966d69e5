use std::fmt;

use serde::{Deserialize, Serialize};

/// Availability of the location provider as seen by consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The session could not be established; no fixes will follow.
    Error,
    /// The provider is not able to deliver fixes.
    Unavailable,
    /// The session is being established.
    #[default]
    Acquiring,
    /// The session is streaming reports.
    Available,
}

impl Status {
    /// Returns `true` when cached fields may be read as current.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Error => "error",
            Self::Unavailable => "unavailable",
            Self::Acquiring => "acquiring",
            Self::Available => "available",
        };
        formatter.write_str(label)
    }
}

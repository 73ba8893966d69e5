//! Tagged sets describing which attributes of a fix are valid.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Position attributes that a report may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionField {
    /// Latitude in degrees.
    Latitude,
    /// Longitude in degrees.
    Longitude,
    /// Altitude above sea level in metres.
    Altitude,
}

/// Velocity attributes that a report may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityField {
    /// Horizontal speed in metres per second.
    Speed,
    /// Heading in degrees.
    Direction,
    /// Vertical speed in metres per second.
    Climb,
}

/// Closed set of attribute tags.
///
/// Membership is exact: inserting a tag twice keeps a single entry and
/// clearing the set removes every tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FieldSet<F: Ord> {
    fields: BTreeSet<F>,
}

/// Set of valid position attributes.
pub type PositionFields = FieldSet<PositionField>;

/// Set of valid velocity attributes.
pub type VelocityFields = FieldSet<VelocityField>;

impl<F: Ord> FieldSet<F> {
    /// Builds an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: BTreeSet::new(),
        }
    }

    /// Adds a tag to the set.
    pub fn insert(&mut self, field: F) {
        self.fields.insert(field);
    }

    /// Removes every tag.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Returns `true` when the tag is present.
    #[must_use]
    pub fn contains(&self, field: &F) -> bool {
        self.fields.contains(field)
    }

    /// Returns `true` when no tag is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of tags present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates over the tags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.fields.iter()
    }
}

impl<F: Ord> Default for FieldSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Ord> FromIterator<F> for FieldSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<F: Ord + fmt::Debug> fmt::Display for FieldSet<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.fields.iter()).finish()
    }
}

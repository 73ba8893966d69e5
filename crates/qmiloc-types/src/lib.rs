//! Value types shared between the location daemon and its publishing layer.
//!
//! The daemon caches the most recent fix reported by the modem and hands out
//! snapshots built from these types. They carry no behaviour beyond
//! construction and membership checks so any publishing layer can serialise
//! them without pulling in the daemon itself.

mod accuracy;
mod fields;
mod fix;
mod status;

pub use accuracy::{Accuracy, AccuracyLevel};
pub use fields::{FieldSet, PositionField, PositionFields, VelocityField, VelocityFields};
pub use fix::{PositionFix, VelocityFix};
pub use status::Status;

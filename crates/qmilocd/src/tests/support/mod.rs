//! Test harness utilities shared by the unit and behavioural suites.

mod config_loader;
mod reporter;
mod sink;
mod transport;
mod world;

pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use sink::RecordingSink;
pub use transport::{CLIENT_ID, Operation, Outcome, RecordingTransport, TransportCall};
pub use world::{TestWorld, world};

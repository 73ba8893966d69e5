//! Positioning session bootstrap.
//!
//! The session is established by a strict chain of stages: bus connection,
//! node discovery, device open, client allocation, event registration and
//! session start. [`machine`] holds the pure transition function and
//! [`SessionDriver`] performs the requests it asks for.

mod driver;
mod errors;
pub mod machine;

pub use self::driver::{ReleaseOutcome, SessionDriver};
pub use self::errors::{SessionError, StartFailure};
pub use self::machine::{SessionEvent, SessionStage, SessionState};

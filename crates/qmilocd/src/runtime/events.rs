//! Messages consumed by the event loop.

use std::sync::mpsc::{self, Receiver, Sender};

use qmiloc_types::{PositionFix, Status, VelocityFix};

use crate::provider::ProviderOptions;
use crate::report::PositionReport;
use crate::transport::Completion;

/// Work item processed by the event loop.
#[derive(Debug)]
pub enum LoopEvent {
    /// A transport request finished.
    Completed(Completion),
    /// A position indication arrived on the positioning client.
    Report(PositionReport),
    /// A caller asked for a snapshot or changed options.
    Query(Query),
    /// Shutdown was requested.
    Shutdown,
}

/// Provider call forwarded from another thread, with its reply channel.
#[derive(Debug)]
pub enum Query {
    /// Current status.
    Status(Sender<Status>),
    /// Last position snapshot.
    Position(Sender<PositionFix>),
    /// Last velocity snapshot.
    Velocity(Sender<VelocityFix>),
    /// Apply provider options.
    SetOptions(ProviderOptions, Sender<()>),
}

/// Cloneable handle used to post events onto the loop.
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: Sender<LoopEvent>,
}

impl EventSender {
    /// Posts `event`. Returns `false` once the loop has gone away.
    pub fn post(&self, event: LoopEvent) -> bool {
        self.inner.send(event).is_ok()
    }
}

/// Creates the loop's event channel.
#[must_use]
pub fn event_channel() -> (EventSender, Receiver<LoopEvent>) {
    let (inner, receiver) = mpsc::channel();
    (EventSender { inner }, receiver)
}

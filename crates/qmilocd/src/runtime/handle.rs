use std::sync::mpsc::{self, Sender};

use qmiloc_types::{PositionFix, Status, VelocityFix};

use super::errors::LoopError;
use super::events::{EventSender, LoopEvent, Query};
use crate::provider::ProviderOptions;

/// Thread-safe front-end to the provider running on the event loop.
///
/// Every call posts a request and blocks until the loop answers, so it must
/// not be used from the loop thread itself.
#[derive(Debug, Clone)]
pub struct ProviderHandle {
    events: EventSender,
}

impl ProviderHandle {
    pub(crate) const fn new(events: EventSender) -> Self {
        Self { events }
    }

    /// Current provider status.
    pub fn status(&self) -> Result<Status, LoopError> {
        self.ask(Query::Status)
    }

    /// Last cached position.
    pub fn position(&self) -> Result<PositionFix, LoopError> {
        self.ask(Query::Position)
    }

    /// Last cached velocity.
    pub fn velocity(&self) -> Result<VelocityFix, LoopError> {
        self.ask(Query::Velocity)
    }

    /// Forwards provider options.
    pub fn set_options(&self, options: ProviderOptions) -> Result<(), LoopError> {
        self.ask(|reply| Query::SetOptions(options, reply))
    }

    /// Requests shutdown without waiting for it to finish.
    pub fn shutdown(&self) -> Result<(), LoopError> {
        if self.events.post(LoopEvent::Shutdown) {
            Ok(())
        } else {
            Err(LoopError::Disconnected)
        }
    }

    fn ask<R>(&self, build: impl FnOnce(Sender<R>) -> Query) -> Result<R, LoopError> {
        let (reply, response) = mpsc::channel();
        if !self.events.post(LoopEvent::Query(build(reply))) {
            return Err(LoopError::Disconnected);
        }
        response.recv().map_err(|_| LoopError::Disconnected)
    }
}

//! Completion plumbing between the transport and the event loop.

use std::fmt;

use tracing::debug;

use super::TRANSPORT_TARGET;
use super::errors::TransportError;
use super::handles::{BusHandle, ClientHandle, DeviceHandle};
use crate::runtime::{EventSender, LoopEvent};

/// Outcome of a transport request, delivered on the event loop.
#[derive(Debug)]
pub enum Completion {
    /// Bus connection finished.
    BusConnected(Result<BusHandle, TransportError>),
    /// Device creation and open finished.
    DeviceOpened(Result<DeviceHandle, TransportError>),
    /// Client allocation finished.
    ClientAllocated(Result<ClientHandle, TransportError>),
    /// Event registration finished.
    EventsRegistered(Result<(), TransportError>),
    /// Session start finished.
    SessionStarted(Result<(), TransportError>),
    /// Client release finished.
    ClientReleased(Result<(), TransportError>),
}

/// One-shot callback the transport completes when a request finishes.
pub struct Responder<T> {
    events: EventSender,
    wrap: fn(Result<T, TransportError>) -> Completion,
}

impl<T> Responder<T> {
    pub(crate) const fn new(
        events: EventSender,
        wrap: fn(Result<T, TransportError>) -> Completion,
    ) -> Self {
        Self { events, wrap }
    }

    /// Posts the request outcome onto the event loop.
    pub fn complete(self, result: Result<T, TransportError>) {
        let completion = (self.wrap)(result);
        if !self.events.post(LoopEvent::Completed(completion)) {
            debug!(
                target: TRANSPORT_TARGET,
                "event loop stopped before the completion was delivered"
            );
        }
    }
}

impl<T> fmt::Debug for Responder<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Responder").finish_non_exhaustive()
    }
}

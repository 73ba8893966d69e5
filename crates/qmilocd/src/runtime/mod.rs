//! Single-threaded event loop owning the provider and the session.
//!
//! Transport completions, position reports, provider queries and shutdown
//! requests are all serialized through one channel and handled one at a
//! time, so the cache and the session state never need locking.

mod errors;
mod events;
mod handle;

use std::sync::Arc;
use std::sync::mpsc::Receiver;

use qmiloc_config::Config;
use tracing::{debug, info};

pub use self::errors::LoopError;
pub use self::events::{EventSender, LoopEvent, Query, event_channel};
pub use self::handle::ProviderHandle;

use crate::health::HealthReporter;
use crate::provider::{LocationProvider, LocationSink};
use crate::session::{ReleaseOutcome, SessionDriver, SessionEvent, SessionState};
use crate::transport::{Completion, LocationTransport};

const RUNTIME_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::runtime");

/// Whether the loop keeps running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Event loop hosting the location provider.
pub struct Runtime<T, S> {
    transport: T,
    provider: LocationProvider<S>,
    driver: SessionDriver,
    events: EventSender,
    receiver: Receiver<LoopEvent>,
    finished: bool,
}

impl<T, S> Runtime<T, S>
where
    T: LocationTransport,
    S: LocationSink,
{
    /// Builds an idle runtime. Nothing is submitted until [`Self::start`].
    #[must_use]
    pub fn new(
        config: &Config,
        transport: T,
        sink: S,
        reporter: Arc<dyn HealthReporter>,
    ) -> Self {
        let (events, receiver) = event_channel();
        let driver = SessionDriver::new(
            config.timeouts(),
            config.session_parameters(),
            events.clone(),
            reporter,
        );
        Self {
            transport,
            provider: LocationProvider::new(sink),
            driver,
            events,
            receiver,
            finished: false,
        }
    }

    /// Sender for posting events onto this loop.
    #[must_use]
    pub fn events(&self) -> EventSender {
        self.events.clone()
    }

    /// Cloneable provider front-end for other threads.
    #[must_use]
    pub fn handle(&self) -> ProviderHandle {
        ProviderHandle::new(self.events.clone())
    }

    /// Submits the first bootstrap stage.
    pub fn start(&mut self) {
        self.driver.begin(&mut self.transport, &mut self.provider);
    }

    /// Processes events until the loop is quit.
    pub fn run(mut self) -> Result<(), LoopError> {
        info!(target: RUNTIME_TARGET, "event loop running");
        while !self.finished {
            let event = self.receiver.recv().map_err(|_| LoopError::Disconnected)?;
            self.dispatch(event);
        }
        info!(target: RUNTIME_TARGET, "event loop stopped");
        Ok(())
    }

    /// Processes every event already queued, including those posted while
    /// draining. Returns `true` once the loop has quit.
    pub fn run_until_idle(&mut self) -> bool {
        while !self.finished {
            let Ok(event) = self.receiver.try_recv() else {
                break;
            };
            self.dispatch(event);
        }
        self.finished
    }

    /// Handles a single event.
    pub fn dispatch(&mut self, event: LoopEvent) {
        if self.finished {
            debug!(target: RUNTIME_TARGET, ?event, "event loop already quit");
            return;
        }
        let flow = match event {
            LoopEvent::Completed(completion) => self.complete(completion),
            LoopEvent::Report(report) => {
                self.driver.report(report, &mut self.provider);
                Flow::Continue
            }
            LoopEvent::Query(query) => {
                self.answer(query);
                Flow::Continue
            }
            LoopEvent::Shutdown => self.shutdown(),
        };
        self.finished = flow == Flow::Quit;
    }

    /// Returns `true` once the loop has quit.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Provider hosted by the loop.
    #[must_use]
    pub const fn provider(&self) -> &LocationProvider<S> {
        &self.provider
    }

    /// Current bootstrap state.
    #[must_use]
    pub const fn session_state(&self) -> SessionState {
        self.driver.state()
    }

    /// Session driver, for inspection.
    #[must_use]
    pub const fn session(&self) -> &SessionDriver {
        &self.driver
    }

    /// Transport collaborator.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport collaborator.
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn complete(&mut self, completion: Completion) -> Flow {
        let event = match completion {
            Completion::BusConnected(result) => SessionEvent::BusConnected(result),
            Completion::DeviceOpened(result) => SessionEvent::DeviceOpened(result),
            Completion::ClientAllocated(result) => SessionEvent::ClientAllocated(result),
            Completion::EventsRegistered(result) => SessionEvent::EventsRegistered(result),
            Completion::SessionStarted(result) => SessionEvent::SessionStarted(result),
            Completion::ClientReleased(result) => {
                if let Err(error) = self.driver.release_finished(result) {
                    debug!(target: RUNTIME_TARGET, %error, "quitting after failed release");
                }
                return Flow::Quit;
            }
        };
        self.driver.handle(event, &mut self.transport, &mut self.provider);
        if self.driver.release_settled() {
            info!(target: RUNTIME_TARGET, "no positioning client to release");
            return Flow::Quit;
        }
        Flow::Continue
    }

    fn answer(&mut self, query: Query) {
        let delivered = match query {
            Query::Status(reply) => reply.send(self.provider.get_status()).is_ok(),
            Query::Position(reply) => reply.send(self.provider.get_position()).is_ok(),
            Query::Velocity(reply) => reply.send(self.provider.get_velocity()).is_ok(),
            Query::SetOptions(options, reply) => {
                self.provider.set_options(&options);
                reply.send(()).is_ok()
            }
        };
        if !delivered {
            debug!(target: RUNTIME_TARGET, "query caller went away before the reply");
        }
    }

    fn shutdown(&mut self) -> Flow {
        match self.driver.release(&mut self.transport) {
            ReleaseOutcome::Submitted => Flow::Continue,
            ReleaseOutcome::Deferred => {
                info!(target: RUNTIME_TARGET, "waiting for client allocation before release");
                Flow::Continue
            }
            ReleaseOutcome::NothingToRelease => {
                info!(target: RUNTIME_TARGET, "no positioning client to release");
                Flow::Quit
            }
            ReleaseOutcome::AlreadyRequested => {
                debug!(target: RUNTIME_TARGET, "shutdown already in progress");
                Flow::Continue
            }
        }
    }
}

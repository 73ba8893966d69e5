//! Executes the effects requested by [`advance`] against a transport.

use std::sync::Arc;

use qmiloc_config::{SessionParameters, SessionTimeouts};
use qmiloc_types::Status;
use tracing::debug;

use super::errors::SessionError;
use super::machine::{Effect, SessionEvent, SessionStage, SessionState, advance};
use crate::health::HealthReporter;
use crate::provider::{LocationProvider, LocationSink};
use crate::report::PositionReport;
use crate::runtime::EventSender;
use crate::subscription::{self, ReportSubscription};
use crate::transport::{
    ClientHandle, Completion, DeviceHandle, EventMask, LocationTransport, OpenFlags, ReleaseFlags,
    Responder, ServiceId, StartRequest, TransportError,
};

const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Progress of the shutdown release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReleasePhase {
    Idle,
    Deferred,
    InFlight,
    Finished,
}

/// What [`SessionDriver::release`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// A release request was submitted; the loop must wait for it.
    Submitted,
    /// Client allocation is still in flight; the release follows its
    /// completion and the loop must wait.
    Deferred,
    /// No client was ever allocated; the loop may quit immediately.
    NothingToRelease,
    /// A release was already requested earlier.
    AlreadyRequested,
}

/// Drives the bootstrap chain and owns every handle it produces.
pub struct SessionDriver {
    state: SessionState,
    timeouts: SessionTimeouts,
    parameters: SessionParameters,
    events: EventSender,
    reporter: Arc<dyn HealthReporter>,
    device: Option<DeviceHandle>,
    client: Option<ClientHandle>,
    subscription: Option<ReportSubscription>,
    pending_report: Option<PositionReport>,
    failure: Option<SessionError>,
    release: ReleasePhase,
}

impl SessionDriver {
    /// Builds an idle driver.
    #[must_use]
    pub fn new(
        timeouts: SessionTimeouts,
        parameters: SessionParameters,
        events: EventSender,
        reporter: Arc<dyn HealthReporter>,
    ) -> Self {
        Self {
            state: SessionState::Idle,
            timeouts,
            parameters,
            events,
            reporter,
            device: None,
            client: None,
            subscription: None,
            pending_report: None,
            failure: None,
            release: ReleasePhase::Idle,
        }
    }

    /// Current bootstrap state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Error that ended the bootstrap, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&SessionError> {
        self.failure.as_ref()
    }

    /// Client allocated for the session, until it is released.
    #[must_use]
    pub const fn client(&self) -> Option<&ClientHandle> {
        self.client.as_ref()
    }

    /// Returns `true` while position reports are routed to the cache.
    #[must_use]
    pub fn reports_attached(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(ReportSubscription::is_active)
    }

    /// Returns `true` once shutdown has nothing left to wait for.
    #[must_use]
    pub const fn release_settled(&self) -> bool {
        matches!(self.release, ReleasePhase::Finished)
    }

    /// Submits the first stage.
    pub fn begin<T, S>(&mut self, transport: &mut T, provider: &mut LocationProvider<S>)
    where
        T: LocationTransport + ?Sized,
        S: LocationSink,
    {
        self.handle(SessionEvent::Begin, transport, provider);
    }

    /// Feeds `event` through the state machine and performs the resulting
    /// effects. Synchronous follow-ups such as node listing run inline.
    pub fn handle<T, S>(
        &mut self,
        event: SessionEvent,
        transport: &mut T,
        provider: &mut LocationProvider<S>,
    ) where
        T: LocationTransport + ?Sized,
        S: LocationSink,
    {
        match self.release {
            ReleasePhase::Idle => {}
            ReleasePhase::Deferred => {
                self.release_late_client(event, transport);
                return;
            }
            ReleasePhase::InFlight | ReleasePhase::Finished => {
                debug!(
                    target: SESSION_TARGET,
                    ?event,
                    "ignoring session event after release was requested"
                );
                return;
            }
        }

        let mut next = Some(event);
        while let Some(current) = next.take() {
            let transition = advance(self.state, current);
            self.state = transition.state;
            next = self.perform(transition.effect, transport, provider);
        }
    }

    /// Routes a position report according to the session state.
    ///
    /// Reports are ingested once the session is available. Reports that
    /// arrive between event registration and the start acknowledgement are
    /// held and the latest one is ingested on becoming available.
    pub fn report<S>(&mut self, report: PositionReport, provider: &mut LocationProvider<S>)
    where
        S: LocationSink,
    {
        if !self.reports_attached() {
            debug!(target: SESSION_TARGET, "dropping report without an active subscription");
            return;
        }
        match self.state {
            SessionState::Available => provider.ingest(&report),
            SessionState::Pending(_) => self.pending_report = Some(report),
            SessionState::Idle | SessionState::Failed(_) => {
                debug!(
                    target: SESSION_TARGET,
                    state = ?self.state,
                    "dropping report outside an active session"
                );
            }
        }
    }

    /// Requests the client release at shutdown. Reports stop flowing as soon
    /// as the release is requested.
    ///
    /// A shutdown that arrives while the client allocation is in flight
    /// defers the release until the allocation completes.
    pub fn release<T>(&mut self, transport: &mut T) -> ReleaseOutcome
    where
        T: LocationTransport + ?Sized,
    {
        if self.release != ReleasePhase::Idle {
            return ReleaseOutcome::AlreadyRequested;
        }
        self.pending_report = None;
        if let Some(subscription) = self.subscription.take() {
            subscription.detach();
        }

        if let Some(client) = self.client.take() {
            self.submit_release(client, transport);
            return ReleaseOutcome::Submitted;
        }
        if self.state == SessionState::Pending(SessionStage::AllocatingClient) {
            debug!(target: SESSION_TARGET, "deferring release until allocation completes");
            self.release = ReleasePhase::Deferred;
            return ReleaseOutcome::Deferred;
        }
        self.release = ReleasePhase::Finished;
        ReleaseOutcome::NothingToRelease
    }

    /// Records the release outcome.
    pub fn release_finished(
        &mut self,
        result: Result<(), TransportError>,
    ) -> Result<(), SessionError> {
        self.release = ReleasePhase::Finished;
        match result {
            Ok(()) => {
                self.reporter.release_completed();
                Ok(())
            }
            Err(source) => {
                let error = SessionError::ReleaseFailed { source };
                self.reporter.release_failed(&error);
                Err(error)
            }
        }
    }

    fn release_late_client<T>(&mut self, event: SessionEvent, transport: &mut T)
    where
        T: LocationTransport + ?Sized,
    {
        match event {
            SessionEvent::ClientAllocated(Ok(client)) => self.submit_release(client, transport),
            SessionEvent::ClientAllocated(Err(error)) => {
                debug!(
                    target: SESSION_TARGET,
                    %error,
                    "allocation failed after shutdown; nothing to release"
                );
                self.release = ReleasePhase::Finished;
            }
            other => debug!(
                target: SESSION_TARGET,
                event = ?other,
                "ignoring session event while the release is deferred"
            ),
        }
    }

    fn submit_release<T>(&mut self, client: ClientHandle, transport: &mut T)
    where
        T: LocationTransport + ?Sized,
    {
        let Some(device) = self.device.as_ref() else {
            self.release = ReleasePhase::Finished;
            return;
        };
        self.release = ReleasePhase::InFlight;
        self.reporter.release_starting();
        transport.release_client(
            device,
            client,
            ReleaseFlags::RELEASE_CID,
            self.timeouts.release,
            Responder::new(self.events.clone(), Completion::ClientReleased),
        );
    }

    fn perform<T, S>(
        &mut self,
        effect: Effect,
        transport: &mut T,
        provider: &mut LocationProvider<S>,
    ) -> Option<SessionEvent>
    where
        T: LocationTransport + ?Sized,
        S: LocationSink,
    {
        match effect {
            Effect::ConnectBus => {
                self.reporter.stage_starting(SessionStage::Connecting);
                transport.connect_bus(
                    self.timeouts.bus_connect,
                    Responder::new(self.events.clone(), Completion::BusConnected),
                );
                None
            }
            Effect::ListNodes(bus) => {
                self.reporter.stage_starting(SessionStage::Discovering);
                Some(SessionEvent::NodesListed(transport.list_nodes(&bus)))
            }
            Effect::OpenDevice(node) => {
                self.reporter.stage_starting(SessionStage::OpeningDevice);
                debug!(target: SESSION_TARGET, node = node.id(), "opening device");
                transport.open_device(
                    &node,
                    OpenFlags::AUTO | OpenFlags::EXPECT_INDICATIONS,
                    self.timeouts.device_open,
                    Responder::new(self.events.clone(), Completion::DeviceOpened),
                );
                None
            }
            Effect::AllocateClient(device) => {
                self.reporter.stage_starting(SessionStage::AllocatingClient);
                transport.allocate_client(
                    &device,
                    ServiceId::LOCATION,
                    self.timeouts.client_allocate,
                    Responder::new(self.events.clone(), Completion::ClientAllocated),
                );
                self.device = Some(device);
                None
            }
            Effect::RegisterEvents(client) => {
                self.reporter.stage_starting(SessionStage::RegisteringEvents);
                let (subscription, sender) = subscription::channel(self.events.clone());
                transport.attach_reports(&client, sender);
                self.subscription = Some(subscription);
                transport.register_events(
                    &client,
                    EventMask::POSITION_REPORT,
                    self.timeouts.request,
                    Responder::new(self.events.clone(), Completion::EventsRegistered),
                );
                self.client = Some(client);
                None
            }
            Effect::StartSession => {
                self.reporter.stage_starting(SessionStage::Starting);
                self.submit_start(transport)
            }
            Effect::BecomeAvailable => {
                provider.set_status(Status::Available);
                self.reporter.session_available();
                if let Some(report) = self.pending_report.take() {
                    provider.ingest(&report);
                }
                None
            }
            Effect::Fail(error) => {
                self.pending_report = None;
                provider.set_status(Status::Error);
                self.reporter.session_failed(&error);
                self.failure = Some(error);
                None
            }
            Effect::Ignore => {
                debug!(
                    target: SESSION_TARGET,
                    state = ?self.state,
                    "ignoring event that does not apply to the current state"
                );
                None
            }
        }
    }

    fn submit_start<T>(&self, transport: &mut T) -> Option<SessionEvent>
    where
        T: LocationTransport + ?Sized,
    {
        let request = match StartRequest::periodic(&self.parameters) {
            Ok(request) => request,
            Err(error) => return Some(SessionEvent::StartRequestRejected(error)),
        };
        let Some(client) = self.client.as_ref() else {
            return Some(SessionEvent::SessionStarted(Err(TransportError::Unavailable {
                message: String::from("no positioning client is allocated"),
            })));
        };
        transport.start_session(
            client,
            &request,
            self.timeouts.request,
            Responder::new(self.events.clone(), Completion::SessionStarted),
        );
        None
    }
}

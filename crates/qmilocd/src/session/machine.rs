//! Pure transition function of the session bootstrap.
//!
//! The bootstrap is a strict chain: each stage needs the handle or
//! registration produced by the previous one, so exactly one request is in
//! flight at a time. [`advance`] maps the current state and an observed event
//! to the next state and the side effect the driver must perform. Any failure
//! lands in [`SessionState::Failed`], which is terminal.

use std::fmt;

use crate::transport::{
    BusHandle, ClientHandle, DeviceHandle, Node, ServiceId, StartRequestError, TransportError,
};

use super::errors::{SessionError, StartFailure};

/// Ordered bootstrap stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionStage {
    /// Connecting to the service-discovery bus.
    Connecting,
    /// Looking for a node exposing the positioning service.
    Discovering,
    /// Creating and opening the device bound to that node.
    OpeningDevice,
    /// Allocating the positioning client.
    AllocatingClient,
    /// Enabling position report delivery.
    RegisteringEvents,
    /// Starting the periodic session.
    Starting,
}

impl SessionStage {
    /// Every stage in execution order.
    pub const ALL: [Self; 6] = [
        Self::Connecting,
        Self::Discovering,
        Self::OpeningDevice,
        Self::AllocatingClient,
        Self::RegisteringEvents,
        Self::Starting,
    ];
}

impl fmt::Display for SessionStage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connecting => "connecting",
            Self::Discovering => "discovering",
            Self::OpeningDevice => "opening_device",
            Self::AllocatingClient => "allocating_client",
            Self::RegisteringEvents => "registering_events",
            Self::Starting => "starting",
        };
        formatter.write_str(label)
    }
}

/// Position of the bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has been submitted yet.
    Idle,
    /// The given stage is in flight.
    Pending(SessionStage),
    /// Every stage succeeded; reports are streaming.
    Available,
    /// The given stage failed; no further stage runs.
    Failed(SessionStage),
}

impl SessionState {
    /// Returns `true` for [`SessionState::Available`] and
    /// [`SessionState::Failed`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Available | Self::Failed(_))
    }
}

/// Inputs observed by the bootstrap.
#[derive(Debug)]
pub enum SessionEvent {
    /// Start the bootstrap.
    Begin,
    /// The bus connection finished.
    BusConnected(Result<BusHandle, TransportError>),
    /// Nodes visible on the connected bus.
    NodesListed(Vec<Node>),
    /// The device open finished.
    DeviceOpened(Result<DeviceHandle, TransportError>),
    /// The client allocation finished.
    ClientAllocated(Result<ClientHandle, TransportError>),
    /// Event registration finished.
    EventsRegistered(Result<(), TransportError>),
    /// The start request could not be built.
    StartRequestRejected(StartRequestError),
    /// The session start finished.
    SessionStarted(Result<(), TransportError>),
}

/// Side effect requested by a transition.
#[derive(Debug)]
pub enum Effect {
    /// Submit the bus connection.
    ConnectBus,
    /// Enumerate the nodes on `bus`.
    ListNodes(BusHandle),
    /// Submit the device open for `node`.
    OpenDevice(Node),
    /// Submit the client allocation on `device`.
    AllocateClient(DeviceHandle),
    /// Attach the report handler to `client`, then submit event registration.
    RegisterEvents(ClientHandle),
    /// Build and submit the session start request.
    StartSession,
    /// Publish the available status.
    BecomeAvailable,
    /// Publish the error status.
    Fail(SessionError),
    /// The event does not apply to the current state.
    Ignore,
}

/// Result of [`advance`].
#[derive(Debug)]
pub struct Transition {
    /// State after the event.
    pub state: SessionState,
    /// Side effect to perform.
    pub effect: Effect,
}

impl Transition {
    const fn to(stage: SessionStage, effect: Effect) -> Self {
        Self {
            state: SessionState::Pending(stage),
            effect,
        }
    }

    const fn fail(stage: SessionStage, error: SessionError) -> Self {
        Self {
            state: SessionState::Failed(stage),
            effect: Effect::Fail(error),
        }
    }

    const fn stay(state: SessionState) -> Self {
        Self {
            state,
            effect: Effect::Ignore,
        }
    }
}

/// Computes the next state and side effect.
#[must_use]
pub fn advance(state: SessionState, event: SessionEvent) -> Transition {
    use SessionStage::{
        AllocatingClient, Connecting, Discovering, OpeningDevice, RegisteringEvents, Starting,
    };

    match (state, event) {
        (SessionState::Idle, SessionEvent::Begin) => Transition::to(Connecting, Effect::ConnectBus),
        (SessionState::Pending(Connecting), SessionEvent::BusConnected(result)) => match result {
            Ok(bus) => Transition::to(Discovering, Effect::ListNodes(bus)),
            Err(source) => Transition::fail(Connecting, SessionError::BusUnavailable { source }),
        },
        (SessionState::Pending(Discovering), SessionEvent::NodesListed(nodes)) => {
            let count = nodes.len();
            nodes
                .into_iter()
                .find(|node| node.has_service(ServiceId::LOCATION))
                .map_or_else(
                    || {
                        Transition::fail(
                            Discovering,
                            SessionError::ServiceNotFound {
                                service: ServiceId::LOCATION,
                                nodes: count,
                            },
                        )
                    },
                    |node| Transition::to(OpeningDevice, Effect::OpenDevice(node)),
                )
        }
        (SessionState::Pending(OpeningDevice), SessionEvent::DeviceOpened(result)) => match result
        {
            Ok(device) => Transition::to(AllocatingClient, Effect::AllocateClient(device)),
            Err(source) => {
                Transition::fail(OpeningDevice, SessionError::DeviceOpenFailed { source })
            }
        },
        (SessionState::Pending(AllocatingClient), SessionEvent::ClientAllocated(result)) => {
            match result {
                Ok(client) => Transition::to(RegisteringEvents, Effect::RegisterEvents(client)),
                Err(source) => Transition::fail(
                    AllocatingClient,
                    SessionError::ClientAllocationFailed { source },
                ),
            }
        }
        (SessionState::Pending(RegisteringEvents), SessionEvent::EventsRegistered(result)) => {
            match result {
                Ok(()) => Transition::to(Starting, Effect::StartSession),
                Err(source) => Transition::fail(
                    RegisteringEvents,
                    SessionError::EventRegistrationFailed { source },
                ),
            }
        }
        (SessionState::Pending(Starting), SessionEvent::StartRequestRejected(error)) => {
            Transition::fail(
                Starting,
                SessionError::SessionStartFailed {
                    source: StartFailure::Request(error),
                },
            )
        }
        (SessionState::Pending(Starting), SessionEvent::SessionStarted(result)) => match result {
            Ok(()) => Transition {
                state: SessionState::Available,
                effect: Effect::BecomeAvailable,
            },
            Err(source) => Transition::fail(
                Starting,
                SessionError::SessionStartFailed {
                    source: StartFailure::Transport(source),
                },
            ),
        },
        (current, _) => Transition::stay(current),
    }
}

//! Scripted [`LocationTransport`] that records every request.
//!
//! Requests complete synchronously with the scripted outcome unless the
//! stage is set to [`Outcome::Hold`], in which case the responder is parked
//! until [`RecordingTransport::complete_held`] releases it, oldest first.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use crate::report::PositionReport;
use crate::subscription::ReportSender;
use crate::transport::{
    BusHandle, ClientHandle, DeviceHandle, EventMask, LocationTransport, Node, OpenFlags,
    ReleaseFlags, Responder, ServiceId, StartRequest, TransportError,
};

/// Requests observed by the transport, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    ConnectBus { timeout: Duration },
    ListNodes,
    OpenDevice { node: u32, flags: OpenFlags },
    AllocateClient { service: ServiceId },
    AttachReports { client_id: u8 },
    RegisterEvents { mask: EventMask },
    StartSession(StartRequest),
    ReleaseClient { client_id: u8, flags: ReleaseFlags },
}

/// Request kinds that accept a scripted outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    ConnectBus,
    OpenDevice,
    AllocateClient,
    RegisterEvents,
    StartSession,
    ReleaseClient,
}

impl Operation {
    const fn name(self) -> &'static str {
        match self {
            Self::ConnectBus => "connect_bus",
            Self::OpenDevice => "open_device",
            Self::AllocateClient => "allocate_client",
            Self::RegisterEvents => "register_events",
            Self::StartSession => "start_session",
            Self::ReleaseClient => "release_client",
        }
    }
}

/// Scripted result of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeed,
    Fail(String),
    Timeout,
    Hold,
}

enum Held {
    Bus(Responder<BusHandle>),
    Device(Responder<DeviceHandle>),
    Client(Responder<ClientHandle>),
    Unit(Responder<()>),
}

pub const CLIENT_ID: u8 = 7;

pub struct RecordingTransport {
    calls: RefCell<Vec<TransportCall>>,
    outcomes: BTreeMap<Operation, Outcome>,
    nodes: Vec<Node>,
    reports: Option<ReportSender>,
    held: VecDeque<Held>,
}

impl RecordingTransport {
    /// Transport where every stage succeeds and one node exposes the
    /// positioning service.
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            outcomes: BTreeMap::new(),
            nodes: vec![
                Node::new(0).with_service(ServiceId::new(0x02), 2),
                Node::new(1).with_service(ServiceId::LOCATION, 33),
            ],
            reports: None,
            held: VecDeque::new(),
        }
    }

    pub fn script(&mut self, operation: Operation, outcome: Outcome) {
        self.outcomes.insert(operation, outcome);
    }

    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.borrow().clone()
    }

    pub fn release_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, TransportCall::ReleaseClient { .. }))
            .count()
    }

    pub fn has_report_handler(&self) -> bool {
        self.reports.is_some()
    }

    /// Sends `report` through the attached handler, as the modem would.
    pub fn deliver(&self, report: PositionReport) -> bool {
        self.reports
            .as_ref()
            .is_some_and(|sender| sender.deliver(report))
    }

    /// Completes the oldest parked request successfully.
    pub fn complete_held(&mut self) {
        match self.held.pop_front() {
            Some(Held::Bus(responder)) => responder.complete(Ok(BusHandle::new(1))),
            Some(Held::Device(responder)) => responder.complete(Ok(device_for(1))),
            Some(Held::Client(responder)) => responder.complete(Ok(client())),
            Some(Held::Unit(responder)) => responder.complete(Ok(())),
            None => panic!("no request is held"),
        }
    }

    /// Fails the oldest parked request with `message`.
    pub fn fail_held(&mut self, message: &str) {
        let error = || TransportError::failed("held", message);
        match self.held.pop_front() {
            Some(Held::Bus(responder)) => responder.complete(Err(error())),
            Some(Held::Device(responder)) => responder.complete(Err(error())),
            Some(Held::Client(responder)) => responder.complete(Err(error())),
            Some(Held::Unit(responder)) => responder.complete(Err(error())),
            None => panic!("no request is held"),
        }
    }

    fn record(&self, call: TransportCall) {
        self.calls.borrow_mut().push(call);
    }

    fn settle<T>(
        &mut self,
        operation: Operation,
        responder: Responder<T>,
        value: T,
        park: fn(Responder<T>) -> Held,
    ) {
        let outcome = self
            .outcomes
            .get(&operation)
            .cloned()
            .unwrap_or(Outcome::Succeed);
        match outcome {
            Outcome::Succeed => responder.complete(Ok(value)),
            Outcome::Fail(message) => {
                responder.complete(Err(TransportError::failed(operation.name(), message)));
            }
            Outcome::Timeout => responder.complete(Err(TransportError::Timeout {
                operation: operation.name(),
                timeout: Duration::from_secs(1),
            })),
            Outcome::Hold => self.held.push_back(park(responder)),
        }
    }
}

fn device_for(node: u32) -> DeviceHandle {
    DeviceHandle::new(node, format!("qrtr://{node}"))
}

fn client() -> ClientHandle {
    ClientHandle::new(ServiceId::LOCATION, CLIENT_ID)
}

impl LocationTransport for RecordingTransport {
    fn connect_bus(&mut self, timeout: Duration, responder: Responder<BusHandle>) {
        self.record(TransportCall::ConnectBus { timeout });
        self.settle(Operation::ConnectBus, responder, BusHandle::new(1), Held::Bus);
    }

    fn list_nodes(&self, _bus: &BusHandle) -> Vec<Node> {
        self.record(TransportCall::ListNodes);
        self.nodes.clone()
    }

    fn open_device(
        &mut self,
        node: &Node,
        flags: OpenFlags,
        _timeout: Duration,
        responder: Responder<DeviceHandle>,
    ) {
        self.record(TransportCall::OpenDevice {
            node: node.id(),
            flags,
        });
        self.settle(
            Operation::OpenDevice,
            responder,
            device_for(node.id()),
            Held::Device,
        );
    }

    fn allocate_client(
        &mut self,
        _device: &DeviceHandle,
        service: ServiceId,
        _timeout: Duration,
        responder: Responder<ClientHandle>,
    ) {
        self.record(TransportCall::AllocateClient { service });
        self.settle(Operation::AllocateClient, responder, client(), Held::Client);
    }

    fn attach_reports(&mut self, client: &ClientHandle, reports: ReportSender) {
        self.record(TransportCall::AttachReports {
            client_id: client.client_id(),
        });
        self.reports = Some(reports);
    }

    fn register_events(
        &mut self,
        _client: &ClientHandle,
        mask: EventMask,
        _timeout: Duration,
        responder: Responder<()>,
    ) {
        self.record(TransportCall::RegisterEvents { mask });
        self.settle(Operation::RegisterEvents, responder, (), Held::Unit);
    }

    fn start_session(
        &mut self,
        _client: &ClientHandle,
        request: &StartRequest,
        _timeout: Duration,
        responder: Responder<()>,
    ) {
        self.record(TransportCall::StartSession(request.clone()));
        self.settle(Operation::StartSession, responder, (), Held::Unit);
    }

    fn release_client(
        &mut self,
        _device: &DeviceHandle,
        client: ClientHandle,
        flags: ReleaseFlags,
        _timeout: Duration,
        responder: Responder<()>,
    ) {
        self.record(TransportCall::ReleaseClient {
            client_id: client.client_id(),
            flags,
        });
        self.settle(Operation::ReleaseClient, responder, (), Held::Unit);
    }
}

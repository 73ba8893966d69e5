//! Placeholder transport for builds without a bus backend.

use std::time::Duration;

use super::{
    BusHandle, ClientHandle, DeviceHandle, EventMask, LocationTransport, Node, OpenFlags,
    ReleaseFlags, Responder, ServiceId, StartRequest, TRANSPORT_TARGET, TransportError,
};
use crate::subscription::ReportSender;

const UNSUPPORTED_MESSAGE: &str = "this build carries no QRTR bus backend";

/// Transport that refuses every request.
///
/// The bus never connects, so the provider settles in the error state right
/// after start-up and consumers see a clean status change.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedTransport;

impl UnsupportedTransport {
    /// Builds the placeholder transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn refuse<T>(operation: &'static str, responder: Responder<T>) {
        tracing::warn!(
            target: TRANSPORT_TARGET,
            operation,
            "transport request refused: {UNSUPPORTED_MESSAGE}"
        );
        responder.complete(Err(TransportError::Unavailable {
            message: UNSUPPORTED_MESSAGE.to_owned(),
        }));
    }
}

impl LocationTransport for UnsupportedTransport {
    fn connect_bus(&mut self, _timeout: Duration, responder: Responder<BusHandle>) {
        Self::refuse("connect_bus", responder);
    }

    fn list_nodes(&self, _bus: &BusHandle) -> Vec<Node> {
        Vec::new()
    }

    fn open_device(
        &mut self,
        _node: &Node,
        _flags: OpenFlags,
        _timeout: Duration,
        responder: Responder<DeviceHandle>,
    ) {
        Self::refuse("open_device", responder);
    }

    fn allocate_client(
        &mut self,
        _device: &DeviceHandle,
        _service: ServiceId,
        _timeout: Duration,
        responder: Responder<ClientHandle>,
    ) {
        Self::refuse("allocate_client", responder);
    }

    fn attach_reports(&mut self, _client: &ClientHandle, _reports: ReportSender) {}

    fn register_events(
        &mut self,
        _client: &ClientHandle,
        _mask: EventMask,
        _timeout: Duration,
        responder: Responder<()>,
    ) {
        Self::refuse("register_events", responder);
    }

    fn start_session(
        &mut self,
        _client: &ClientHandle,
        _request: &StartRequest,
        _timeout: Duration,
        responder: Responder<()>,
    ) {
        Self::refuse("start_session", responder);
    }

    fn release_client(
        &mut self,
        _device: &DeviceHandle,
        _client: ClientHandle,
        _flags: ReleaseFlags,
        _timeout: Duration,
        responder: Responder<()>,
    ) {
        Self::refuse("release_client", responder);
    }
}

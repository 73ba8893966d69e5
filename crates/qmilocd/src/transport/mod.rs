//! Interface to the bus and device collaborators.
//!
//! The daemon never speaks the modem protocol itself. It submits requests
//! through [`LocationTransport`] and learns about their outcome when the
//! transport completes the accompanying [`Responder`], which posts a
//! [`Completion`] onto the event loop. Requests therefore never block the
//! loop; each bounded wait is enforced by the transport as a request timeout.

mod errors;
mod handles;
mod requests;
mod responder;
mod unsupported;

use std::time::Duration;

pub use self::errors::TransportError;
pub use self::handles::{BusHandle, ClientHandle, DeviceHandle, Node, ServiceId};
pub use self::requests::{
    EventMask, FixRecurrence, IntermediateReports, OpenFlags, ReleaseFlags, StartRequest,
    StartRequestError,
};
pub use self::responder::{Completion, Responder};
pub use self::unsupported::UnsupportedTransport;

use crate::subscription::ReportSender;

pub(crate) const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// Non-blocking request surface offered by the bus and device libraries.
///
/// Every method that takes a [`Responder`] must eventually complete it
/// exactly once, either with the result or with a timeout error once the
/// supplied wait elapses.
pub trait LocationTransport {
    /// Opens a handle to the local service-discovery bus.
    fn connect_bus(&mut self, timeout: Duration, responder: Responder<BusHandle>);

    /// Returns the nodes currently known on a connected bus.
    fn list_nodes(&self, bus: &BusHandle) -> Vec<Node>;

    /// Creates a device bound to `node` and opens it with `flags`.
    fn open_device(
        &mut self,
        node: &Node,
        flags: OpenFlags,
        timeout: Duration,
        responder: Responder<DeviceHandle>,
    );

    /// Allocates a client for `service` on an opened device.
    fn allocate_client(
        &mut self,
        device: &DeviceHandle,
        service: ServiceId,
        timeout: Duration,
        responder: Responder<ClientHandle>,
    );

    /// Routes position indications received on `client` to `reports`.
    fn attach_reports(&mut self, client: &ClientHandle, reports: ReportSender);

    /// Enables delivery of the indications selected by `mask`.
    fn register_events(
        &mut self,
        client: &ClientHandle,
        mask: EventMask,
        timeout: Duration,
        responder: Responder<()>,
    );

    /// Starts the positioning session described by `request`.
    fn start_session(
        &mut self,
        client: &ClientHandle,
        request: &StartRequest,
        timeout: Duration,
        responder: Responder<()>,
    );

    /// Releases a client previously allocated on `device`.
    fn release_client(
        &mut self,
        device: &DeviceHandle,
        client: ClientHandle,
        flags: ReleaseFlags,
        timeout: Duration,
        responder: Responder<()>,
    );
}

//! Opaque handles returned by the transport collaborators.

use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a service exposed by a modem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceId(u16);

impl ServiceId {
    /// Location (positioning) service.
    pub const LOCATION: Self = Self(0x10);

    /// Wraps a raw service number.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw service number.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::LOCATION {
            formatter.write_str("loc")
        } else {
            write!(formatter, "0x{:02x}", self.0)
        }
    }
}

/// Connected service-discovery bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusHandle {
    id: u32,
}

impl BusHandle {
    /// Wraps a transport supplied bus identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self { id }
    }

    /// Transport supplied bus identifier.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }
}

/// Endpoint discovered on the bus together with its port table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: u32,
    ports: BTreeMap<ServiceId, u32>,
}

impl Node {
    /// Builds a node without any registered services.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self {
            id,
            ports: BTreeMap::new(),
        }
    }

    /// Registers `service` on `port`.
    #[must_use]
    pub fn with_service(mut self, service: ServiceId, port: u32) -> Self {
        self.ports.insert(service, port);
        self
    }

    /// Node identifier on the bus.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Port serving `service`, when registered.
    #[must_use]
    pub fn lookup_port(&self, service: ServiceId) -> Option<u32> {
        self.ports.get(&service).copied()
    }

    /// Returns `true` when the port table contains `service`.
    #[must_use]
    pub fn has_service(&self, service: ServiceId) -> bool {
        self.ports.contains_key(&service)
    }
}

/// Opened connection to a node's protocol multiplexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    node: u32,
    path: String,
}

impl DeviceHandle {
    /// Builds a device handle bound to `node`.
    #[must_use]
    pub fn new(node: u32, path: impl Into<String>) -> Self {
        Self {
            node,
            path: path.into(),
        }
    }

    /// Node the device is bound to.
    #[must_use]
    pub const fn node(&self) -> u32 {
        self.node
    }

    /// Human-readable device path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// Allocated channel to one service on a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHandle {
    service: ServiceId,
    client_id: u8,
}

impl ClientHandle {
    /// Builds a client handle.
    #[must_use]
    pub const fn new(service: ServiceId, client_id: u8) -> Self {
        Self { service, client_id }
    }

    /// Service the client talks to.
    #[must_use]
    pub const fn service(&self) -> ServiceId {
        self.service
    }

    /// Client identifier assigned by the device.
    #[must_use]
    pub const fn client_id(&self) -> u8 {
        self.client_id
    }
}

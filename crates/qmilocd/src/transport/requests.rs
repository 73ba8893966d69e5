//! Request payloads and flag sets submitted to the transport.

use std::time::Duration;

use bitflags::bitflags;
use thiserror::Error;

use qmiloc_config::SessionParameters;

bitflags! {
    /// Flags applied when opening a device.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        /// Detect the protocol framing automatically.
        const AUTO = 1 << 0;
        /// Deliver asynchronous indications to allocated clients.
        const EXPECT_INDICATIONS = 1 << 1;
    }
}

bitflags! {
    /// Indications a client asks to receive.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct EventMask: u64 {
        /// Position report indications.
        const POSITION_REPORT = 1 << 0;
    }
}

bitflags! {
    /// Flags applied when releasing a client. The empty set releases the
    /// client handle only.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ReleaseFlags: u32 {
        /// Also give the client identifier back to the device.
        const RELEASE_CID = 1 << 0;
    }
}

/// Whether the modem sends intermediate, non-final fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntermediateReports {
    /// Intermediate reports are delivered.
    Enabled,
    /// Only final fixes are delivered.
    Disabled,
}

/// How often the modem produces fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixRecurrence {
    /// Recurring fixes at the configured interval.
    Periodic,
    /// A single fix.
    Single,
}

/// Errors raised while building a [`StartRequest`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StartRequestError {
    /// The minimum report interval was zero.
    #[error("minimum interval between reports must be non-zero")]
    ZeroInterval,
    /// The minimum report interval does not fit the request field.
    #[error("minimum interval of {} ms exceeds the supported range", interval.as_millis())]
    IntervalOutOfRange {
        /// Interval that was requested.
        interval: Duration,
    },
}

/// Session start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    session_id: u8,
    intermediate_reports: IntermediateReports,
    min_interval_ms: u32,
    recurrence: FixRecurrence,
}

impl StartRequest {
    /// Builds a periodic request with intermediate reports enabled.
    ///
    /// Fails instead of producing a partially populated request.
    pub fn periodic(parameters: &SessionParameters) -> Result<Self, StartRequestError> {
        let interval = parameters.min_report_interval;
        if interval.is_zero() {
            return Err(StartRequestError::ZeroInterval);
        }
        let min_interval_ms = u32::try_from(interval.as_millis())
            .map_err(|_| StartRequestError::IntervalOutOfRange { interval })?;
        Ok(Self {
            session_id: parameters.session_id,
            intermediate_reports: IntermediateReports::Enabled,
            min_interval_ms,
            recurrence: FixRecurrence::Periodic,
        })
    }

    /// Fixed session identifier.
    #[must_use]
    pub const fn session_id(&self) -> u8 {
        self.session_id
    }

    /// Intermediate report setting.
    #[must_use]
    pub const fn intermediate_reports(&self) -> IntermediateReports {
        self.intermediate_reports
    }

    /// Minimum interval between reports, in milliseconds.
    #[must_use]
    pub const fn min_interval_ms(&self) -> u32 {
        self.min_interval_ms
    }

    /// Fix recurrence mode.
    #[must_use]
    pub const fn recurrence(&self) -> FixRecurrence {
        self.recurrence
    }
}

//! Report subscription scoped to the positioning client.
//!
//! The session driver keeps the [`ReportSubscription`]; the transport keeps
//! the matching [`ReportSender`]. Once the subscription is dropped the sender
//! stops forwarding, so indications that trail a client release never reach
//! the cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::report::PositionReport;
use crate::runtime::{EventSender, LoopEvent};

/// Creates a linked subscription and sender pair.
#[must_use]
pub fn channel(events: EventSender) -> (ReportSubscription, ReportSender) {
    let active = Arc::new(AtomicBool::new(true));
    let subscription = ReportSubscription {
        active: Arc::clone(&active),
    };
    let sender = ReportSender { events, active };
    (subscription, sender)
}

/// Live registration of the report handler.
#[derive(Debug)]
pub struct ReportSubscription {
    active: Arc<AtomicBool>,
}

impl ReportSubscription {
    /// Returns `true` until the subscription is detached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stops forwarding reports.
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for ReportSubscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Transport side of a report subscription.
#[derive(Debug, Clone)]
pub struct ReportSender {
    events: EventSender,
    active: Arc<AtomicBool>,
}

impl ReportSender {
    /// Forwards `report` to the event loop.
    ///
    /// Returns `false` when the subscription was detached or the loop has
    /// stopped.
    pub fn deliver(&self, report: PositionReport) -> bool {
        if !self.is_active() {
            return false;
        }
        self.events.post(LoopEvent::Report(report))
    }

    /// Returns `true` while the owning subscription is alive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

use std::io;
use std::thread::{self, JoinHandle};

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;
use thiserror::Error;
use tracing::{debug, info};

use super::PROCESS_TARGET;
use crate::runtime::{EventSender, LoopEvent};

/// Abstraction over shutdown notification mechanisms.
pub trait ShutdownSignal: Send + 'static {
    /// Blocks until shutdown is requested. Returns `false` when no further
    /// request can arrive.
    fn wait(&mut self) -> bool;
}

/// Errors reported by shutdown signal listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing signal handlers failed.
    #[error("failed to install signal handlers: {source}")]
    Install {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Spawning the forwarding thread failed.
    #[error("failed to spawn the signal forwarder: {source}")]
    Spawn {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Shutdown listener that waits for termination signals.
pub struct SystemShutdownSignal {
    signals: Signals,
}

impl SystemShutdownSignal {
    /// Registers handlers for SIGTERM, SIGINT, SIGQUIT and SIGHUP.
    pub fn install() -> Result<Self, ShutdownError> {
        let signals = Signals::new([SIGTERM, SIGINT, SIGQUIT, SIGHUP])
            .map_err(|source| ShutdownError::Install { source })?;
        Ok(Self { signals })
    }
}

impl ShutdownSignal for SystemShutdownSignal {
    fn wait(&mut self) -> bool {
        match self.signals.forever().next() {
            Some(signal) => {
                info!(target: PROCESS_TARGET, signal, "shutdown signal received");
                true
            }
            None => false,
        }
    }
}

/// Spawns a thread posting [`LoopEvent::Shutdown`] for every request the
/// listener observes, until the loop goes away.
pub(crate) fn spawn_forwarder<S>(
    mut signal: S,
    events: EventSender,
) -> Result<JoinHandle<()>, ShutdownError>
where
    S: ShutdownSignal,
{
    thread::Builder::new()
        .name(String::from("qmilocd-signals"))
        .spawn(move || {
            while signal.wait() {
                if !events.post(LoopEvent::Shutdown) {
                    debug!(target: PROCESS_TARGET, "event loop gone; stopping signal forwarder");
                    break;
                }
            }
        })
        .map_err(|source| ShutdownError::Spawn { source })
}

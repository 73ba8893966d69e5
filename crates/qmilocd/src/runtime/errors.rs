use thiserror::Error;

/// Errors raised by the event loop and its handles.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LoopError {
    /// The event loop stopped before the call could be served.
    #[error("event loop is no longer running")]
    Disconnected,
}

//! Error types for console operations.

use thiserror::Error;

/// Errors produced by the console engine.
///
/// Only [`InvalidArgument`](ConsoleError::InvalidArgument),
/// [`NotFound`](ConsoleError::NotFound) from direct lookups and
/// [`Busy`](ConsoleError::Busy) ever reach the caller. Unknown commands and
/// handler faults during [`execute`](super::ConsoleEngine::execute) are turned
/// into printed diagnostics instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Malformed registration input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No command is registered under this name.
    #[error("Unknown command: '{0}'")]
    NotFound(String),

    /// A handler tried to execute a line on the engine that is running it.
    #[error("console is busy executing another command")]
    Busy,

    /// A command handler returned an error or panicked.
    #[error("Command '{name}' failed: {reason}")]
    HandlerFault {
        /// Command that faulted.
        name: String,
        /// Error message or panic payload.
        reason: String,
    },
}

impl ConsoleError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ConsoleError::InvalidArgument(msg.into())
    }
}

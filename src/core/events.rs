//! Console input/output events.
//!
//! [`ConsoleEvent`] is what the engine queues for the host: printed lines and
//! clear requests, in the order they happened. With the `bevy` feature the
//! same types double as Bevy messages.

#[cfg(feature = "bevy")]
use bevy::prelude::*;

/// A line submitted to the console by the host.
///
/// # Examples
///
/// ```ignore
/// fn submit_command(mut events: MessageWriter<ConsoleInputEvent>) {
///     events.write(ConsoleInputEvent::new("spawn crate 3"));
/// }
/// ```
#[cfg_attr(feature = "bevy", derive(Message))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleInputEvent {
    /// The raw line to execute.
    pub command: String,
}

impl ConsoleInputEvent {
    /// Create an input event for a raw line.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

/// A line of console output.
#[cfg_attr(feature = "bevy", derive(Message))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOutputEvent {
    /// The message text.
    pub message: String,
    /// The log level/type.
    pub level: ConsoleOutputLevel,
}

/// Log level for console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleOutputLevel {
    /// Debug information (gray).
    Debug,
    /// General information (white).
    #[default]
    Info,
    /// Warning (yellow).
    Warn,
    /// Error (red).
    Error,
    /// Echo of an executed line.
    Command,
    /// Command result/response.
    Result,
}

impl ConsoleOutputEvent {
    /// Create a message at the given level.
    pub fn new(level: ConsoleOutputLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    /// Create a debug message.
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Debug, message)
    }

    /// Create an info message.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Info, message)
    }

    /// Create a warning message.
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Warn, message)
    }

    /// Create an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Error, message)
    }

    /// Create a command echo message.
    pub fn command(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Command, message)
    }

    /// Create a command result message.
    pub fn result(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Result, message)
    }
}

/// Request for the host to clear its visible output.
#[cfg_attr(feature = "bevy", derive(Message))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsoleClearEvent;

/// Something the host should apply to its output view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// Show a line.
    Output(ConsoleOutputEvent),
    /// Clear everything shown so far.
    Clear,
}

impl ConsoleEvent {
    /// The output line, if this is one.
    pub fn as_output(&self) -> Option<&ConsoleOutputEvent> {
        match self {
            ConsoleEvent::Output(out) => Some(out),
            ConsoleEvent::Clear => None,
        }
    }

    /// Whether this is a clear request.
    #[inline]
    pub fn is_clear(&self) -> bool {
        matches!(self, ConsoleEvent::Clear)
    }
}

impl From<ConsoleOutputEvent> for ConsoleEvent {
    fn from(out: ConsoleOutputEvent) -> Self {
        ConsoleEvent::Output(out)
    }
}

/// Plugin that registers all console messages.
#[cfg(feature = "bevy")]
pub struct ConsoleEventsPlugin;

#[cfg(feature = "bevy")]
impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleOutputEvent>()
            .add_message::<ConsoleClearEvent>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_input_event() {
        let event = ConsoleInputEvent::new("god 1");
        assert_eq!(event.command, "god 1");
    }

    #[test]
    fn test_console_output_event() {
        let event = ConsoleOutputEvent::error("Something went wrong");
        assert_eq!(event.level, ConsoleOutputLevel::Error);
        assert_eq!(event.message, "Something went wrong");
    }

    #[test]
    fn test_console_event_accessors() {
        let line: ConsoleEvent = ConsoleOutputEvent::info("hi").into();
        assert_eq!(line.as_output().map(|o| o.message.as_str()), Some("hi"));
        assert!(!line.is_clear());

        assert!(ConsoleEvent::Clear.is_clear());
        assert!(ConsoleEvent::Clear.as_output().is_none());
    }
}

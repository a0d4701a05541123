//! Core console types with zero optional dependencies.
//!
//! This module provides the fundamental building blocks:
//! - [`ConsoleEngine`] - Registry, history, autocomplete and output queue in one place
//! - [`Command`] - A named handler with a description
//! - [`CommandRegistry`] - Ordered command storage with prefix lookup
//! - [`HistoryBuffer`] - Executed lines with cursor navigation
//! - [`Autocompleter`] - Prefix completion over command names
//! - [`Trie`] - Fast prefix lookup for autocomplete
//! - [`CommandLine`] - Splits a line into command name and remainder
//! - Events for communication with the host

mod autocomplete;
mod builtins;
mod command;
mod engine;
mod error;
mod events;
mod history;
mod registry;
mod tokenizer;
mod trie;

pub use autocomplete::Autocompleter;
pub use command::{
    BoundHandler, BoundMethod, Command, CommandArgs, CommandHandler, HandlerResult,
};
pub use engine::{COMMAND_ECHO_PREFIX, ConsoleEngine};
pub use error::ConsoleError;
pub use events::{
    ConsoleClearEvent, ConsoleEvent, ConsoleInputEvent, ConsoleOutputEvent, ConsoleOutputLevel,
};
#[cfg(feature = "bevy")]
pub use events::ConsoleEventsPlugin;
pub use history::HistoryBuffer;
pub use registry::CommandRegistry;
pub use tokenizer::CommandLine;
pub use trie::Trie;

//! A minimal, embeddable developer console engine.
//!
//! dev_console provides:
//!
//! - **Commands**: Named handlers (closures or methods on host objects) with descriptions
//! - **History**: Executed lines with previous/next navigation
//! - **Autocomplete**: Deterministic prefix completion over command names
//! - **Output queue**: Printed lines and clear requests for the host to render
//!
//! # Features
//!
//! - `bevy` (default): [`ConsoleEngine`] as a resource, driven by console messages
//! - `capture`: Route `tracing` events into the console output
//! - `persist`: Load/save [`ConsoleConfig`] as RON
//! - `full`: Enable everything
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use dev_console::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ConsolePlugin::default())
//!         .add_systems(Startup, setup_console)
//!         .run();
//! }
//!
//! fn setup_console(mut console: ResMut<ConsoleEngine>) {
//!     console
//!         .create_command(
//!             "noclip",
//!             |console: &mut ConsoleEngine, _args| {
//!                 console.print_line("Noclip toggled!");
//!                 Ok(())
//!             },
//!             "Toggle noclip mode",
//!         )
//!         .unwrap();
//! }
//! ```
//!
//! Without Bevy the engine is driven directly:
//!
//! ```
//! use dev_console::{ConsoleConfig, ConsoleEngine};
//!
//! let mut console = ConsoleEngine::with_config(ConsoleConfig {
//!     echo_commands: false,
//!     ..Default::default()
//! });
//! console.execute("echo hi").unwrap();
//!
//! let out = console.drain_output();
//! assert_eq!(out[0].as_output().unwrap().message, "hi");
//! ```

#[cfg(feature = "bevy")]
use bevy::prelude::*;

// Core module (always available, zero optional deps)
pub mod core;

pub mod config;

// Log capture (feature-gated)
#[cfg(feature = "capture")]
pub mod logging;

// Re-export core types at crate root for convenience
pub use crate::core::{
    Autocompleter, BoundHandler, BoundMethod, COMMAND_ECHO_PREFIX, Command, CommandArgs,
    CommandHandler, CommandLine, CommandRegistry, ConsoleClearEvent, ConsoleEngine, ConsoleError,
    ConsoleEvent, ConsoleInputEvent, ConsoleOutputEvent, ConsoleOutputLevel, HandlerResult,
    HistoryBuffer, Trie,
};

#[cfg(feature = "bevy")]
pub use crate::core::ConsoleEventsPlugin;

pub use config::{ConsoleConfig, DEFAULT_CONFIG_FILE, DEFAULT_HISTORY_LIMIT};

#[cfg(feature = "persist")]
pub use config::ConfigError;

#[cfg(feature = "capture")]
pub use logging::{CapturedLogs, LogCaptureLayer, capture_layer};

#[cfg(all(feature = "capture", feature = "bevy"))]
pub use logging::custom_log_layer;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::ConsoleConfig;
    pub use crate::core::{
        Command, CommandArgs, ConsoleClearEvent, ConsoleEngine, ConsoleError, ConsoleEvent,
        ConsoleInputEvent, ConsoleOutputEvent, ConsoleOutputLevel, HandlerResult,
    };
    #[cfg(feature = "bevy")]
    pub use crate::ConsolePlugin;
}

/// Main console plugin.
///
/// Inserts a [`ConsoleEngine`] resource built from `config`, executes every
/// [`ConsoleInputEvent`] and forwards the engine output as
/// [`ConsoleOutputEvent`] / [`ConsoleClearEvent`] messages.
///
/// Outputs and clears travel on separate message queues. Hosts that need the
/// exact interleaving should drain the resource themselves before
/// [`send_console_output`] runs.
///
/// # Configuration
///
/// ```ignore
/// ConsolePlugin {
///     config: ConsoleConfig {
///         history_limit: 500,
///         ..Default::default()
///     },
/// }
/// ```
#[cfg(feature = "bevy")]
#[derive(Default)]
pub struct ConsolePlugin {
    pub config: ConsoleConfig,
}

#[cfg(feature = "bevy")]
impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ConsoleEngine::with_config(self.config.clone()))
            .add_plugins(crate::core::ConsoleEventsPlugin);

        // 1. execute_console_input: Run each submitted line against the engine
        // 2. send_console_output: Forward queued output as messages
        app.add_systems(Update, (execute_console_input, send_console_output).chain());
    }
}

/// System that executes console input lines in arrival order.
#[cfg(feature = "bevy")]
pub fn execute_console_input(
    mut input_events: MessageReader<ConsoleInputEvent>,
    mut console: ResMut<ConsoleEngine>,
) {
    for event in input_events.read() {
        if let Err(e) = console.execute(&event.command) {
            warn!("Console: dropped input '{}': {}", event.command, e);
        }
    }
}

/// System that sends queued engine output as messages.
#[cfg(feature = "bevy")]
pub fn send_console_output(
    mut console: ResMut<ConsoleEngine>,
    mut output_events: MessageWriter<ConsoleOutputEvent>,
    mut clear_events: MessageWriter<ConsoleClearEvent>,
) {
    if console.pending_output().is_empty() {
        return;
    }

    for event in console.drain_output() {
        match event {
            ConsoleEvent::Output(output) => {
                output_events.write(output);
            }
            ConsoleEvent::Clear => {
                clear_events.write(ConsoleClearEvent);
            }
        }
    }
}

//! Route [`tracing`] events into the console output.
//!
//! [`capture_layer`] returns a [`Layer`] and the receiving end of its channel.
//! Install the layer in any subscriber, then call
//! [`CapturedLogs::forward_into`] from the thread that owns the engine.
//! With Bevy, [`custom_log_layer`] plugs straight into
//! [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).

use std::sync::mpsc;

#[cfg(feature = "bevy")]
use bevy::log::BoxedLayer;
#[cfg(feature = "bevy")]
use bevy::prelude::{App, NonSend, PostUpdate, ResMut};
use tracing::{Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::field::Visit;
use tracing_subscriber::registry::LookupSpan;

use crate::core::{ConsoleEngine, ConsoleOutputLevel};

/// Events from this crate are never captured, so engine diagnostics cannot
/// feed back into the engine output.
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");
const OWN_MODULE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// Whether `target` is this crate or one of its modules.
fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET || target.starts_with(OWN_MODULE_PREFIX)
}

/// A log event waiting to be forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLog {
    pub level: Level,
    pub target: &'static str,
    pub message: String,
}

impl CapturedLog {
    /// The console level this event is printed at.
    pub fn output_level(&self) -> ConsoleOutputLevel {
        match self.level {
            Level::ERROR => ConsoleOutputLevel::Error,
            Level::WARN => ConsoleOutputLevel::Warn,
            Level::INFO => ConsoleOutputLevel::Info,
            _ => ConsoleOutputLevel::Debug,
        }
    }
}

/// Create a capture layer recording events at `max_level` or more severe.
///
/// # Examples
///
/// ```
/// use dev_console::{ConsoleEngine, capture_layer};
/// use tracing::Level;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let (layer, logs) = capture_layer(Level::INFO);
/// let subscriber = tracing_subscriber::registry().with(layer);
/// tracing::subscriber::with_default(subscriber, || {
///     tracing::info!(target: "game", "level loaded");
/// });
///
/// let mut console = ConsoleEngine::new();
/// assert_eq!(logs.forward_into(&mut console), 1);
/// ```
pub fn capture_layer(max_level: Level) -> (LogCaptureLayer, CapturedLogs) {
    let (sender, receiver) = mpsc::channel();
    (LogCaptureLayer { sender, max_level }, CapturedLogs { receiver })
}

/// A [`Layer`] that sends log events to [`CapturedLogs`].
pub struct LogCaptureLayer {
    sender: mpsc::Sender<CapturedLog>,
    max_level: Level,
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for LogCaptureLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        if *metadata.level() > self.max_level || is_own_target(metadata.target()) {
            return;
        }

        let mut message = None;
        event.record(&mut LogEventVisitor(&mut message));
        if let Some(message) = message {
            // The receiver may be gone; dropping the event is fine
            let _ = self.sender.send(CapturedLog {
                level: *metadata.level(),
                target: metadata.target(),
                message,
            });
        }
    }
}

/// Receiving end of a [`LogCaptureLayer`].
pub struct CapturedLogs {
    receiver: mpsc::Receiver<CapturedLog>,
}

impl CapturedLogs {
    /// Print every pending event to `console`. Returns how many were forwarded.
    pub fn forward_into(&self, console: &mut ConsoleEngine) -> usize {
        let mut count = 0;
        for log in self.receiver.try_iter() {
            console.print(log.output_level(), log.message);
            count += 1;
        }
        count
    }

    /// Take every pending event without printing it.
    pub fn drain(&self) -> Vec<CapturedLog> {
        self.receiver.try_iter().collect()
    }
}

/// A [`Visit`]or that records the `message` field of an event.
struct LogEventVisitor<'a>(&'a mut Option<String>);

impl Visit for LogEventVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // Only log out messages
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

/// Log layer for [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer)
/// that forwards `INFO` and more severe events into the [`ConsoleEngine`] resource.
#[cfg(feature = "bevy")]
pub fn custom_log_layer(app: &mut App) -> Option<BoxedLayer> {
    let (layer, logs) = capture_layer(Level::INFO);
    app.insert_non_send_resource(logs);
    app.add_systems(PostUpdate, forward_captured_logs);
    Some(Box::new(layer))
}

/// Transfers captured events into the engine, or discards them if there is none.
#[cfg(feature = "bevy")]
fn forward_captured_logs(logs: NonSend<CapturedLogs>, console: Option<ResMut<ConsoleEngine>>) {
    match console {
        Some(mut console) => {
            logs.forward_into(&mut console);
        }
        None => {
            logs.drain();
        }
    }
}

//! The console engine.
//!
//! [`ConsoleEngine`] composes the [`CommandRegistry`], the [`HistoryBuffer`]
//! and the [`Autocompleter`], and queues [`ConsoleEvent`]s for the host.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

use super::{
    Autocompleter, BoundMethod, Command, CommandArgs, CommandHandler, CommandLine,
    CommandRegistry, ConsoleError, ConsoleEvent, ConsoleOutputEvent, ConsoleOutputLevel,
    HandlerResult, HistoryBuffer, builtins,
};
use crate::config::ConsoleConfig;

/// Prefix for echoed command lines.
pub const COMMAND_ECHO_PREFIX: &str = "$ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EngineState {
    #[default]
    Idle,
    Executing,
}

/// A developer console: commands, history, autocomplete and an output queue.
///
/// The host owns one engine, feeds it lines with [`execute`](Self::execute)
/// and drains what it printed with [`drain_output`](Self::drain_output).
///
/// # Examples
///
/// ```
/// use dev_console::{ConsoleEngine, ConsoleEvent};
///
/// let mut console = ConsoleEngine::new();
/// console
///     .create_command(
///         "greet",
///         |console: &mut ConsoleEngine, args| {
///             console.print_line(format!("Hello, {}!", args.get(0).unwrap_or("World")));
///             Ok(())
///         },
///         "Greet someone",
///     )
///     .unwrap();
///
/// console.execute("greet Developer").unwrap();
///
/// let lines: Vec<String> = console
///     .drain_output()
///     .into_iter()
///     .filter_map(|e| e.as_output().map(|o| o.message.clone()))
///     .collect();
/// assert_eq!(lines, vec!["$ greet Developer", "Hello, Developer!"]);
/// assert_eq!(console.prev_command(), "greet Developer");
/// ```
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct ConsoleEngine {
    registry: CommandRegistry,
    history: HistoryBuffer,
    output: Vec<ConsoleEvent>,
    state: EngineState,
    config: ConsoleConfig,
}

impl Default for ConsoleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ConsoleConfig::default())
    }

    /// Create an engine from a configuration.
    pub fn with_config(config: ConsoleConfig) -> Self {
        let mut registry = CommandRegistry::new();
        if config.builtins {
            if let Err(e) = builtins::register(&mut registry) {
                tracing::error!("Failed to register built-in commands: {}", e);
            }
        }

        Self {
            registry,
            history: HistoryBuffer::with_limit(config.history_limit),
            output: Vec::new(),
            state: EngineState::Idle,
            config,
        }
    }

    // -- Registration --

    /// Register a command, replacing any command with the same name.
    ///
    /// Returns `true` if the name was new.
    pub fn register(&mut self, cmd: Command) -> Result<bool, ConsoleError> {
        self.registry.register(cmd)
    }

    /// Register a closure as a command.
    pub fn create_command<F>(
        &mut self,
        name: impl Into<Box<str>>,
        handler: F,
        description: impl Into<String>,
    ) -> Result<bool, ConsoleError>
    where
        F: Fn(&mut ConsoleEngine, &CommandArgs<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(Command::new(name, handler).description(description))
    }

    /// Register a method on a host object as a command.
    ///
    /// The engine keeps only a weak reference to `target`. Fails with
    /// [`ConsoleError::InvalidArgument`] if `target` is already gone.
    pub fn create_bound_command<T>(
        &mut self,
        name: impl Into<Box<str>>,
        target: &Arc<T>,
        method: BoundMethod<T>,
        description: impl Into<String>,
    ) -> Result<bool, ConsoleError>
    where
        T: Send + Sync + 'static,
    {
        self.register(Command::bound(name, target, method).description(description))
    }

    /// Remove a command. Returns `true` if it existed.
    pub fn remove_command(&mut self, name: &str) -> bool {
        self.registry.remove(name)
    }

    /// Whether a command with this exact name exists.
    #[inline]
    pub fn has_command(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Description of a command, [`ConsoleError::NotFound`] if unknown.
    pub fn command_description(&self, name: &str) -> Result<&str, ConsoleError> {
        self.registry.description(name)
    }

    /// Command names in registration order.
    pub fn command_list(&self) -> Vec<&str> {
        self.registry.names()
    }

    // -- Execution --

    /// Execute a line.
    ///
    /// Unknown commands and handler failures (errors or panics) are printed
    /// as `Error` output and do not propagate. The raw line is appended to
    /// history either way; blank lines are ignored.
    ///
    /// The only error is [`ConsoleError::Busy`], returned when a running
    /// handler calls back into `execute`. The nested call has no effect.
    pub fn execute(&mut self, line: &str) -> Result<(), ConsoleError> {
        if self.state == EngineState::Executing {
            tracing::warn!("Console: rejected nested execution of '{}'", line.trim());
            return Err(ConsoleError::Busy);
        }

        let Some(parsed) = CommandLine::parse(line) else {
            return Ok(());
        };

        if self.config.echo_commands {
            self.push(ConsoleOutputEvent::command(format!(
                "{COMMAND_ECHO_PREFIX}{}",
                line.trim()
            )));
        }

        let outcome = match self.registry.handler(parsed.name) {
            Some(handler) => {
                tracing::debug!("Console: executing '{}'", parsed.name);
                let args = CommandArgs::new(line, parsed.remainder);
                self.run_handler(parsed.name, handler.as_ref(), &args)
            }
            None => Err(ConsoleError::NotFound(parsed.name.to_string())),
        };

        if let Err(e) = outcome {
            self.push(ConsoleOutputEvent::error(e.to_string()));
        }

        self.history.append(line);
        Ok(())
    }

    fn run_handler(
        &mut self,
        name: &str,
        handler: &dyn CommandHandler,
        args: &CommandArgs<'_>,
    ) -> Result<(), ConsoleError> {
        self.state = EngineState::Executing;
        // State is restored even if the handler panics
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.call(self, args)));
        self.state = EngineState::Idle;

        let reason = match outcome {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(e)) => e.to_string(),
            Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
        };

        Err(ConsoleError::HandlerFault {
            name: name.to_string(),
            reason,
        })
    }

    /// Whether a handler is currently running.
    #[inline]
    pub fn is_executing(&self) -> bool {
        self.state == EngineState::Executing
    }

    // -- Output --

    /// Print a line of text unchanged.
    pub fn print_line(&mut self, text: impl Into<String>) {
        self.push(ConsoleOutputEvent::info(text));
    }

    /// Print a line at a given level.
    pub fn print(&mut self, level: ConsoleOutputLevel, text: impl Into<String>) {
        self.push(ConsoleOutputEvent::new(level, text));
    }

    /// Ask the host to clear its visible output.
    ///
    /// Does not touch the registry or history.
    pub fn clear(&mut self) {
        self.output.push(ConsoleEvent::Clear);
    }

    fn push(&mut self, out: ConsoleOutputEvent) {
        self.output.push(ConsoleEvent::Output(out));
    }

    /// Take every queued event, oldest first.
    pub fn drain_output(&mut self) -> Vec<ConsoleEvent> {
        std::mem::take(&mut self.output)
    }

    /// Queued events not yet drained.
    #[inline]
    pub fn pending_output(&self) -> &[ConsoleEvent] {
        &self.output
    }

    // -- History --

    /// Step back through history. Empty string when there is none.
    pub fn prev_command(&mut self) -> String {
        self.history.previous()
    }

    /// Step forward through history. Empty string when back at fresh input.
    pub fn next_command(&mut self) -> String {
        self.history.next()
    }

    /// Executed lines, oldest first.
    #[inline]
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Mutable access to the history, e.g. to clear it.
    #[inline]
    pub fn history_mut(&mut self) -> &mut HistoryBuffer {
        &mut self.history
    }

    // -- Autocomplete --

    /// Autocompleter over the current registry.
    pub fn autocompleter(&self) -> Autocompleter<'_> {
        Autocompleter::new(&self.registry)
    }

    /// See [`Autocompleter::complete`].
    pub fn autocomplete_command(&self, prefix: &str, selected_index: isize) -> String {
        self.autocompleter().complete(prefix, selected_index)
    }

    /// See [`Autocompleter::complete_list`].
    pub fn autocomplete_list(&self, prefix: &str, selected_index: isize) -> Vec<String> {
        self.autocompleter().complete_list(prefix, selected_index)
    }

    // -- Accessors --

    /// The command registry.
    #[inline]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The configuration this engine was built with.
    #[inline]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}

impl std::fmt::Debug for ConsoleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleEngine")
            .field("registry", &self.registry)
            .field("history", &self.history)
            .field("pending_output", &self.output.len())
            .field("state", &self.state)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn bare() -> ConsoleEngine {
        ConsoleEngine::with_config(ConsoleConfig {
            builtins: false,
            echo_commands: false,
            ..Default::default()
        })
    }

    fn messages(console: &mut ConsoleEngine) -> Vec<(ConsoleOutputLevel, String)> {
        console
            .drain_output()
            .into_iter()
            .filter_map(|e| e.as_output().map(|o| (o.level, o.message.clone())))
            .collect()
    }

    #[test]
    fn test_unknown_command_is_reported_not_raised() {
        let mut console = bare();

        assert!(console.execute("unknown arg").is_ok());
        assert_eq!(console.history().last(), Some("unknown arg"));
        assert_eq!(
            messages(&mut console),
            vec![(
                ConsoleOutputLevel::Error,
                "Unknown command: 'unknown'".to_string()
            )]
        );
    }

    #[test]
    fn test_handler_receives_remainder() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut console = bare();
        console
            .create_command(
                "say",
                move |_: &mut ConsoleEngine, args| {
                    sink.lock()
                        .unwrap()
                        .push((args.remainder().to_string(), args.len()));
                    Ok(())
                },
                "",
            )
            .unwrap();

        console.execute("say  hello   there ").unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![("hello   there".to_string(), 2)]);
        assert_eq!(console.history().last(), Some("say  hello   there "));
    }

    #[test]
    fn test_overwritten_command_runs_latest_handler() {
        let mut console = bare();
        console
            .create_command(
                "x",
                |c: &mut ConsoleEngine, _| {
                    c.print_line("old");
                    Ok(())
                },
                "First",
            )
            .unwrap();
        let is_new = console
            .create_command(
                "x",
                |c: &mut ConsoleEngine, _| {
                    c.print_line("new");
                    Ok(())
                },
                "Second",
            )
            .unwrap();
        assert!(!is_new);

        console.execute("x").unwrap();

        assert_eq!(
            messages(&mut console),
            vec![(ConsoleOutputLevel::Info, "new".to_string())]
        );
        assert_eq!(console.command_list(), vec!["x"]);
        assert_eq!(console.command_description("x"), Ok("Second"));
    }

    #[test]
    fn test_clear_handler_emits_one_clear() {
        let mut console = bare();
        console
            .create_command(
                "clear",
                |console: &mut ConsoleEngine, _| {
                    console.clear();
                    Ok(())
                },
                "Clear the console",
            )
            .unwrap();

        console.execute("clear").unwrap();

        let events = console.drain_output();
        assert_eq!(events.iter().filter(|e| e.is_clear()).count(), 1);
        assert_eq!(console.history().iter().collect::<Vec<_>>(), vec!["clear"]);
        assert!(console.has_command("clear"));
    }

    #[test]
    fn test_handler_error_is_reported() {
        let mut console = bare();
        console
            .create_command(
                "fail",
                |_: &mut ConsoleEngine, _| Err("disk on fire".into()),
                "",
            )
            .unwrap();

        console.execute("fail now").unwrap();

        assert_eq!(
            messages(&mut console),
            vec![(
                ConsoleOutputLevel::Error,
                "Command 'fail' failed: disk on fire".to_string()
            )]
        );
        assert_eq!(console.history().last(), Some("fail now"));
        assert!(!console.is_executing());
    }

    #[test]
    fn test_handler_panic_is_contained() {
        let mut console = bare();
        console
            .create_command("boom", |_: &mut ConsoleEngine, _| panic!("kaboom"), "")
            .unwrap();

        console.execute("boom").unwrap();

        let out = messages(&mut console);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, ConsoleOutputLevel::Error);
        assert_eq!(out[0].1, "Command 'boom' failed: panicked: kaboom");
        assert!(!console.is_executing());

        // Still usable afterwards
        console
            .create_command(
                "ok",
                |c: &mut ConsoleEngine, _| {
                    c.print_line("fine");
                    Ok(())
                },
                "",
            )
            .unwrap();
        console.execute("ok").unwrap();
        assert_eq!(
            messages(&mut console),
            vec![(ConsoleOutputLevel::Info, "fine".to_string())]
        );
    }

    #[test]
    fn test_nested_execute_is_busy() {
        let nested = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&nested);
        let inner_runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&inner_runs);

        let mut console = bare();
        console
            .create_command(
                "inner",
                move |_: &mut ConsoleEngine, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                "",
            )
            .unwrap();
        console
            .create_command(
                "outer",
                move |c: &mut ConsoleEngine, _| {
                    assert!(c.is_executing());
                    *slot.lock().unwrap() = Some(c.execute("inner"));
                    Ok(())
                },
                "",
            )
            .unwrap();

        console.execute("outer").unwrap();

        assert_eq!(*nested.lock().unwrap(), Some(Err(ConsoleError::Busy)));
        assert_eq!(inner_runs.load(Ordering::SeqCst), 0);
        // The nested line leaves no trace
        assert_eq!(console.history().iter().collect::<Vec<_>>(), vec!["outer"]);
        assert!(messages(&mut console).is_empty());
    }

    #[test]
    fn test_busy_propagated_by_handler_is_reported() {
        let mut console = bare();
        console
            .create_command(
                "again",
                |c: &mut ConsoleEngine, args| {
                    c.execute(args.raw())?;
                    Ok(())
                },
                "",
            )
            .unwrap();

        console.execute("again").unwrap();
        assert_eq!(
            messages(&mut console),
            vec![(
                ConsoleOutputLevel::Error,
                "Command 'again' failed: console is busy executing another command".to_string()
            )]
        );
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let mut console = ConsoleEngine::new();
        console.execute("   ").unwrap();
        assert!(console.history().is_empty());
        assert!(console.pending_output().is_empty());
    }

    #[test]
    fn test_echo_commands() {
        let mut console = ConsoleEngine::with_config(ConsoleConfig {
            builtins: false,
            ..Default::default()
        });
        console.execute("  nope  ").unwrap();

        assert_eq!(
            messages(&mut console),
            vec![
                (ConsoleOutputLevel::Command, "$ nope".to_string()),
                (ConsoleOutputLevel::Error, "Unknown command: 'nope'".to_string()),
            ]
        );
    }

    #[test]
    fn test_history_navigation_through_engine() {
        let mut console = bare();
        console.execute("one").unwrap();
        console.execute("two").unwrap();

        assert_eq!(console.prev_command(), "two");
        assert_eq!(console.prev_command(), "one");
        assert_eq!(console.next_command(), "two");
        assert_eq!(console.next_command(), "");
    }

    #[test]
    fn test_history_limit_from_config() {
        let mut console = ConsoleEngine::with_config(ConsoleConfig {
            history_limit: 2,
            builtins: false,
            echo_commands: false,
        });
        for line in ["a", "b", "c"] {
            console.execute(line).unwrap();
        }
        assert_eq!(console.history().iter().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_print_and_clear_keep_order() {
        let mut console = bare();
        console.print_line("before");
        console.clear();
        console.print(ConsoleOutputLevel::Warn, "after");

        assert_eq!(
            console.drain_output(),
            vec![
                ConsoleEvent::Output(ConsoleOutputEvent::info("before")),
                ConsoleEvent::Clear,
                ConsoleEvent::Output(ConsoleOutputEvent::warn("after")),
            ]
        );
        assert!(console.pending_output().is_empty());
    }

    #[test]
    fn test_clear_leaves_registry_and_history() {
        let mut console = bare();
        console
            .create_command("x", |_: &mut ConsoleEngine, _| Ok(()), "")
            .unwrap();
        console.execute("x").unwrap();
        console.clear();

        assert!(console.has_command("x"));
        assert_eq!(console.history().len(), 1);
    }

    #[test]
    fn test_binding_surface() {
        let mut console = bare();
        for name in ["help", "hello", "echo"] {
            console
                .create_command(name, |_: &mut ConsoleEngine, _| Ok(()), "")
                .unwrap();
        }

        assert_eq!(console.command_list(), vec!["help", "hello", "echo"]);
        assert_eq!(console.autocomplete_list("he", -1), vec!["hello", "help"]);
        assert_eq!(console.autocomplete_command("he", 0), "hello");
        assert_eq!(console.command_description("echo"), Ok(""));
        assert!(matches!(
            console.command_description("nope"),
            Err(ConsoleError::NotFound(_))
        ));

        assert!(console.remove_command("hello"));
        assert!(!console.remove_command("hello"));
        assert!(!console.has_command("hello"));
        assert_eq!(console.autocomplete_list("he", -1), vec!["help"]);
    }

    #[test]
    fn test_bound_command_on_dropped_target() {
        struct Door {
            opened: AtomicUsize,
        }
        impl Door {
            fn open(&self, _: &mut ConsoleEngine, _: &CommandArgs<'_>) -> HandlerResult {
                self.opened.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let door = Arc::new(Door {
            opened: AtomicUsize::new(0),
        });
        let mut console = bare();
        console
            .create_bound_command("open", &door, Door::open, "Open the door")
            .unwrap();

        console.execute("open").unwrap();
        assert_eq!(door.opened.load(Ordering::SeqCst), 1);

        drop(door);
        console.execute("open").unwrap();
        assert_eq!(
            messages(&mut console),
            vec![(
                ConsoleOutputLevel::Error,
                "Command 'open' failed: handler target no longer exists".to_string()
            )]
        );

        let gone = Arc::new(Door {
            opened: AtomicUsize::new(0),
        });
        let stale = Command::bound("close", &gone, Door::open);
        drop(gone);
        assert!(matches!(
            console.register(stale),
            Err(ConsoleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConsoleEngine>();
    }
}

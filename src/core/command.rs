//! Console commands and their handlers.
//!
//! A [`Command`] is a name, a description and a [`CommandHandler`]. Handlers
//! are shared (`Arc`), never owned by the registry, and a handler bound to a
//! host object only keeps a weak reference to that object.

use std::error::Error;
use std::sync::{Arc, Weak};

use super::ConsoleEngine;

/// Result returned by command handlers.
///
/// Any error is reported on the console output as a handler fault.
pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Arguments passed to a command handler.
#[derive(Debug, Clone)]
pub struct CommandArgs<'a> {
    /// The full input line.
    raw: &'a str,
    /// Everything after the command name.
    remainder: &'a str,
    /// Remainder split on whitespace.
    args: Vec<&'a str>,
}

impl<'a> CommandArgs<'a> {
    /// Create args from the raw line and the argument remainder.
    pub fn new(raw: &'a str, remainder: &'a str) -> Self {
        Self {
            raw,
            remainder,
            args: remainder.split_whitespace().collect(),
        }
    }

    /// The full input line as typed.
    #[inline]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The unparsed argument text.
    #[inline]
    pub fn remainder(&self) -> &'a str {
        self.remainder
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Get a token by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// Try to parse a token as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, index: usize) -> Option<T> {
        self.get(index).and_then(|s| s.parse().ok())
    }

    /// Parse a token, falling back to `default`.
    pub fn parse_or<T: std::str::FromStr>(&self, index: usize, default: T) -> T {
        self.parse(index).unwrap_or(default)
    }

    #[inline]
    pub fn as_slice(&self) -> &[&'a str] {
        &self.args
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.args.iter().copied()
    }
}

/// Logic bound to a command name.
///
/// Implemented for closures of the form
/// `Fn(&mut ConsoleEngine, &CommandArgs) -> HandlerResult` and for
/// [`BoundHandler`].
pub trait CommandHandler: Send + Sync {
    /// Run the command.
    ///
    /// The engine is in the executing state while this runs: printing and
    /// clearing work, but a nested [`ConsoleEngine::execute`] returns
    /// [`ConsoleError::Busy`](super::ConsoleError::Busy).
    fn call(&self, console: &mut ConsoleEngine, args: &CommandArgs<'_>) -> HandlerResult;

    /// Whether the handler can still be invoked.
    ///
    /// Registration rejects handlers that report `false`.
    fn is_bound(&self) -> bool {
        true
    }
}

impl<F> CommandHandler for F
where
    F: Fn(&mut ConsoleEngine, &CommandArgs<'_>) -> HandlerResult + Send + Sync,
{
    fn call(&self, console: &mut ConsoleEngine, args: &CommandArgs<'_>) -> HandlerResult {
        self(console, args)
    }
}

/// Method signature for handlers bound to a host object.
pub type BoundMethod<T> = fn(&T, &mut ConsoleEngine, &CommandArgs<'_>) -> HandlerResult;

/// A handler that calls a method on a host object it does not own.
///
/// Holds a [`Weak`] reference: once the host drops the object, calls fail
/// with a handler fault and new registrations are rejected.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use dev_console::{BoundHandler, CommandArgs, CommandHandler, ConsoleEngine, HandlerResult};
///
/// struct Player { health: AtomicU32 }
///
/// impl Player {
///     fn heal(&self, _console: &mut ConsoleEngine, args: &CommandArgs) -> HandlerResult {
///         self.health.store(args.parse_or(0, 100), Ordering::Relaxed);
///         Ok(())
///     }
/// }
///
/// let player = Arc::new(Player { health: AtomicU32::new(10) });
/// let handler = BoundHandler::new(&player, Player::heal);
/// assert!(handler.is_bound());
///
/// drop(player);
/// assert!(!handler.is_bound());
/// ```
pub struct BoundHandler<T> {
    target: Weak<T>,
    method: BoundMethod<T>,
}

impl<T> BoundHandler<T> {
    /// Bind `method` to `target`.
    pub fn new(target: &Arc<T>, method: BoundMethod<T>) -> Self {
        Self {
            target: Arc::downgrade(target),
            method,
        }
    }
}

impl<T: Send + Sync> CommandHandler for BoundHandler<T> {
    fn call(&self, console: &mut ConsoleEngine, args: &CommandArgs<'_>) -> HandlerResult {
        let target = self
            .target
            .upgrade()
            .ok_or("handler target no longer exists")?;
        (self.method)(&target, console, args)
    }

    fn is_bound(&self) -> bool {
        self.target.strong_count() > 0
    }
}

/// A console command: name, description and handler.
///
/// # Examples
///
/// ```
/// use dev_console::{Command, ConsoleEngine};
///
/// let echo = Command::new("say", |console: &mut ConsoleEngine, args| {
///     console.print_line(args.remainder());
///     Ok(())
/// })
/// .description("Print text to console");
///
/// assert_eq!(echo.name(), "say");
/// assert_eq!(echo.get_description(), "Print text to console");
/// ```
#[derive(Clone)]
pub struct Command {
    name: Box<str>,
    description: String,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    /// Create a command from a closure.
    pub fn new<F>(name: impl Into<Box<str>>, handler: F) -> Self
    where
        F: Fn(&mut ConsoleEngine, &CommandArgs<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        Self::from_handler(name, Arc::new(handler))
    }

    /// Create a command from a shared handler.
    pub fn from_handler(name: impl Into<Box<str>>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            handler,
        }
    }

    /// Create a command that calls `method` on `target`.
    pub fn bound<T>(name: impl Into<Box<str>>, target: &Arc<T>, method: BoundMethod<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::from_handler(name, Arc::new(BoundHandler::new(target, method)))
    }

    /// Set the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn get_description(&self) -> &str {
        &self.description
    }

    /// A shared reference to the handler.
    #[inline]
    pub fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

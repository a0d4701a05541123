//! Command registry.
//!
//! Insertion-ordered storage with a trie index for prefix lookup.

use std::sync::Arc;

use indexmap::IndexMap;

use super::{Command, CommandHandler, ConsoleError, Trie};

/// Central registry of console commands.
///
/// Names are unique and case-sensitive. Registering an existing name
/// replaces the previous command but keeps its position in
/// [`names`](Self::names).
///
/// # Examples
///
/// ```
/// use dev_console::{Command, CommandRegistry, ConsoleEngine};
///
/// let mut registry = CommandRegistry::new();
/// registry.register(Command::new("quit", |_: &mut ConsoleEngine, _| Ok(()))
///     .description("Exit the game"))
///     .unwrap();
///
/// assert!(registry.contains("quit"));
/// assert_eq!(registry.description("quit").unwrap(), "Exit the game");
/// ```
#[derive(Default)]
pub struct CommandRegistry {
    entries: IndexMap<Box<str>, Command>,
    /// Prefix index over `entries` keys.
    trie: Trie,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any existing command with the same name.
    ///
    /// Returns `true` if the name was new. Fails with
    /// [`ConsoleError::InvalidArgument`] for an empty name or a handler whose
    /// target no longer exists.
    pub fn register(&mut self, cmd: Command) -> Result<bool, ConsoleError> {
        if cmd.name().is_empty() {
            return Err(ConsoleError::invalid("command name must not be empty"));
        }
        if !cmd.handler().is_bound() {
            return Err(ConsoleError::invalid(format!(
                "handler for '{}' is not bound to a live object",
                cmd.name()
            )));
        }

        let name: Box<str> = cmd.name().into();
        let is_new = self.trie.insert(&name);
        if !is_new {
            tracing::warn!("Console: Overwriting existing command '{}'", name);
        }

        // IndexMap::insert keeps the original slot for an existing key
        self.entries.insert(name, cmd);
        Ok(is_new)
    }

    /// Remove a command. Returns `true` if it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        if self.entries.shift_remove(name).is_some() {
            self.trie.remove(name);
            true
        } else {
            false
        }
    }

    /// Check if a command exists.
    ///
    /// Lookup is exact and case-sensitive.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get a command by name.
    ///
    /// Returns `None` if no command is registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.entries.get(name)
    }

    /// Shared handle to a command's handler.
    ///
    /// The engine clones the handle before running it, so a handler may
    /// register or remove commands (including itself) while it runs.
    pub fn handler(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.entries.get(name).map(|cmd| Arc::clone(cmd.handler()))
    }

    /// Description of a command.
    ///
    /// Commands registered without a description return an empty string.
    /// Unknown names fail with [`ConsoleError::NotFound`].
    pub fn description(&self, name: &str) -> Result<&str, ConsoleError> {
        self.entries
            .get(name)
            .map(Command::get_description)
            .ok_or_else(|| ConsoleError::NotFound(name.to_string()))
    }

    /// All command names in registration order.
    ///
    /// A name that was overwritten keeps its original position.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|k| &**k).collect()
    }

    /// Names starting with `prefix`, in lexicographic order.
    ///
    /// Matching is byte-wise and case-sensitive. An empty prefix returns
    /// every name.
    pub fn names_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.trie.with_prefix(prefix)
    }

    /// Iterate over commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Command)> {
        self.entries.iter().map(|(k, v)| (&**k, v))
    }

    /// Number of registered commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no commands are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find commands whose name or description contains `query`, ignoring case.
    ///
    /// Results are sorted by name.
    pub fn search(&self, query: &str) -> Vec<&Command> {
        let query = query.to_lowercase();

        let mut matches: Vec<_> = self
            .entries
            .values()
            .filter(|cmd| {
                cmd.name().to_lowercase().contains(&query)
                    || cmd.get_description().to_lowercase().contains(&query)
            })
            .collect();

        matches.sort_by(|a, b| a.name().cmp(b.name()));
        matches
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CommandArgs, ConsoleEngine, HandlerResult};

    fn noop(_: &mut ConsoleEngine, _: &CommandArgs<'_>) -> HandlerResult {
        Ok(())
    }

    fn cmd(name: &str) -> Command {
        Command::new(name, noop)
    }

    #[test]
    fn test_register_has_remove() {
        let mut registry = CommandRegistry::new();

        assert!(registry.register(cmd("spawn")).unwrap());
        assert!(registry.contains("spawn"));
        assert!(!registry.contains("Spawn"));

        assert!(registry.remove("spawn"));
        assert!(!registry.contains("spawn"));
        assert!(registry.names_with_prefix("sp").is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry = CommandRegistry::new();
        registry.register(cmd("a")).unwrap();
        registry.register(cmd("b")).unwrap();

        assert!(!registry.remove("c"));
        assert!(!registry.remove("c"));
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = CommandRegistry::new();
        let err = registry.register(cmd("")).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidArgument(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_keeps_latest() {
        let mut registry = CommandRegistry::new();
        registry.register(cmd("first")).unwrap();
        registry.register(cmd("kick").description("old")).unwrap();
        registry.register(cmd("last")).unwrap();

        let is_new = registry.register(cmd("kick").description("new")).unwrap();
        assert!(!is_new);

        assert_eq!(registry.description("kick").unwrap(), "new");
        assert_eq!(registry.names(), vec!["first", "kick", "last"]);
        assert_eq!(registry.names_with_prefix("k"), vec!["kick"]);
    }

    #[test]
    fn test_description_not_found() {
        let registry = CommandRegistry::new();
        assert_eq!(
            registry.description("ghost"),
            Err(ConsoleError::NotFound("ghost".into()))
        );
    }

    #[test]
    fn test_names_keep_registration_order() {
        let mut registry = CommandRegistry::new();
        for name in ["zoom", "alpha", "mid"] {
            registry.register(cmd(name)).unwrap();
        }
        registry.remove("alpha");
        registry.register(cmd("alpha")).unwrap();

        assert_eq!(registry.names(), vec!["zoom", "mid", "alpha"]);
    }

    #[test]
    fn test_dropped_target_rejected() {
        struct Target;
        impl Target {
            fn run(&self, _: &mut ConsoleEngine, _: &CommandArgs<'_>) -> HandlerResult {
                Ok(())
            }
        }

        let target = std::sync::Arc::new(Target);
        let bound = Command::bound("run", &target, Target::run);
        drop(target);

        let mut registry = CommandRegistry::new();
        let err = registry.register(bound).unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidArgument(_)));
        assert!(!registry.contains("run"));
    }

    #[test]
    fn test_search() {
        let mut registry = CommandRegistry::new();
        registry.register(cmd("sv_gravity").description("World gravity force")).unwrap();
        registry.register(cmd("noclip").description("Fly through walls")).unwrap();
        registry.register(cmd("god").description("Invulnerability")).unwrap();

        let names: Vec<_> = registry.search("GRAV").iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["sv_gravity"]);

        let names: Vec<_> = registry.search("walls").iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["noclip"]);

        let names: Vec<_> = registry.search("o").iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["god", "noclip", "sv_gravity"]);
    }
}

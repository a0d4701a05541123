//! Prefix autocomplete over registered command names.

use super::CommandRegistry;

/// Stateless prefix matcher over a [`CommandRegistry`].
///
/// Matching is byte-wise and case-sensitive. Candidates are always returned
/// in lexicographic order, so identical registry state and prefix give
/// identical results.
///
/// # Examples
///
/// ```
/// use dev_console::{Autocompleter, Command, CommandRegistry, ConsoleEngine};
///
/// let mut registry = CommandRegistry::new();
/// for name in ["help", "hello", "echo"] {
///     registry.register(Command::new(name, |_: &mut ConsoleEngine, _| Ok(()))).unwrap();
/// }
///
/// let completer = Autocompleter::new(&registry);
/// assert_eq!(completer.complete_list("he", -1), vec!["hello", "help"]);
/// assert_eq!(completer.complete("he", 1), "help");
/// assert_eq!(completer.complete("xy", -1), "xy");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Autocompleter<'a> {
    registry: &'a CommandRegistry,
}

impl<'a> Autocompleter<'a> {
    /// Create an autocompleter over `registry`.
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self { registry }
    }

    /// The candidate at `selected_index` among names starting with `prefix`.
    ///
    /// An out-of-range index (including the default `-1`) is clamped to the
    /// first or last candidate. With no candidates the prefix is returned
    /// unchanged.
    pub fn complete(&self, prefix: &str, selected_index: isize) -> String {
        let candidates = self.registry.names_with_prefix(prefix);
        if candidates.is_empty() {
            return prefix.to_string();
        }

        let last = candidates.len() - 1;
        let index = usize::try_from(selected_index).map_or(0, |i| i.min(last));
        candidates[index].to_string()
    }

    /// Every name starting with `prefix`, in lexicographic order.
    ///
    /// `selected_index` does not affect the result; it mirrors
    /// [`complete`](Self::complete) for callers paging through candidates.
    pub fn complete_list(&self, prefix: &str, _selected_index: isize) -> Vec<String> {
        self.registry
            .names_with_prefix(prefix)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

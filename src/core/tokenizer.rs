//! Command line splitting.
//!
//! A line is split once, at the first run of whitespace, into the command
//! name and the raw argument remainder. There is no quoting or escaping.

/// A command line split into name and argument remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandLine<'a> {
    /// The command name (first token).
    pub name: &'a str,
    /// Everything after the first whitespace run, with trailing whitespace removed.
    pub remainder: &'a str,
    /// The untouched input line.
    pub raw: &'a str,
}

impl<'a> CommandLine<'a> {
    /// Split a line into name and remainder.
    ///
    /// Returns `None` for blank input.
    ///
    /// # Examples
    ///
    /// ```
    /// use dev_console::CommandLine;
    ///
    /// let line = CommandLine::parse("say  hello   world ").unwrap();
    /// assert_eq!(line.name, "say");
    /// assert_eq!(line.remainder, "hello   world");
    ///
    /// assert!(CommandLine::parse("   ").is_none());
    /// ```
    pub fn parse(raw: &'a str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (name, remainder) = match trimmed.find(char::is_whitespace) {
            Some(split) => (&trimmed[..split], trimmed[split..].trim_start()),
            None => (trimmed, ""),
        };

        Some(Self { name, remainder, raw })
    }

    /// Whitespace-separated argument tokens.
    pub fn tokens(&self) -> Vec<&'a str> {
        self.remainder.split_whitespace().collect()
    }
}

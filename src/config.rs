//! Console configuration.
//!
//! With the `persist` feature the configuration can be loaded from and saved
//! to a RON file.

#[cfg(feature = "persist")]
use std::fs;
#[cfg(feature = "persist")]
use std::path::Path;

#[cfg(feature = "persist")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "persist")]
use thiserror::Error;

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "console.ron";

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Engine settings.
///
/// # Examples
///
/// ```
/// use dev_console::{ConsoleConfig, ConsoleEngine};
///
/// let config = ConsoleConfig {
///     history_limit: 10,
///     ..Default::default()
/// };
/// let console = ConsoleEngine::with_config(config);
/// assert_eq!(console.history().limit(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "persist", serde(default))]
pub struct ConsoleConfig {
    /// Maximum history entries (0 = unbounded).
    pub history_limit: usize,
    /// Echo each executed line as a `Command` output (`"$ line"`).
    pub echo_commands: bool,
    /// Register `help`, `commands`, `find`, `echo`, `clear` and `delete_history`.
    pub builtins: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            echo_commands: true,
            builtins: true,
        }
    }
}

#[cfg(feature = "persist")]
impl ConsoleConfig {
    /// Load config from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        ron::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save config to a RON file, creating parent directories if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
        }

        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let contents = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Load config from file, falling back to defaults if it is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No config file found at '{}', using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                tracing::debug!("Loaded console config from '{}'", path.display());
                config
            }
            Err(e) => {
                tracing::error!("Failed to load config: {}", e);
                Self::default()
            }
        }
    }
}

/// Errors that can occur during config operations.
#[cfg(feature = "persist")]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error for '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Serialization error: {0}")]
    Serialize(String),
}

//! Startup error types.
//!
//! The per-frame pipeline has no recoverable error paths: dropped spawns
//! return `None` and are logged. Only configuration loading can fail, and a
//! failure there is fatal for the host.

use std::fmt;

/// Error raised while loading or validating [`crate::Settings`].
#[derive(Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    Io(std::io::Error),

    /// The settings file is not valid JSON for the settings schema.
    Parse(serde_json::Error),

    /// A value parsed correctly but is outside its accepted range.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the accepted range.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read settings: {}", err),
            ConfigError::Parse(err) => write!(f, "failed to parse settings: {}", err),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid setting '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

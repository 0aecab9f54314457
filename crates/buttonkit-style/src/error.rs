//! Error types for loading style settings.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading settings.
///
/// Style resolution itself never fails; only the configuration surface does.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// TOML parsing error.
    #[error("Settings parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Settings serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// File I/O error.
    #[error("Failed to read settings '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid property value.
    #[error("Invalid value for setting '{property}': {message}")]
    InvalidValue { property: String, message: String },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }
}

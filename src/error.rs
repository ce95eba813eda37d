//! Error types for rule generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generator run.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Rule declarations are structurally invalid.
    #[error("configuration error in {context}: {message}")]
    Config {
        /// The mapping entry or group that is at fault
        context: String,
        /// What is wrong with it
        message: String,
    },

    /// The output could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying system error
        #[source]
        source: std::io::Error,
    },

    /// The document could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// Creates a configuration error.
    pub fn config(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for configuration errors.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message_names_context() {
        let err = GeneratorError::config("layer 's' key 'c'", "already bound by layer 'o'");
        assert_eq!(
            err.to_string(),
            "configuration error in layer 's' key 'c': already bound by layer 'o'"
        );
        assert!(err.is_config());
    }

    #[test]
    fn test_io_error_message_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = GeneratorError::io("/ro/karabiner.json", source);
        assert!(err.to_string().contains("/ro/karabiner.json"));
        assert!(!err.is_config());
    }
}

//! Error types and handling infrastructure for banner-rotator.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for context.
//!
//! Rotating an empty banner set is not an error: the rotator simply never starts.

use thiserror::Error;

/// The main error type for banner-rotator operations.
#[derive(Error, Debug)]
pub enum RotatorError {
    /// Selector text could not be parsed
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Invalid argument (zero period, malformed class name, ...)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Underlying I/O failure (terminal, config file)
    #[error("I/O operation failed: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for banner-rotator operations.
pub type Result<T> = std::result::Result<T, RotatorError>;

impl RotatorError {
    /// Create an InvalidSelector error for the given selector text
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create an IoError from an io::Error with additional context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            message: message.into(),
            source,
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for RotatorError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::io(message, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let selector = RotatorError::invalid_selector("div > img", "unsupported combinator '>'");
        assert_eq!(
            selector.to_string(),
            "Invalid selector 'div > img': unsupported combinator '>'"
        );

        let arg = RotatorError::invalid_argument("rotation period must be non-zero");
        assert_eq!(
            arg.to_string(),
            "Invalid argument: rotation period must be non-zero"
        );

        let config = RotatorError::config("missing file");
        assert_eq!(config.to_string(), "Configuration error: missing file");
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(
            RotatorError::ui("Terminal resize failed"),
            RotatorError::UIError { .. }
        ));
        assert!(matches!(
            RotatorError::other("Unknown error"),
            RotatorError::Other { .. }
        ));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RotatorError = io_err.into();

        match err {
            RotatorError::IoError { message, source } => {
                assert_eq!(message, "Permission denied");
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected IoError variant"),
        }
    }
}

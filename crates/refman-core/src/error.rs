//! Error types for refman-core operations.
//!
//! Compiling, searching and highlighting are infallible: malformed markup
//! degrades to literal text and data-quality problems are reported as
//! [`Diagnostic`](crate::Diagnostic) records instead. The error type below
//! therefore only covers the edges of the system where real I/O happens:
//! reading source documents and loading or saving configuration.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading manual sources, writing rendered output
//! - **Configuration Errors**: invalid settings or unreadable config files
//! - **Serialization Errors**: TOML/JSON conversion failures
//! - **Not Found**: a requested document or config file does not exist
//!
//! ```rust
//! use refman_core::{Error, Result};
//!
//! fn load() -> Result<String> {
//!     Err(Error::NotFound("reference.md".into()))
//! }
//!
//! match load() {
//!     Err(e) => assert_eq!(e.category(), "not_found"),
//!     Ok(_) => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// The main error type for refman-core operations.
///
/// The underlying `std::io::Error` is preserved through `source()` so callers
/// that wrap it (the CLI uses `anyhow`) keep the full chain.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading manual sources and writing rendered pages.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in the config file
    /// - Heading levels outside `1..=6`
    /// - Config directory creation failures
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failed.
    ///
    /// Occurs when exporting the compiled index as JSON or converting the
    /// configuration to and from TOML.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// - `"io"` - File system and I/O operations
    /// - `"config"` - Configuration and settings
    /// - `"not_found"` - Missing documents or files
    /// - `"serialization"` - Data format conversion
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        // Given: Different error variants
        let errors = vec![
            (Error::Config("bad level".to_string()), "Configuration error: bad level"),
            (Error::NotFound("ref.md".to_string()), "Not found: ref.md"),
            (
                Error::Serialization("eof".to_string()),
                "Serialization error: eof",
            ),
        ];

        // When/Then: Display matches the expected wording
        for (error, expected) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_categories() {
        let io_err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(io_err.category(), "io");
        assert_eq!(Error::Config(String::new()).category(), "config");
        assert_eq!(Error::NotFound(String::new()).category(), "not_found");
        assert_eq!(
            Error::Serialization(String::new()).category(),
            "serialization"
        );
    }

    #[test]
    fn test_from_io_error_preserves_source() {
        use std::error::Error as _;

        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_toml_error() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let err: Error = parse.unwrap_err().into();
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn test_from_json_error() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}

//! Error types for the JSON output format
//!
//! This module defines the error taxonomy for the crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the JSON output format
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid destination URL or job property
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Malformed YAML job configuration
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Callback Errors
    // ============================================================================
    /// A caller-supplied conversion hook failed; the write that triggered it
    /// left the document untouched
    #[error("{hook} callback failed: {source}")]
    Callback {
        /// Which hook failed: `field_name`, `to_json`, or `merge`
        hook: &'static str,
        /// The caller's error, unchanged
        #[source]
        source: anyhow::Error,
    },

    // ============================================================================
    // Writer Lifecycle Errors
    // ============================================================================
    /// A `write` or `close` arrived after the writer closed
    #[error("Record writer already closed")]
    WriterClosed,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// A create-new put found the path occupied
    #[error("Output path already exists: {path}")]
    AlreadyExists {
        /// Full path of the occupied location
        path: String,
    },

    /// Destination storage failure
    #[error("Object store error: {0}")]
    Store(#[from] object_store::Error),

    /// Document serialization failure
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// Local filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a callback error for the named conversion hook
    pub fn callback(hook: &'static str, source: anyhow::Error) -> Self {
        Self::Callback { hook, source }
    }

    /// Whether this error came from a caller-supplied conversion hook
    pub fn is_callback(&self) -> bool {
        matches!(self, Error::Callback { .. })
    }
}

/// Result type alias for the JSON output format
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("missing destination");
        assert_eq!(err.to_string(), "Configuration error: missing destination");

        let err = Error::WriterClosed;
        assert_eq!(err.to_string(), "Record writer already closed");

        let err = Error::AlreadyExists {
            path: "out/json_output-00000.json".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Output path already exists: out/json_output-00000.json"
        );
    }

    #[test]
    fn test_callback_error_keeps_source() {
        let err = Error::callback("field_name", anyhow::anyhow!("key is not utf-8"));
        assert!(err.is_callback());
        assert_eq!(
            err.to_string(),
            "field_name callback failed: key is not utf-8"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_is_callback() {
        assert!(!Error::WriterClosed.is_callback());
        assert!(!Error::config("x").is_callback());
    }
}

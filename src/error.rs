//! Error types for the crate
//!
//! The macro engine itself is permissive and never fails; these errors come from
//! the surrounding plumbing: reading input, loading options and parsing
//! stylesheet source.

use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (reading input, writing output, opening option files)
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON option file errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML option file errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Stylesheet source could not be parsed
    #[error("Parse error at {line}:{column}: {message}")]
    Parse {
        line: u32,
        column: u32,
        message: String,
    },

    /// Bad command line or option value
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Result type alias for fallible operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            source: err,
            message: "IO operation failed".to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            source: err,
            message: "JSON operation failed".to_string(),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            source: err,
            message: "YAML operation failed".to_string(),
        }
    }
}

/// Helper trait for converting IO errors with context
pub trait IoContext<T> {
    fn with_io_context(self, message: &str) -> Result<T>;
}

impl<T> IoContext<T> for std::result::Result<T, std::io::Error> {
    fn with_io_context(self, message: &str) -> Result<T> {
        self.map_err(|e| Error::Io {
            message: message.to_string(),
            source: e,
        })
    }
}

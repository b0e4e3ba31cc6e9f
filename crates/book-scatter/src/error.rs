//! Custom error types for the scatter data pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Only two
//! failures are fatal to a run (a missing input and unparseable content);
//! everything else wraps the underlying library error with context.
//!
//! Errors are serializable so a caller can surface them as `{code, message}`.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the scatter data pipeline.
#[derive(Error, Debug)]
pub enum ScatterError {
    /// Source path does not exist or cannot be opened.
    #[error("The file {} was not found.", path.display())]
    InputNotFound { path: PathBuf },

    /// Decompressed content is not valid tabular text, or required columns are absent.
    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ScatterError>,
    },
}

impl ScatterError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ScatterError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, independent of the message text.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "INPUT_NOT_FOUND",
            Self::Parse(_) => "PARSE_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error aborted the run before any output could be written.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::InputNotFound { .. } | Self::Parse(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

impl ScatterError {
    /// One-line message shown to the user when a run fails.
    ///
    /// Only failures to read the dataset are worded as read errors; anything
    /// later in the run is reported as a processing failure.
    pub fn diagnostic(&self) -> String {
        if self.error_code() == "INPUT_NOT_FOUND" {
            format!("Error: {}", self)
        } else if self.is_input_error() {
            format!("An error occurred while reading the file: {}", self)
        } else {
            format!("An error occurred while building the scatter data: {}", self)
        }
    }
}

impl From<crate::config::ConfigValidationError> for ScatterError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        ScatterError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ScatterError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ScatterError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ScatterError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ScatterError::Io(e).with_context(context))
    }
}

//! Error types for the Coverage Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building a roster and
//! comparing it against staffing models.

use thiserror::Error;

/// The main error type for the Coverage Engine.
///
/// All operations in the engine return this error type. Each variant is
/// recovered at the boundary that triggered it; none of them leave a roster
/// in a partially modified state.
///
/// # Example
///
/// ```
/// use coverage_engine::error::EngineError;
///
/// let error = EngineError::InvalidParameter {
///     field: "rotations".to_string(),
///     message: "must be at least 1".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid parameter 'rotations': must be at least 1");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A staffing model in the configuration is malformed.
    #[error("Invalid staffing model '{label}': {message}")]
    InvalidModel {
        /// The label of the offending model.
        label: String,
        /// A description of what made the model invalid.
        message: String,
    },

    /// A calculator setting in the configuration is out of range.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSettings {
        /// The setting that was invalid.
        field: String,
        /// A description of what made the setting invalid.
        message: String,
    },

    /// A clinician parameter was missing, unexpected or out of range.
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter {
        /// The parameter that was invalid.
        field: String,
        /// A description of what made the parameter invalid.
        message: String,
    },

    /// Remove-last was requested on a roster with no entries.
    #[error("No entries to remove")]
    EmptyRoster,

    /// No session exists with the given identifier.
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// The session identifier that was requested.
        id: String,
    },

    /// A roster snapshot was written with an unknown format version.
    #[error("Unsupported roster snapshot version {found} (expected {expected})")]
    UnsupportedSnapshotVersion {
        /// The version found in the snapshot.
        found: u32,
        /// The version this engine reads and writes.
        expected: u32,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidParameter`].
    pub fn invalid_parameter(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Error types for the anniversary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a batch run.

use thiserror::Error;

/// The main error type for the anniversary engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use anniversary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
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
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A snapshot row contained an unparseable field.
    ///
    /// Rows failing with this error are excluded from the batch; the run
    /// continues with the remaining rows.
    #[error("Unparseable field '{field}' (value '{value}'): {message}")]
    DataFormat {
        /// The field that failed to parse.
        field: String,
        /// The raw value that was rejected.
        value: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A person matched no classification category.
    ///
    /// The priority chain is exhaustive for well-formed groups, so this
    /// indicates corrupt input. The person is excluded from every partition,
    /// never silently treated as valid.
    #[error("Person {person_id} matched no classification category")]
    ClassificationInvariant {
        /// The normalized tax identifier of the affected person.
        person_id: String,
    },

    /// The snapshot could not be fetched from the data source.
    ///
    /// This is the only run-fatal error: nothing is dispatched when it
    /// occurs.
    #[error("Failed to fetch employee snapshot: {message}")]
    SnapshotFetch {
        /// A description of the fetch failure.
        message: String,
    },

    /// A notification could not be sent.
    ///
    /// Dispatch failures are collected per message and reported in the
    /// batch summary; they never abort the remaining sends.
    #[error("Failed to send '{subject}': {message}")]
    Dispatch {
        /// The subject line of the message that failed.
        subject: String,
        /// A description of the send failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

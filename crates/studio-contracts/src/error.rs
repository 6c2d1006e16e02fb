//! Runtime error types for the Avatar Studio wizard.
//!
//! All fallible operations in the workspace return `StudioResult<T>`.
//! Variants carry enough context to be logged or surfaced to a form as
//! validation feedback.

use thiserror::Error;

/// The unified error type for the Avatar Studio runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudioError {
    /// A navigation or generation guard refused the requested operation.
    ///
    /// The wizard state is left exactly as it was before the call.
    #[error("invalid transition for '{operation}': {reason}")]
    InvalidTransition { operation: String, reason: String },

    /// A media handle does not match the accepted file types for its slot.
    #[error("unsupported media '{name}': expected {expected}")]
    UnsupportedMedia { name: String, expected: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The generation backend reported a failure.
    #[error("generation failed: {reason}")]
    GenerationFailed { reason: String },

    /// The history store could not append a record.
    #[error("history write failed: {reason}")]
    HistoryWriteFailed { reason: String },
}

impl StudioError {
    /// Shorthand for building an `InvalidTransition`.
    pub fn invalid_transition(operation: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTransition {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the Avatar Studio crates.
pub type StudioResult<T> = Result<T, StudioError>;

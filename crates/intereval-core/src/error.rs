//! Engine error types.
//!
//! Scoring itself is total over well-formed input, so the taxonomy is small:
//! startup configuration failures, the (always recovered) enriched backend
//! failure, and malformed questions handed in by the caller. An empty answer
//! is not an error; it is scored like any other answer.

use thiserror::Error;

/// Errors that can occur while building or calling the evaluation engine.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Required lexical resources or scoring weights are missing or invalid.
    /// Fatal at startup; the engine cannot be built.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The enriched linguistic backend could not be loaded. Backend selection
    /// recovers from this by falling back to a simpler backend.
    #[error("enriched backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The question violates the evaluation preconditions.
    #[error("malformed question: {0}")]
    MalformedQuestion(String),
}

impl EvalError {
    /// Returns `true` if this error must abort startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EvalError::Configuration(_))
    }
}

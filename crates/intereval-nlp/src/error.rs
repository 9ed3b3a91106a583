//! Backend loading error types.

use std::path::PathBuf;

use thiserror::Error;

use intereval_core::error::EvalError;

/// Errors that can occur when loading resources for the enriched backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The word-vector file could not be read.
    #[error("failed to read word vectors {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the word-vector file could not be parsed.
    #[error("malformed word vector on line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// A vector has a different dimension than the first one.
    #[error("word vector on line {line} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The word-vector file contains no vectors.
    #[error("word vector file contains no vectors")]
    Empty,

    /// The lexicon lacks a list the tagger is built from.
    #[error("tagger vocabulary unavailable: {0}")]
    Vocabulary(String),
}

impl From<BackendError> for EvalError {
    fn from(e: BackendError) -> Self {
        EvalError::BackendUnavailable(e.to_string())
    }
}

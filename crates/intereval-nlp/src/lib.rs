//! intereval-nlp: enriched linguistic backend and engine configuration.
//!
//! Implements [`LinguisticBackend`](intereval_core::traits::LinguisticBackend)
//! with a rule-based tagger, lemmatizer and entity chunker, optionally backed
//! by pre-trained word vectors, and builds an
//! [`EvaluationEngine`](intereval_core::engine::EvaluationEngine) from a
//! configuration file, falling back to simpler backends when resources are
//! missing.

pub mod config;
pub mod enriched;
pub mod error;
pub mod lemmatizer;
pub mod mock;
pub mod tagger;
pub mod vectors;

pub use config::{
    build_engine, load_config_from, select_backend, BackendPreference,
    InterevalConfig,
};
pub use enriched::EnrichedBackend;
pub use error::BackendError;
pub use vectors::WordVectors;

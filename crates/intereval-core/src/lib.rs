//! intereval-core: answer evaluation engine, extractors, and scoring.
//!
//! This crate defines the data model, the linguistic analysis contract, the
//! fallback lexical backend and the scoring pipeline that turns a question
//! and a free-text answer into four sub-scores, an overall score and
//! feedback. Batch evaluation and reporting over answer sets build on it.

pub mod aggregate;
pub mod batch;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod features;
pub mod feedback;
pub mod lexical;
pub mod lexicon;
pub mod model;
pub mod parser;
pub mod report;
pub mod rules;
pub mod statistics;
pub mod text;
pub mod traits;

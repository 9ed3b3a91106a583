//! Mock backend for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use intereval_core::lexical::LexicalBackend;
use intereval_core::lexicon::Lexicon;
use intereval_core::traits::{Capability, LinguisticBackend, TextAnalysis};

/// A backend that reports a chosen capability and a fixed similarity.
///
/// Analysis is delegated to the lexical backend. Calls are counted so tests
/// can check how the engine uses its backend.
pub struct MockBackend {
    inner: LexicalBackend,
    capability: Capability,
    similarity: f64,
    analyze_calls: AtomicU32,
    similarity_calls: AtomicU32,
}

impl MockBackend {
    pub fn new(capability: Capability, similarity: f64) -> Self {
        Self {
            inner: LexicalBackend::new(Arc::new(Lexicon::default())),
            capability,
            similarity,
            analyze_calls: AtomicU32::new(0),
            similarity_calls: AtomicU32::new(0),
        }
    }

    /// Number of texts analyzed so far.
    pub fn analyze_calls(&self) -> u32 {
        self.analyze_calls.load(Ordering::Relaxed)
    }

    /// Number of similarity queries so far.
    pub fn similarity_calls(&self) -> u32 {
        self.similarity_calls.load(Ordering::Relaxed)
    }
}

impl LinguisticBackend for MockBackend {
    fn capability(&self) -> Capability {
        self.capability
    }

    fn analyze(&self, text: &str) -> TextAnalysis {
        self.analyze_calls.fetch_add(1, Ordering::Relaxed);
        self.inner.analyze(text)
    }

    fn similarity_of(&self, _: &TextAnalysis, _: &TextAnalysis) -> f64 {
        self.similarity_calls.fetch_add(1, Ordering::Relaxed);
        self.similarity
    }
}

//! Evaluation engine façade.
//!
//! Wires the shared backend and lexicon through feature extraction, the four
//! extractors, aggregation and feedback. The engine holds only immutable
//! state, so one instance can be shared across threads behind an `Arc`.

use std::sync::Arc;

use crate::aggregate::{finalize_sub_scores, overall_score};
use crate::error::EvalError;
use crate::extractors::{extract_all, standard_extractors, SignalExtractor};
use crate::feedback::synthesize;
use crate::features::FeatureBundle;
use crate::lexical::LexicalBackend;
use crate::lexicon::Lexicon;
use crate::model::{EvaluationResult, Question};
use crate::rules::ScoreWeights;
use crate::traits::{Capability, LinguisticBackend};

/// Scores interview answers.
pub struct EvaluationEngine {
    backend: Arc<dyn LinguisticBackend>,
    lexicon: Arc<Lexicon>,
    weights: ScoreWeights,
    extractors: Vec<Box<dyn SignalExtractor>>,
}

impl std::fmt::Debug for EvaluationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationEngine")
            .field("backend", &self.backend.capability())
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

impl EvaluationEngine {
    /// Build an engine, validating the lexicon and weights.
    pub fn new(
        backend: Arc<dyn LinguisticBackend>,
        lexicon: Arc<Lexicon>,
        weights: ScoreWeights,
    ) -> Result<Self, EvalError> {
        lexicon.validate()?;
        weights.validate()?;
        Ok(Self {
            backend,
            lexicon,
            weights,
            extractors: standard_extractors(),
        })
    }

    /// An engine on the fallback lexical backend with the built-in lexicon
    /// and default weights.
    pub fn basic() -> Result<Self, EvalError> {
        let lexicon = Arc::new(Lexicon::default());
        let backend = Arc::new(LexicalBackend::new(Arc::clone(&lexicon)));
        Self::new(backend, lexicon, ScoreWeights::default())
    }

    pub fn capability(&self) -> Capability {
        self.backend.capability()
    }

    /// Diagnostics only; never changes how answers are scored.
    pub fn is_enriched_backend_available(&self) -> bool {
        self.capability().is_enriched()
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The features an evaluation of `answer` would be scored on.
    pub fn features(&self, question: &Question, answer: &str) -> Result<FeatureBundle, EvalError> {
        question.validate()?;
        Ok(FeatureBundle::build(
            question,
            answer,
            self.backend.as_ref(),
            &self.lexicon,
        ))
    }

    /// Score one answer.
    ///
    /// Empty or very short answers are scored, not rejected. The only error
    /// is a malformed question.
    pub fn evaluate(&self, question: &Question, answer: &str) -> Result<EvaluationResult, EvalError> {
        let features = self.features(question, answer)?;
        let raw = extract_all(&self.extractors, question, &features);
        let sub_scores = finalize_sub_scores(&raw);
        let overall = overall_score(&sub_scores, &self.weights);
        let feedback = synthesize(&sub_scores, overall, &features);

        tracing::debug!(
            backend = ?self.capability(),
            content = ?features.content,
            overall,
            "evaluated answer"
        );

        Ok(EvaluationResult {
            sub_scores,
            overall_score: overall,
            feedback_text: feedback.summary,
            strengths: feedback.strengths,
            improvements: feedback.improvements,
            backend: self.capability(),
        })
    }
}

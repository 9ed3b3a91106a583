use super::SignalExtractor;
use crate::features::FeatureBundle;
use crate::model::{Dimension, Question};
use crate::rules::*;

/// Relevance to the question: similarity, shared entities and lemmas,
/// technical terms and concrete examples, scaled by difficulty.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccuracyExtractor;

impl AccuracyExtractor {
    /// The accuracy sum before the difficulty multiplier and clamping.
    pub fn raw_sum(f: &FeatureBundle) -> f64 {
        if !f.content.is_substantive() {
            return ACCURACY_BASE;
        }
        ACCURACY_BASE
            + f.similarity * SIMILARITY_WEIGHT
            + capped(f.shared_entities(), ENTITY_OVERLAP_POINTS, ENTITY_OVERLAP_CAP)
            + capped(f.shared_lemmas(), LEMMA_OVERLAP_POINTS, LEMMA_OVERLAP_CAP)
            + capped(
                f.signals.technical_terms.len(),
                TECHNICAL_TERM_POINTS,
                TECHNICAL_TERM_CAP,
            )
            + if f.signals.example { EXAMPLE_BONUS } else { 0.0 }
    }
}

impl SignalExtractor for AccuracyExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Accuracy
    }

    fn score(&self, question: &Question, f: &FeatureBundle) -> f64 {
        clamp_score(Self::raw_sum(f) * question.difficulty.accuracy_multiplier())
    }
}

use super::SignalExtractor;
use crate::features::FeatureBundle;
use crate::model::{Dimension, Question};
use crate::rules::*;

/// Assertive versus hedging language. Purely lexical, so it is scored the
/// same way whether or not the answer has enough content for the others.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceExtractor;

impl SignalExtractor for ConfidenceExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Confidence
    }

    fn score(&self, _question: &Question, f: &FeatureBundle) -> f64 {
        let s = &f.signals;
        let mut score = CONFIDENCE_BASE
            + capped(s.confident_phrases, CONFIDENT_PHRASE_POINTS, CONFIDENT_PHRASE_CAP)
            - capped(s.hedging, HEDGING_PENALTY, HEDGING_PENALTY_CAP)
            - capped(s.negative_words, NEGATIVE_WORD_PENALTY, NEGATIVE_WORD_PENALTY_CAP);
        if s.experience {
            score += EXPERIENCE_BONUS;
        }
        clamp_score(score)
    }
}

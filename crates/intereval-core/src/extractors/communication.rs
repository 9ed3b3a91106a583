use super::SignalExtractor;
use crate::features::FeatureBundle;
use crate::model::{Dimension, Question};
use crate::rules::*;

/// Flow and delivery: connectives, structure, sentence variety and tone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommunicationExtractor;

impl SignalExtractor for CommunicationExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Communication
    }

    fn score(&self, _question: &Question, f: &FeatureBundle) -> f64 {
        if !f.content.is_substantive() {
            return clamp_score(NO_CONTENT_COMMUNICATION);
        }

        let s = &f.signals;
        let mut score = COMMUNICATION_BASE
            + capped(s.transitions, TRANSITION_POINTS, TRANSITION_CAP)
            + capped(s.conjunctions, CONJUNCTION_POINTS, CONJUNCTION_CAP)
            + capped(
                s.communication_keywords,
                COMMUNICATION_KEYWORD_POINTS,
                COMMUNICATION_KEYWORD_CAP,
            )
            + capped(s.structure_markers, STRUCTURE_MARKER_POINTS, STRUCTURE_MARKER_CAP)
            + capped(s.positive_words, POSITIVE_WORD_POINTS, POSITIVE_WORD_CAP);
        if f.sentence_length_spread() > SENTENCE_VARIETY_SPREAD {
            score += SENTENCE_VARIETY_BONUS;
        }
        clamp_score(score)
    }
}

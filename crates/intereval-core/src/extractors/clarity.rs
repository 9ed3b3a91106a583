use super::SignalExtractor;
use crate::features::FeatureBundle;
use crate::model::{Dimension, Question};
use crate::rules::*;

/// Length, sentence structure and surface form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarityExtractor;

impl SignalExtractor for ClarityExtractor {
    fn dimension(&self) -> Dimension {
        Dimension::Clarity
    }

    fn score(&self, _question: &Question, f: &FeatureBundle) -> f64 {
        if !f.content.is_substantive() {
            return clamp_score(CLARITY_BASE);
        }

        let mut score = CLARITY_BASE;
        if f.char_count >= MIN_ANSWER_CHARS {
            score += CLARITY_LENGTH_BONUS;
        }
        if f.char_count > MIN_ANSWER_CHARS && f.char_count <= OPTIMAL_MAX_CHARS {
            score += CLARITY_OPTIMAL_LENGTH_BONUS;
        }
        if f.sentence_count() > 1 {
            score += CLARITY_MULTI_SENTENCE_BONUS;
        }

        let average = f.average_sentence_length();
        let (low, high) = OPTIMAL_SENTENCE_WORDS;
        if (low..=high).contains(&average) {
            score += CLARITY_SENTENCE_LENGTH_BONUS;
        } else if average > MAX_SENTENCE_WORDS {
            score -= CLARITY_LONG_SENTENCE_PENALTY;
        }

        if f.has_verb && f.has_noun {
            score += CLARITY_GRAMMAR_BONUS;
        }
        if f.ends_with_terminal {
            score += CLARITY_PUNCTUATION_BONUS;
        }
        if f.starts_uppercase {
            score += CLARITY_CAPITALIZATION_BONUS;
        }
        clamp_score(score)
    }
}

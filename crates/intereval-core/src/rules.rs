//! Scoring constants.
//!
//! Every base, bonus, cap and threshold used by the extractors, the
//! aggregator and the feedback synthesizer is defined here so the rules can
//! be tuned without touching scoring logic.

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

// ---------------------------------------------------------------------------
// Content gate
// ---------------------------------------------------------------------------

/// Trimmed answers shorter than this are scored as having no content.
pub const MIN_CONTENT_CHARS: usize = 10;

/// Communication score for an answer without content.
pub const NO_CONTENT_COMMUNICATION: f64 = 0.0;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

// ---------------------------------------------------------------------------
// Clarity
// ---------------------------------------------------------------------------

pub const CLARITY_BASE: f64 = 50.0;
/// Answers at least this long (characters) earn [`CLARITY_LENGTH_BONUS`].
pub const MIN_ANSWER_CHARS: usize = 20;
pub const CLARITY_LENGTH_BONUS: f64 = 20.0;
/// Upper bound (inclusive) of the optimal length band `(MIN_ANSWER_CHARS, OPTIMAL_MAX_CHARS]`.
pub const OPTIMAL_MAX_CHARS: usize = 200;
pub const CLARITY_OPTIMAL_LENGTH_BONUS: f64 = 10.0;
pub const CLARITY_MULTI_SENTENCE_BONUS: f64 = 10.0;
/// Average words per sentence considered readable.
pub const OPTIMAL_SENTENCE_WORDS: (f64, f64) = (10.0, 30.0);
pub const CLARITY_SENTENCE_LENGTH_BONUS: f64 = 10.0;
/// Average words per sentence above which sentences are too complex.
pub const MAX_SENTENCE_WORDS: f64 = 50.0;
pub const CLARITY_LONG_SENTENCE_PENALTY: f64 = 5.0;
pub const CLARITY_GRAMMAR_BONUS: f64 = 5.0;
pub const CLARITY_PUNCTUATION_BONUS: f64 = 5.0;
pub const CLARITY_CAPITALIZATION_BONUS: f64 = 5.0;

// ---------------------------------------------------------------------------
// Accuracy
// ---------------------------------------------------------------------------

pub const ACCURACY_BASE: f64 = 40.0;
/// Points for a perfect semantic similarity of 1.0.
pub const SIMILARITY_WEIGHT: f64 = 30.0;
pub const ENTITY_OVERLAP_POINTS: f64 = 5.0;
pub const ENTITY_OVERLAP_CAP: f64 = 15.0;
pub const LEMMA_OVERLAP_POINTS: f64 = 3.0;
pub const LEMMA_OVERLAP_CAP: f64 = 20.0;
pub const TECHNICAL_TERM_POINTS: f64 = 5.0;
pub const TECHNICAL_TERM_CAP: f64 = 20.0;
pub const EXAMPLE_BONUS: f64 = 10.0;
pub const EASY_ACCURACY_MULTIPLIER: f64 = 1.1;
pub const MEDIUM_ACCURACY_MULTIPLIER: f64 = 1.0;
pub const HARD_ACCURACY_MULTIPLIER: f64 = 0.9;

// ---------------------------------------------------------------------------
// Communication
// ---------------------------------------------------------------------------

pub const COMMUNICATION_BASE: f64 = 50.0;
pub const TRANSITION_POINTS: f64 = 5.0;
pub const TRANSITION_CAP: f64 = 15.0;
pub const CONJUNCTION_POINTS: f64 = 2.0;
pub const CONJUNCTION_CAP: f64 = 10.0;
/// Sentence lengths must spread by more than this many words to count as varied.
pub const SENTENCE_VARIETY_SPREAD: usize = 5;
pub const SENTENCE_VARIETY_BONUS: f64 = 5.0;
pub const COMMUNICATION_KEYWORD_POINTS: f64 = 8.0;
pub const COMMUNICATION_KEYWORD_CAP: f64 = 20.0;
pub const STRUCTURE_MARKER_POINTS: f64 = 5.0;
pub const STRUCTURE_MARKER_CAP: f64 = 15.0;
pub const POSITIVE_WORD_POINTS: f64 = 3.0;
pub const POSITIVE_WORD_CAP: f64 = 15.0;

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

pub const CONFIDENCE_BASE: f64 = 50.0;
pub const CONFIDENT_PHRASE_POINTS: f64 = 10.0;
pub const CONFIDENT_PHRASE_CAP: f64 = 30.0;
pub const HEDGING_PENALTY: f64 = 5.0;
pub const HEDGING_PENALTY_CAP: f64 = 20.0;
pub const EXPERIENCE_BONUS: f64 = 10.0;
pub const NEGATIVE_WORD_PENALTY: f64 = 3.0;
pub const NEGATIVE_WORD_PENALTY_CAP: f64 = 15.0;

// ---------------------------------------------------------------------------
// Aggregation and feedback
// ---------------------------------------------------------------------------

pub const CLARITY_WEIGHT: f64 = 0.25;
pub const ACCURACY_WEIGHT: f64 = 0.30;
pub const COMMUNICATION_WEIGHT: f64 = 0.25;
pub const CONFIDENCE_WEIGHT: f64 = 0.20;

/// Decimal places kept on sub-scores.
pub const SUB_SCORE_DECIMALS: u32 = 2;
/// Decimal places kept on the overall score.
pub const OVERALL_DECIMALS: u32 = 1;

/// Sub-scores at or above this are strengths, below it improvements.
pub const STRENGTH_THRESHOLD: f64 = 70.0;

pub const EXCELLENT_BAND_MIN: f64 = 85.0;
pub const GOOD_BAND_MIN: f64 = 70.0;
pub const FAIR_BAND_MIN: f64 = 50.0;

/// `points` per occurrence, never exceeding `cap`.
pub fn capped(count: usize, points: f64, cap: f64) -> f64 {
    (count as f64 * points).min(cap)
}

/// Clamp a raw score into `[MIN_SCORE, MAX_SCORE]`.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Dimension weights for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_clarity")]
    pub clarity: f64,
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
    #[serde(default = "default_communication")]
    pub communication: f64,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_clarity() -> f64 {
    CLARITY_WEIGHT
}
fn default_accuracy() -> f64 {
    ACCURACY_WEIGHT
}
fn default_communication() -> f64 {
    COMMUNICATION_WEIGHT
}
fn default_confidence() -> f64 {
    CONFIDENCE_WEIGHT
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            clarity: CLARITY_WEIGHT,
            accuracy: ACCURACY_WEIGHT,
            communication: COMMUNICATION_WEIGHT,
            confidence: CONFIDENCE_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Weights must be finite, non-negative and sum to 1.0.
    pub fn validate(&self) -> Result<(), EvalError> {
        let all = [self.clarity, self.accuracy, self.communication, self.confidence];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EvalError::Configuration(format!(
                "score weights must be non-negative numbers, got {all:?}"
            )));
        }
        let total: f64 = all.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(EvalError::Configuration(format!(
                "score weights must sum to 1.0, got {total}"
            )));
        }
        Ok(())
    }
}

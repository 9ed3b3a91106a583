//! Weighted combination of the four sub-scores.

use crate::model::SubScores;
use crate::rules::{self, ScoreWeights};

/// Clamp and round every sub-score to [`rules::SUB_SCORE_DECIMALS`] places.
pub fn finalize_sub_scores(raw: &SubScores) -> SubScores {
    let mut scores = SubScores::default();
    for (dimension, value) in raw.iter() {
        scores.set(
            dimension,
            rules::round_to(rules::clamp_score(value), rules::SUB_SCORE_DECIMALS),
        );
    }
    scores
}

/// The overall score of already finalized sub-scores, rounded to
/// [`rules::OVERALL_DECIMALS`] places.
pub fn overall_score(scores: &SubScores, weights: &ScoreWeights) -> f64 {
    let weighted = scores.clarity * weights.clarity
        + scores.accuracy * weights.accuracy
        + scores.communication * weights.communication
        + scores.confidence * weights.confidence;
    rules::clamp_score(rules::round_to(weighted, rules::OVERALL_DECIMALS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let scores = SubScores {
            clarity: 100.0,
            accuracy: 71.55,
            communication: 61.0,
            confidence: 70.0,
        };
        assert_eq!(overall_score(&scores, &ScoreWeights::default()), 75.7);
    }

    #[test]
    fn empty_answer_floor() {
        let scores = SubScores {
            clarity: 50.0,
            accuracy: 40.0,
            communication: 0.0,
            confidence: 40.0,
        };
        assert_eq!(overall_score(&scores, &ScoreWeights::default()), 32.5);
    }

    #[test]
    fn custom_weights() {
        let weights = ScoreWeights {
            clarity: 0.0,
            accuracy: 1.0,
            communication: 0.0,
            confidence: 0.0,
        };
        let scores = SubScores {
            clarity: 10.0,
            accuracy: 88.88,
            communication: 10.0,
            confidence: 10.0,
        };
        assert_eq!(overall_score(&scores, &weights), 88.9);
    }

    #[test]
    fn finalize_rounds_and_clamps() {
        let raw = SubScores {
            clarity: 115.0,
            accuracy: 71.549_999_999,
            communication: -4.0,
            confidence: 87.456,
        };
        let scores = finalize_sub_scores(&raw);
        assert_eq!(scores.clarity, 100.0);
        assert_eq!(scores.accuracy, 71.55);
        assert_eq!(scores.communication, 0.0);
        assert_eq!(scores.confidence, 87.46);
    }
}

//! Rule-driven feedback: strengths, improvements and a one-line summary.
//!
//! Strengths and improvements are ordered by dimension (clarity, accuracy,
//! communication, confidence) followed by structural findings, so the same
//! scores always produce the same text.

use crate::features::FeatureBundle;
use crate::model::{Dimension, ScoreBand, SubScores};
use crate::rules;

/// Used when an answer earns no strength at all.
pub const FALLBACK_STRENGTH: &str = "Attempted to answer the question";
/// Used when an answer has nothing left to improve.
pub const FALLBACK_IMPROVEMENT: &str = "Continue practicing to maintain your strong performance";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub summary: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

fn strength(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Clarity => "Clarity: clear, well-structured answer",
        Dimension::Accuracy => "Accuracy: relevant and accurate response to the question",
        Dimension::Communication => "Communication: effective communication with good flow",
        Dimension::Confidence => "Confidence: assertive delivery",
    }
}

fn improvement(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Clarity => "Clarity: add more structure and use complete sentences",
        Dimension::Accuracy => {
            "Accuracy: address the question more directly and use relevant terminology"
        }
        Dimension::Communication => {
            "Communication: connect your points with transitions and clear structure"
        }
        Dimension::Confidence => "Confidence: avoid hedging language and state what you did",
    }
}

/// Build feedback from finalized sub-scores and the answer's features.
pub fn synthesize(scores: &SubScores, overall: f64, features: &FeatureBundle) -> Feedback {
    let mut strengths: Vec<String> = Vec::new();
    let mut improvements: Vec<String> = Vec::new();

    for (dimension, value) in scores.iter() {
        if value >= rules::STRENGTH_THRESHOLD {
            strengths.push(strength(dimension).to_string());
        } else {
            improvements.push(improvement(dimension).to_string());
        }
    }
    let dimension_strengths = strengths.len();
    let dimension_improvements = improvements.len();

    let signals = &features.signals;
    if signals.example {
        strengths.push("Supports the answer with a concrete example".to_string());
    }
    if !signals.technical_terms.is_empty() {
        strengths.push(format!(
            "Uses relevant technical terms: {}",
            signals.technical_terms.join(", ")
        ));
    }

    if features.char_count < rules::MIN_ANSWER_CHARS {
        improvements.push("Answer is too short; expand with more detail".to_string());
    } else if features.char_count > rules::OPTIMAL_MAX_CHARS {
        improvements.push("Answer is long; consider making it more concise".to_string());
    }
    if !signals.example {
        improvements.push("Add a specific example to illustrate your point".to_string());
    }

    let top_strength = match top_dimension(scores, |v| v >= rules::STRENGTH_THRESHOLD, |a, b| a > b)
    {
        Some(dimension) => strength(dimension),
        None => strengths
            .get(dimension_strengths)
            .map_or(FALLBACK_STRENGTH, String::as_str),
    };
    let top_improvement =
        match top_dimension(scores, |v| v < rules::STRENGTH_THRESHOLD, |a, b| a < b) {
            Some(dimension) => improvement(dimension),
            None => improvements
                .get(dimension_improvements)
                .map_or(FALLBACK_IMPROVEMENT, String::as_str),
        };

    let summary = format!(
        "{} answer (overall {overall:.1}/100). Top strength: {top_strength}. Focus next on: {top_improvement}.",
        ScoreBand::from_score(overall),
    );

    Feedback {
        summary,
        strengths,
        improvements,
    }
}

/// The qualifying dimension that `better` prefers; ties keep reporting order.
fn top_dimension(
    scores: &SubScores,
    qualifies: impl Fn(f64) -> bool,
    better: impl Fn(f64, f64) -> bool,
) -> Option<Dimension> {
    let mut best: Option<(Dimension, f64)> = None;
    for (dimension, value) in scores.iter().filter(|(_, v)| qualifies(*v)) {
        match best {
            Some((_, current)) if !better(value, current) => {}
            _ => best = Some((dimension, value)),
        }
    }
    best.map(|(dimension, _)| dimension)
}

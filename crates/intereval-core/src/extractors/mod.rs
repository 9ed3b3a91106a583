//! The four signal extractors.
//!
//! Each extractor reads only the shared [`FeatureBundle`] (and the question
//! for accuracy) and returns an unrounded, clamped score in [0, 100].
//! Extractors never see each other's output.

mod accuracy;
mod clarity;
mod communication;
mod confidence;

pub use accuracy::AccuracyExtractor;
pub use clarity::ClarityExtractor;
pub use communication::CommunicationExtractor;
pub use confidence::ConfidenceExtractor;

use crate::features::FeatureBundle;
use crate::model::{Dimension, Question, SubScores};

/// Scores one dimension of an answer.
pub trait SignalExtractor: Send + Sync {
    fn dimension(&self) -> Dimension;

    fn score(&self, question: &Question, features: &FeatureBundle) -> f64;
}

/// One extractor per dimension, in reporting order.
pub fn standard_extractors() -> Vec<Box<dyn SignalExtractor>> {
    vec![
        Box::new(ClarityExtractor),
        Box::new(AccuracyExtractor),
        Box::new(CommunicationExtractor),
        Box::new(ConfidenceExtractor),
    ]
}

/// Run every extractor over the same features.
pub fn extract_all(
    extractors: &[Box<dyn SignalExtractor>],
    question: &Question,
    features: &FeatureBundle,
) -> SubScores {
    let mut scores = SubScores::default();
    for extractor in extractors {
        scores.set(extractor.dimension(), extractor.score(question, features));
    }
    scores
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::features::FeatureBundle;
    use crate::lexical::LexicalBackend;
    use crate::lexicon::Lexicon;
    use crate::model::{Difficulty, Domain, Question, QuestionType};

    pub fn question(difficulty: Difficulty) -> Question {
        Question::new(
            "Describe a REST API you implemented and deployed, focusing on performance optimization.",
            Domain::It,
            difficulty,
            QuestionType::Technical,
        )
        .with_keywords(["API"])
    }

    pub fn features(question: &Question, answer: &str) -> FeatureBundle {
        let lexicon = Arc::new(Lexicon::default());
        let backend = LexicalBackend::new(Arc::clone(&lexicon));
        FeatureBundle::build(question, answer, &backend, &lexicon)
    }
}

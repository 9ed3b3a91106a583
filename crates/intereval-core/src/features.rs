//! Per-evaluation feature extraction.
//!
//! A [`FeatureBundle`] is computed once per `(question, answer)` pair from
//! the backend's analyses and the lexicon, then shared read-only by all four
//! extractors. It is never cached or reused across evaluations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::model::Question;
use crate::rules;
use crate::text::{normalize_phrase, WordSequence};
use crate::traits::{LinguisticBackend, TextAnalysis};

/// How much content an answer carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentLevel {
    /// Nothing but whitespace.
    Empty,
    /// Fewer than [`rules::MIN_CONTENT_CHARS`] characters.
    Insufficient,
    Substantive,
}

impl ContentLevel {
    pub fn classify(trimmed_chars: usize) -> Self {
        if trimmed_chars == 0 {
            ContentLevel::Empty
        } else if trimmed_chars < rules::MIN_CONTENT_CHARS {
            ContentLevel::Insufficient
        } else {
            ContentLevel::Substantive
        }
    }

    pub fn is_substantive(self) -> bool {
        self == ContentLevel::Substantive
    }
}

/// Lexicon hits in the answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalSignals {
    /// Transition word occurrences (multi-word transitions count once).
    pub transitions: usize,
    /// Conjunction tokens as tagged by the backend.
    pub conjunctions: usize,
    /// Distinct hedging phrases.
    pub hedging: usize,
    /// Distinct confident phrases.
    pub confident_phrases: usize,
    pub experience: bool,
    pub example: bool,
    pub communication_keywords: usize,
    pub structure_markers: usize,
    pub positive_words: usize,
    pub negative_words: usize,
    /// Technical terms found in the answer, in their configured spelling.
    pub technical_terms: Vec<String>,
}

/// Everything the extractors need to know about one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBundle {
    pub content: ContentLevel,
    /// Characters in the trimmed answer.
    pub char_count: usize,
    /// Word tokens in the answer.
    pub token_count: usize,
    pub sentence_lengths: Vec<usize>,
    pub has_verb: bool,
    pub has_noun: bool,
    /// The trimmed answer ends with `.`, `!` or `?`.
    pub ends_with_terminal: bool,
    /// The first character of the trimmed answer is upper-case.
    pub starts_uppercase: bool,
    /// Content noun/verb lemmas of the answer.
    pub answer_lemmas: BTreeSet<String>,
    /// Content noun/verb lemmas of the question.
    pub question_lemmas: BTreeSet<String>,
    pub answer_entities: BTreeSet<String>,
    /// Named entities of the question plus its normalized keywords.
    pub question_entities: BTreeSet<String>,
    /// Answer/question semantic similarity in [0, 1]; 0 without content.
    pub similarity: f64,
    pub signals: LexicalSignals,
}

impl FeatureBundle {
    /// Analyze a question/answer pair.
    pub fn build(
        question: &Question,
        answer: &str,
        backend: &dyn LinguisticBackend,
        lexicon: &Lexicon,
    ) -> Self {
        let trimmed = answer.trim();
        let char_count = trimmed.chars().count();
        let content = ContentLevel::classify(char_count);

        let answer_analysis = backend.analyze(trimmed);
        let question_analysis = backend.analyze(&question.text);
        let similarity = if content.is_substantive() {
            crate::traits::unit_interval(
                backend.similarity_of(&answer_analysis, &question_analysis),
            )
        } else {
            0.0
        };

        let signals = LexicalSignals::extract(question, &answer_analysis, lexicon);
        let mut question_entities = question_analysis.entities.clone();
        question_entities.extend(
            question
                .keywords
                .iter()
                .map(|k| normalize_phrase(k))
                .filter(|k| !k.is_empty()),
        );

        Self {
            content,
            char_count,
            token_count: answer_analysis.word_count(),
            sentence_lengths: answer_analysis.sentence_lengths.clone(),
            has_verb: answer_analysis.has_verb(),
            has_noun: answer_analysis.has_noun(),
            ends_with_terminal: trimmed.ends_with(['.', '!', '?']),
            starts_uppercase: trimmed.chars().next().is_some_and(char::is_uppercase),
            answer_lemmas: answer_analysis.keyword_lemmas(),
            question_lemmas: question_analysis.keyword_lemmas(),
            answer_entities: answer_analysis.entities,
            question_entities,
            similarity,
            signals,
        }
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_lengths.len()
    }

    /// Mean words per sentence; 0 when there are no sentences.
    pub fn average_sentence_length(&self) -> f64 {
        if self.sentence_lengths.is_empty() {
            return 0.0;
        }
        self.sentence_lengths.iter().sum::<usize>() as f64 / self.sentence_lengths.len() as f64
    }

    /// Difference between the longest and shortest sentence, in words.
    pub fn sentence_length_spread(&self) -> usize {
        match (
            self.sentence_lengths.iter().max(),
            self.sentence_lengths.iter().min(),
        ) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }

    /// Answer entities that name a question entity, whole or in part.
    ///
    /// `rest api` in the answer matches `api` in the question and the other
    /// way round. Each answer entity counts at most once.
    pub fn shared_entities(&self) -> usize {
        self.answer_entities
            .iter()
            .filter(|a| {
                self.question_entities
                    .iter()
                    .any(|q| contains_words(a, q) || contains_words(q, a))
            })
            .count()
    }

    pub fn shared_lemmas(&self) -> usize {
        self.answer_lemmas.intersection(&self.question_lemmas).count()
    }
}

/// Whole-word containment of one normalized phrase in another.
fn contains_words(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && format!(" {haystack} ").contains(&format!(" {needle} "))
}

impl LexicalSignals {
    fn extract(question: &Question, answer: &TextAnalysis, lexicon: &Lexicon) -> Self {
        let words = WordSequence::from_tokens(answer.tokens.iter().map(|t| t.text.as_str()));

        let single_transitions: usize = answer
            .tokens
            .iter()
            .filter(|t| {
                lexicon.transition_words.contains(&t.lower)
                    || lexicon.transition_words.contains(&t.lemma)
            })
            .count();
        let multi_transitions = words.count_matches(
            lexicon
                .transition_words
                .iter()
                .filter(|p| p.contains(' ')),
        );

        Self {
            transitions: single_transitions + multi_transitions,
            conjunctions: answer.conjunction_count(),
            hedging: words.count_matches(&lexicon.hedging_phrases),
            confident_phrases: words.count_matches(&lexicon.confident_phrases),
            experience: words.contains_any(&lexicon.experience_phrases),
            example: words.contains_any(&lexicon.example_markers),
            communication_keywords: words.count_matches(&lexicon.communication_keywords),
            structure_markers: words.count_matches(&lexicon.structure_markers),
            positive_words: words.count_matches(&lexicon.positive_words),
            negative_words: words.count_matches(&lexicon.negative_words),
            technical_terms: technical_terms(question, &words, lexicon),
        }
    }
}

/// Question keywords present in the answer, or the domain vocabulary when
/// the question carries no keywords.
fn technical_terms(question: &Question, words: &WordSequence, lexicon: &Lexicon) -> Vec<String> {
    if question.keywords.is_empty() {
        return lexicon
            .domain_vocabulary(question.domain)
            .filter(|term| words.contains(term))
            .cloned()
            .collect();
    }
    question
        .keywords
        .iter()
        .filter(|k| words.contains(&normalize_phrase(k)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::lexical::LexicalBackend;
    use crate::model::{Difficulty, Domain, QuestionType};

    fn build(question: &Question, answer: &str) -> FeatureBundle {
        let lexicon = Arc::new(Lexicon::default());
        let backend = LexicalBackend::new(Arc::clone(&lexicon));
        FeatureBundle::build(question, answer, &backend, &lexicon)
    }

    fn question() -> Question {
        Question::new(
            "How did you improve API performance?",
            Domain::It,
            Difficulty::Medium,
            QuestionType::Technical,
        )
        .with_keywords(["API", "caching"])
    }

    #[test]
    fn content_levels() {
        assert_eq!(ContentLevel::classify(0), ContentLevel::Empty);
        assert_eq!(ContentLevel::classify(9), ContentLevel::Insufficient);
        assert_eq!(ContentLevel::classify(10), ContentLevel::Substantive);
    }

    #[test]
    fn structural_features() {
        let f = build(
            &question(),
            "  First, I profiled the API. Then I added caching, and latency dropped!  ",
        );
        assert_eq!(f.content, ContentLevel::Substantive);
        assert_eq!(f.sentence_lengths, vec![5, 7]);
        assert_eq!(f.sentence_count(), 2);
        assert_eq!(f.average_sentence_length(), 6.0);
        assert_eq!(f.sentence_length_spread(), 2);
        assert!(f.ends_with_terminal);
        assert!(f.starts_uppercase);
        assert_eq!(f.token_count, 12);
    }

    #[test]
    fn lexical_signals() {
        let f = build(
            &question(),
            "First, I think I improved the API. Then, for example, we added caching and it worked.",
        );
        assert_eq!(f.signals.transitions, 2);
        assert_eq!(f.signals.structure_markers, 2);
        assert_eq!(f.signals.hedging, 1);
        assert_eq!(f.signals.confident_phrases, 1);
        assert!(f.signals.example);
        assert_eq!(f.signals.conjunctions, 1);
        assert_eq!(f.signals.technical_terms, vec!["API", "caching"]);
    }

    #[test]
    fn domain_vocabulary_when_no_keywords() {
        let q = Question::new(
            "Tell me about a system you scaled.",
            Domain::It,
            Difficulty::Medium,
            QuestionType::Technical,
        );
        let f = build(&q, "We moved the database behind a cache and tuned indexing.");
        assert_eq!(f.signals.technical_terms, vec!["cache", "database", "indexing"]);
    }

    #[test]
    fn empty_answer_populates_every_field() {
        let f = build(&question(), "   ");
        assert_eq!(f.content, ContentLevel::Empty);
        assert_eq!(f.char_count, 0);
        assert_eq!(f.token_count, 0);
        assert!(f.sentence_lengths.is_empty());
        assert_eq!(f.average_sentence_length(), 0.0);
        assert_eq!(f.sentence_length_spread(), 0);
        assert_eq!(f.similarity, 0.0);
        assert!(!f.ends_with_terminal);
        assert!(!f.question_lemmas.is_empty());
        assert_eq!(f.signals, LexicalSignals::default());
    }

    #[test]
    fn entities_match_by_whole_words() {
        let q = Question::new(
            "What is your approach to performance optimization?",
            Domain::It,
            Difficulty::Hard,
            QuestionType::Technical,
        )
        .with_keywords(["API"]);
        let f = build(
            &q,
            "I implemented a REST API using Python and deployed it on AWS.",
        );
        assert!(f.question_entities.contains("api"));
        assert!(f.answer_entities.contains("rest api"));
        assert_eq!(f.shared_entities(), 1);

        // `api` must not match inside another word.
        let f = build(&q, "We rapidly shipped the Rapier Gateway on AWS.");
        assert_eq!(f.shared_entities(), 0);
    }

    #[test]
    fn short_answer_has_no_similarity() {
        let f = build(&question(), "API perf");
        assert_eq!(f.content, ContentLevel::Insufficient);
        assert_eq!(f.similarity, 0.0);
    }
}

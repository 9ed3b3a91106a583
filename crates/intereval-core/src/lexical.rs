//! Fallback lexical backend.
//!
//! Needs nothing beyond the [`Lexicon`]: regex tokenization, a fixed
//! stop-word list, sentence splitting on terminal punctuation, suffix and
//! word-list part-of-speech guesses, and Jaccard overlap in place of
//! semantic similarity.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::lexicon::Lexicon;
use crate::text::{self, fold};
use crate::traits::{Capability, LinguisticBackend, PartOfSpeech, TextAnalysis, Token};

/// The always-available analysis backend.
#[derive(Debug, Clone)]
pub struct LexicalBackend {
    lexicon: Arc<Lexicon>,
}

impl LexicalBackend {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    fn tag(&self, token: &str, lower: &str) -> PartOfSpeech {
        if !text::is_word(token) {
            return PartOfSpeech::Punctuation;
        }
        if text::is_numeric(token) {
            return PartOfSpeech::Numeral;
        }
        if self.lexicon.is_conjunction(lower) {
            return PartOfSpeech::Conjunction;
        }
        if self.lexicon.is_stop_word(lower) {
            return PartOfSpeech::Other;
        }
        let long = lower.chars().count() > 4;
        if self.lexicon.common_verbs.contains(lower)
            || (long && (lower.ends_with("ed") || lower.ends_with("ing")))
        {
            return PartOfSpeech::Verb;
        }
        if long && lower.ends_with("ly") {
            return PartOfSpeech::Adverb;
        }
        PartOfSpeech::Noun
    }

    /// Runs of capitalized words that do not open a sentence, plus acronyms.
    fn entities(&self, raw: &[&str]) -> BTreeSet<String> {
        let mut entities = BTreeSet::new();
        let mut current: Vec<String> = Vec::new();
        let mut sentence_start = true;

        for token in raw {
            let candidate = text::is_word(token)
                && *token != "I"
                && (text::is_acronym(token) || (text::is_capitalized(token) && !sentence_start))
                && !self.lexicon.is_stop_word(&fold(token));
            if candidate {
                current.push(fold(token));
            } else if !current.is_empty() {
                entities.insert(current.join(" "));
                current.clear();
            }
            if text::is_word(token) {
                sentence_start = false;
            } else if text::is_terminal(token) {
                sentence_start = true;
            }
        }
        if !current.is_empty() {
            entities.insert(current.join(" "));
        }
        entities
    }
}

impl LinguisticBackend for LexicalBackend {
    fn capability(&self) -> Capability {
        Capability::Basic
    }

    fn analyze(&self, input: &str) -> TextAnalysis {
        let raw = text::tokenize(input);
        let tokens = raw
            .iter()
            .map(|&t| {
                let lower = fold(t);
                Token {
                    text: t.to_string(),
                    pos: self.tag(t, &lower),
                    is_stop: self.lexicon.is_stop_word(&lower),
                    lemma: lower.clone(),
                    lower,
                }
            })
            .collect();

        TextAnalysis {
            tokens,
            sentence_lengths: text::sentence_lengths(&raw, |_| false),
            entities: self.entities(&raw),
        }
    }

    /// Jaccard overlap of lower-cased content words.
    fn similarity_of(&self, a: &TextAnalysis, b: &TextAnalysis) -> f64 {
        let words = |analysis: &TextAnalysis| -> BTreeSet<String> {
            analysis
                .tokens
                .iter()
                .filter(|t| t.is_content())
                .map(|t| t.lemma.clone())
                .collect()
        };
        let (wa, wb) = (words(a), words(b));
        let union = wa.union(&wb).count();
        if union == 0 {
            return 0.0;
        }
        wa.intersection(&wb).count() as f64 / union as f64
    }
}

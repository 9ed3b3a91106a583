//! The linguistic analysis contract.
//!
//! Every backend turns raw text into the same [`TextAnalysis`] shape, so the
//! extractors never need to know which backend is active. Backends are
//! built once at startup and shared immutably between threads.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Analysis output
// ---------------------------------------------------------------------------

/// Coarse part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Conjunction,
    Pronoun,
    Determiner,
    Preposition,
    Numeral,
    Punctuation,
    Other,
}

/// A single analyzed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Original surface form.
    pub text: String,
    /// Lower-case form.
    pub lower: String,
    /// Dictionary form (equal to `lower` when the backend cannot lemmatize).
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
}

impl Token {
    pub fn is_punct(&self) -> bool {
        self.pos == PartOfSpeech::Punctuation
    }

    pub fn is_noun(&self) -> bool {
        matches!(self.pos, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }

    pub fn is_verb(&self) -> bool {
        self.pos == PartOfSpeech::Verb
    }

    /// Non-stop, non-punctuation word.
    pub fn is_content(&self) -> bool {
        !self.is_stop && !self.is_punct()
    }
}

/// Backend output for one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub tokens: Vec<Token>,
    /// Number of words in each sentence, in order.
    pub sentence_lengths: Vec<usize>,
    /// Named entities, lower-cased.
    pub entities: BTreeSet<String>,
}

impl TextAnalysis {
    /// Number of non-punctuation tokens.
    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_punct()).count()
    }

    pub fn has_verb(&self) -> bool {
        self.tokens.iter().any(Token::is_verb)
    }

    pub fn has_noun(&self) -> bool {
        self.tokens.iter().any(Token::is_noun)
    }

    /// Lemmas of content nouns and verbs.
    pub fn keyword_lemmas(&self) -> BTreeSet<String> {
        self.tokens
            .iter()
            .filter(|t| t.is_content() && (t.is_noun() || t.is_verb()))
            .map(|t| t.lemma.clone())
            .collect()
    }

    pub fn conjunction_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.pos == PartOfSpeech::Conjunction)
            .count()
    }

    /// Lemma frequencies of content words.
    pub fn content_lemma_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for token in self.tokens.iter().filter(|t| t.is_content()) {
            *counts.entry(token.lemma.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// Which kind of backend is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Enriched tagger with word-vector similarity.
    Vectors,
    /// Enriched tagger, similarity from lemma frequency bags.
    Tagged,
    /// Fallback lexical heuristics.
    Basic,
}

impl Capability {
    pub fn is_enriched(self) -> bool {
        !matches!(self, Capability::Basic)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Vectors => write!(f, "enriched (word vectors)"),
            Capability::Tagged => write!(f, "enriched (tagger only)"),
            Capability::Basic => write!(f, "basic (lexical fallback)"),
        }
    }
}

/// Tokenization, tagging, lemmatization, entity extraction and similarity.
pub trait LinguisticBackend: Send + Sync {
    fn capability(&self) -> Capability;

    /// Analyze a text. Must not fail; empty text yields an empty analysis.
    fn analyze(&self, text: &str) -> TextAnalysis;

    /// Semantic similarity of two analyzed texts, in [0, 1].
    fn similarity_of(&self, a: &TextAnalysis, b: &TextAnalysis) -> f64;

    /// Semantic similarity of two raw texts, in [0, 1].
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self.similarity_of(&self.analyze(a), &self.analyze(b))
    }
}

/// Clamp a similarity into [0, 1], mapping NaN to 0.
pub fn unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Cosine similarity of two sparse count vectors.
pub fn bag_cosine(a: &BTreeMap<&str, usize>, b: &BTreeMap<&str, usize>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(k, &va)| b.get(k).map(|&vb| (va * vb) as f64))
        .sum();
    let norm = |m: &BTreeMap<&str, usize>| {
        m.values()
            .map(|&v| (v * v) as f64)
            .sum::<f64>()
            .sqrt()
    };
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        0.0
    } else {
        unit_interval(dot / denom)
    }
}

//! Enriched linguistic backend.
//!
//! Adds what the lexical fallback lacks: abbreviation-aware sentence
//! splitting, contextual part-of-speech tags, lemmas, entity extraction with
//! numbers and percentages, and semantic similarity from word vectors when
//! they are loaded.

use std::collections::BTreeSet;
use std::sync::Arc;

use intereval_core::lexicon::Lexicon;
use intereval_core::text::{self, fold};
use intereval_core::traits::{
    bag_cosine, unit_interval, Capability, LinguisticBackend, PartOfSpeech, TextAnalysis, Token,
};

use crate::error::BackendError;
use crate::tagger::{keeps_sentence_open, Tagger};
use crate::vectors::{cosine, WordVectors};

const CURRENCY_SYMBOLS: &[&str] = &["$", "€", "£", "¥"];

/// Tagger-based backend, optionally with word vectors.
#[derive(Debug, Clone)]
pub struct EnrichedBackend {
    lexicon: Arc<Lexicon>,
    tagger: Tagger,
    vectors: Option<Arc<WordVectors>>,
}

impl EnrichedBackend {
    pub fn new(lexicon: Arc<Lexicon>) -> Result<Self, BackendError> {
        let tagger = Tagger::new(&lexicon)?;
        Ok(Self {
            lexicon,
            tagger,
            vectors: None,
        })
    }

    /// Use word vectors for similarity.
    pub fn with_vectors(mut self, vectors: Arc<WordVectors>) -> Self {
        self.vectors = Some(vectors);
        self
    }

    fn lemma(&self, token: &str, lower: &str, pos: PartOfSpeech) -> String {
        match pos {
            PartOfSpeech::ProperNoun => match token.strip_suffix('s') {
                Some(stem) if text::is_acronym(stem) => fold(stem),
                _ => lower.to_string(),
            },
            _ => self.tagger.lemmatizer().lemma(lower, pos),
        }
    }

    fn entities(&self, raw: &[&str], tags: &[PartOfSpeech]) -> BTreeSet<String> {
        let mut entities = BTreeSet::new();
        let mut current: Vec<String> = Vec::new();

        for (i, (&token, &pos)) in raw.iter().zip(tags).enumerate() {
            let lower = fold(token);
            if pos == PartOfSpeech::ProperNoun && !self.lexicon.is_stop_word(&lower) {
                current.push(lower);
                continue;
            }
            if !current.is_empty() {
                entities.insert(current.join(" "));
                current.clear();
            }
            if pos == PartOfSpeech::Numeral {
                let after_currency = i
                    .checked_sub(1)
                    .is_some_and(|p| CURRENCY_SYMBOLS.contains(&raw[p]));
                if after_currency {
                    entities.insert(format!("{}{lower}", raw[i - 1]));
                } else if lower.ends_with('%') {
                    entities.insert(lower);
                }
            }
        }
        if !current.is_empty() {
            entities.insert(current.join(" "));
        }
        entities
    }

    fn vector_similarity(
        &self,
        vectors: &WordVectors,
        a: &TextAnalysis,
        b: &TextAnalysis,
    ) -> Option<f64> {
        let words = |analysis: &TextAnalysis| -> Vec<String> {
            analysis
                .tokens
                .iter()
                .filter(|t| t.is_content())
                .map(|t| {
                    if vectors.get(&t.lower).is_some() {
                        t.lower.clone()
                    } else {
                        t.lemma.clone()
                    }
                })
                .collect()
        };
        let (wa, wb) = (words(a), words(b));
        let va = vectors.mean(wa.iter().map(String::as_str))?;
        let vb = vectors.mean(wb.iter().map(String::as_str))?;
        Some(unit_interval(cosine(&va, &vb)))
    }
}

impl LinguisticBackend for EnrichedBackend {
    fn capability(&self) -> Capability {
        if self.vectors.is_some() {
            Capability::Vectors
        } else {
            Capability::Tagged
        }
    }

    fn analyze(&self, input: &str) -> TextAnalysis {
        let raw = text::tokenize(input);
        let tags = self.tagger.tag(&raw);
        let tokens = raw
            .iter()
            .zip(&tags)
            .map(|(&t, &pos)| {
                let lower = fold(t);
                Token {
                    text: t.to_string(),
                    lemma: self.lemma(t, &lower, pos),
                    pos,
                    is_stop: self.lexicon.is_stop_word(&lower),
                    lower,
                }
            })
            .collect();

        TextAnalysis {
            tokens,
            sentence_lengths: text::sentence_lengths(&raw, |i| keeps_sentence_open(&raw, i)),
            entities: self.entities(&raw, &tags),
        }
    }

    /// Word-vector cosine when both texts have known words, otherwise cosine
    /// of content-lemma frequencies.
    fn similarity_of(&self, a: &TextAnalysis, b: &TextAnalysis) -> f64 {
        if let Some(vectors) = &self.vectors {
            if let Some(similarity) = self.vector_similarity(vectors, a, b) {
                return similarity;
            }
        }
        bag_cosine(&a.content_lemma_counts(), &b.content_lemma_counts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn backend() -> EnrichedBackend {
        EnrichedBackend::new(Arc::new(Lexicon::default())).unwrap()
    }

    fn vectors() -> Arc<WordVectors> {
        let content = "cache 1.0 0.1 0.0\ncaching 0.9 0.2 0.0\nlatency 0.8 0.3 0.0\n\
                       budget 0.0 0.1 1.0\nforecast 0.0 0.2 0.9\n";
        Arc::new(WordVectors::from_reader(Cursor::new(content)).unwrap())
    }

    #[test]
    fn analyze_with_lemmas_and_entities() {
        let analysis = backend().analyze(
            "I implemented a REST API using Python and deployed it on AWS. \
             For example, I reduced latency by 40% through caching.",
        );
        assert_eq!(analysis.sentence_lengths, vec![12, 9]);
        let lemma = |word: &str| {
            analysis
                .tokens
                .iter()
                .find(|t| t.text == word)
                .map(|t| t.lemma.clone())
                .unwrap()
        };
        assert_eq!(lemma("implemented"), "implement");
        assert_eq!(lemma("deployed"), "deploy");
        assert_eq!(lemma("reduced"), "reduce");
        assert_eq!(lemma("using"), "use");
        for entity in ["rest api", "python", "aws", "40%"] {
            assert!(analysis.entities.contains(entity), "missing {entity}");
        }
        assert!(analysis.has_verb());
        assert!(analysis.has_noun());
        assert_eq!(analysis.conjunction_count(), 1);
    }

    #[test]
    fn abbreviations_do_not_split_sentences() {
        let analysis = backend().analyze("Dr. Smith reviewed it, e.g. the cache layer. It worked.");
        assert_eq!(analysis.sentence_lengths.len(), 2);
    }

    #[test]
    fn currency_amounts_are_entities() {
        let analysis = backend().analyze("We saved $5000 per month.");
        assert!(analysis.entities.contains("$5000"));
        assert!(!analysis.entities.contains("5000"));
    }

    #[test]
    fn empty_text_has_every_field() {
        let analysis = backend().analyze("");
        assert!(analysis.tokens.is_empty());
        assert!(analysis.sentence_lengths.is_empty());
        assert!(analysis.entities.is_empty());
    }

    #[test]
    fn tagged_similarity_uses_lemma_bags() {
        let b = backend();
        assert_eq!(b.capability(), Capability::Tagged);
        let same = b.similarity("We cached the results.", "Results are cached.");
        assert!((same - 1.0).abs() < 1e-9, "got {same}");
        assert_eq!(b.similarity("caching latency", "budget forecast"), 0.0);
        assert_eq!(b.similarity("", "anything"), 0.0);
    }

    #[test]
    fn vector_similarity() {
        let b = backend().with_vectors(vectors());
        assert_eq!(b.capability(), Capability::Vectors);
        let related = b.similarity("caching latency", "cache");
        let unrelated = b.similarity("caching latency", "budget forecast");
        assert!(related > 0.9, "got {related}");
        assert!(unrelated < 0.3, "got {unrelated}");
        assert!((0.0..=1.0).contains(&unrelated));
    }

    #[test]
    fn vector_similarity_falls_back_without_known_words() {
        let b = backend().with_vectors(vectors());
        let s = b.similarity("kubernetes pods", "kubernetes pods");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn vocabulary_failure_is_reported() {
        let mut lexicon = Lexicon::default();
        lexicon.conjunctions.clear();
        let err = EnrichedBackend::new(Arc::new(lexicon)).unwrap_err();
        assert!(matches!(err, BackendError::Vocabulary(_)));
    }
}

//! Closed-class part-of-speech tagger.
//!
//! Function words are looked up in fixed lists, open-class words are guessed
//! from the verb vocabulary and suffixes, and a second pass corrects the
//! guesses from their neighbours (`the testing` is a noun, `we will ship`
//! is a verb, `I have experience` uses `have` as a main verb).

use std::collections::BTreeSet;

use intereval_core::lexicon::Lexicon;
use intereval_core::text::{self, fold};
use intereval_core::traits::PartOfSpeech;

use crate::error::BackendError;
use crate::lemmatizer::Lemmatizer;

const DETERMINERS: &[&str] = &[
    "a", "all", "an", "another", "any", "both", "each", "every", "no", "some", "that", "the",
    "these", "this", "those",
];

const PRONOUNS: &[&str] = &[
    "he", "her", "hers", "herself", "him", "himself", "his", "i", "it", "its", "itself", "me",
    "mine", "my", "myself", "our", "ours", "ourselves", "she", "their", "theirs", "them",
    "themselves", "they", "us", "we", "what", "which", "who", "whom", "whose", "you", "your",
    "yours", "yourself",
];

const POSSESSIVES: &[&str] = &["her", "his", "its", "my", "our", "their", "your"];

const AUXILIARIES: &[&str] = &[
    "am", "are", "be", "been", "being", "can", "could", "did", "do", "does", "had", "has",
    "have", "having", "is", "may", "might", "must", "shall", "should", "was", "were", "will",
    "would",
];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would",
];

/// Auxiliaries that can also be main verbs.
const LIGHT_VERBS: &[&str] = &["did", "do", "does", "had", "has", "have", "having"];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "at",
    "before", "behind", "below", "beneath", "beside", "between", "beyond", "by", "despite",
    "down", "during", "for", "from", "in", "inside", "into", "like", "near", "of", "off", "on",
    "onto", "out", "over", "per", "through", "throughout", "to", "toward", "towards", "under",
    "upon", "via", "with", "within", "without",
];

const ADVERBS: &[&str] = &[
    "again", "almost", "already", "also", "always", "even", "ever", "here", "just", "later",
    "never", "not", "now", "often", "once", "quite", "rather", "really", "soon", "still",
    "then", "there", "too", "very",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ance", "ence", "ship", "ism", "ist", "ure", "age",
    "er", "or",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "able", "ible", "ful", "ous", "ive", "less", "ical", "al", "ic", "ent", "ant", "ary",
];

/// Titles that are always followed by a name (`Dr. Smith`).
const TITLES: &[&str] = &["dr", "jr", "mr", "mrs", "ms", "prof", "sr", "st"];

/// Abbreviations that only continue a sentence before a lower-case word.
const ABBREVIATIONS: &[&str] = &[
    "approx", "cf", "corp", "dept", "eg", "est", "etc", "ie", "inc", "ltd", "vs",
];

fn listed(list: &[&str], word: &str) -> bool {
    list.contains(&word)
}

#[derive(Debug, Clone)]
pub struct Tagger {
    verbs: BTreeSet<String>,
    conjunctions: BTreeSet<String>,
    lemmatizer: Lemmatizer,
}

impl Tagger {
    /// Build the tagger vocabulary from the lexicon.
    pub fn new(lexicon: &Lexicon) -> Result<Self, BackendError> {
        if lexicon.common_verbs.is_empty() {
            return Err(BackendError::Vocabulary("lexicon has no common verbs".into()));
        }
        if lexicon.conjunctions.is_empty() {
            return Err(BackendError::Vocabulary("lexicon has no conjunctions".into()));
        }
        Ok(Self {
            verbs: lexicon.common_verbs.clone(),
            conjunctions: lexicon.conjunctions.clone(),
            lemmatizer: Lemmatizer::new(lexicon.common_verbs.clone()),
        })
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    /// Tag every token of a tokenized text.
    pub fn tag(&self, raw: &[&str]) -> Vec<PartOfSpeech> {
        let initial = sentence_initial(raw);
        let mut tags: Vec<PartOfSpeech> = raw
            .iter()
            .zip(&initial)
            .map(|(token, &first)| self.guess(token, first))
            .collect();
        self.apply_context(raw, &initial, &mut tags);
        tags
    }

    fn guess(&self, token: &str, sentence_initial: bool) -> PartOfSpeech {
        if !text::is_word(token) {
            return PartOfSpeech::Punctuation;
        }
        if text::is_numeric(token) {
            return PartOfSpeech::Numeral;
        }
        let lower = fold(token);
        let lower = lower.as_str();
        if listed(PRONOUNS, lower) {
            return PartOfSpeech::Pronoun;
        }
        if listed(DETERMINERS, lower) {
            return PartOfSpeech::Determiner;
        }
        if listed(AUXILIARIES, lower) {
            return PartOfSpeech::Auxiliary;
        }
        if self.conjunctions.contains(lower) {
            return PartOfSpeech::Conjunction;
        }
        if listed(PREPOSITIONS, lower) {
            return PartOfSpeech::Preposition;
        }
        if listed(ADVERBS, lower) {
            return PartOfSpeech::Adverb;
        }
        if text::is_acronym(token) || is_plural_acronym(token) {
            return PartOfSpeech::ProperNoun;
        }
        if text::is_capitalized(token) && !sentence_initial {
            return PartOfSpeech::ProperNoun;
        }

        let long = lower.chars().count() > 4;
        if self.verbs.contains(lower) {
            return PartOfSpeech::Verb;
        }
        if long && lower.ends_with("ly") {
            return PartOfSpeech::Adverb;
        }
        if long && (lower.ends_with("ed") || lower.ends_with("ing")) {
            return PartOfSpeech::Verb;
        }
        let base = self.lemmatizer.lemma(lower, PartOfSpeech::Verb);
        if base != lower && self.verbs.contains(&base) {
            return PartOfSpeech::Verb;
        }
        if long && NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return PartOfSpeech::Noun;
        }
        if long && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return PartOfSpeech::Adjective;
        }
        PartOfSpeech::Noun
    }

    fn apply_context(&self, raw: &[&str], initial: &[bool], tags: &mut [PartOfSpeech]) {
        let guesses = tags.to_vec();
        let lowers: Vec<String> = raw.iter().map(|t| fold(t)).collect();

        for i in 0..raw.len() {
            let prev = i.checked_sub(1).map(|p| (guesses[p], lowers[p].as_str()));
            match guesses[i] {
                PartOfSpeech::Verb => {
                    let after_modifier = prev.is_some_and(|(tag, word)| {
                        matches!(tag, PartOfSpeech::Determiner | PartOfSpeech::Adjective)
                            || listed(POSSESSIVES, word)
                    });
                    if after_modifier {
                        tags[i] = PartOfSpeech::Noun;
                    }
                }
                PartOfSpeech::Noun | PartOfSpeech::Adjective => {
                    let after_modal = prev.is_some_and(|(_, word)| listed(MODALS, word));
                    if after_modal && !text::is_capitalized(raw[i]) {
                        tags[i] = PartOfSpeech::Verb;
                    } else if initial[i]
                        && text::is_capitalized(raw[i])
                        && guesses.get(i + 1) == Some(&PartOfSpeech::ProperNoun)
                    {
                        tags[i] = PartOfSpeech::ProperNoun;
                    }
                }
                PartOfSpeech::Auxiliary if listed(LIGHT_VERBS, &lowers[i]) => {
                    if !self.heads_verb_phrase(&guesses, &lowers, i) {
                        tags[i] = PartOfSpeech::Verb;
                    }
                }
                _ => {}
            }
        }
    }

    /// `true` when the auxiliary at `i` is followed by a verb, possibly
    /// after adverbs such as `not`.
    fn heads_verb_phrase(&self, tags: &[PartOfSpeech], lowers: &[String], i: usize) -> bool {
        let next = (i + 1..tags.len()).find(|&j| tags[j] != PartOfSpeech::Adverb);
        match next {
            Some(j) => {
                matches!(tags[j], PartOfSpeech::Verb | PartOfSpeech::Auxiliary)
                    || (tags[j] == PartOfSpeech::Pronoun && lowers[i].starts_with('d'))
            }
            None => false,
        }
    }
}

/// `APIs`, `SDKs`.
fn is_plural_acronym(token: &str) -> bool {
    token
        .strip_suffix('s')
        .is_some_and(|stem| text::is_acronym(stem))
}

/// `true` when the terminal at `i` belongs to an abbreviation and does not
/// end the sentence.
pub fn keeps_sentence_open(raw: &[&str], i: usize) -> bool {
    if raw.get(i) != Some(&".") || i == 0 {
        return false;
    }
    let prev = raw[i - 1];
    if !text::is_word(prev) {
        return false;
    }
    let prev = fold(prev);
    if listed(TITLES, &prev) {
        return true;
    }
    let short = prev.chars().count() == 1 && prev.chars().all(char::is_alphabetic);
    if short || listed(ABBREVIATIONS, &prev) {
        return match raw.get(i + 1) {
            Some(next) if text::is_word(next) => !text::is_capitalized(next),
            Some(next) => *next == "," || *next == ".",
            None => false,
        };
    }
    false
}

/// Marks the first word of every sentence.
fn sentence_initial(raw: &[&str]) -> Vec<bool> {
    let mut flags = Vec::with_capacity(raw.len());
    let mut at_start = true;
    for (i, token) in raw.iter().enumerate() {
        let is_word = text::is_word(token);
        flags.push(is_word && at_start);
        if is_word {
            at_start = false;
        } else if text::is_terminal(token) && !keeps_sentence_open(raw, i) {
            at_start = true;
        }
    }
    flags
}

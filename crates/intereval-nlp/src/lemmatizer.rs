//! Rule-based English lemmatizer.
//!
//! Irregular forms come from a fixed table; regular inflections are undone
//! with suffix rules and checked against the known verb vocabulary so that
//! `using` becomes `use` and `planned` becomes `plan`.

use std::collections::{BTreeSet, HashMap};

use intereval_core::traits::PartOfSpeech;

const IRREGULAR: &[(&str, &str)] = &[
    ("am", "be"), ("are", "be"), ("is", "be"), ("was", "be"), ("were", "be"),
    ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"), ("having", "have"),
    ("does", "do"), ("did", "do"), ("done", "do"), ("doing", "do"),
    ("went", "go"), ("gone", "go"), ("made", "make"), ("built", "build"), ("led", "lead"),
    ("ran", "run"), ("wrote", "write"), ("written", "write"), ("took", "take"),
    ("taken", "take"), ("gave", "give"), ("given", "give"), ("got", "get"),
    ("gotten", "get"), ("found", "find"), ("thought", "think"), ("knew", "know"),
    ("known", "know"), ("brought", "bring"), ("bought", "buy"), ("taught", "teach"),
    ("chose", "choose"), ("chosen", "choose"), ("spent", "spend"), ("sent", "send"),
    ("kept", "keep"), ("held", "hold"), ("met", "meet"), ("paid", "pay"), ("said", "say"),
    ("told", "tell"), ("saw", "see"), ("seen", "see"), ("began", "begin"),
    ("begun", "begin"), ("became", "become"), ("understood", "understand"),
    ("felt", "feel"), ("left", "leave"), ("grew", "grow"), ("grown", "grow"),
    ("drove", "drive"), ("driven", "drive"), ("won", "win"), ("lost", "lose"),
    ("children", "child"), ("people", "person"), ("men", "man"), ("women", "woman"),
    ("analyses", "analysis"), ("criteria", "criterion"), ("indices", "index"),
];

/// Stem endings after which a dropped `e` is restored (`automat` -> `automate`).
const E_RESTORING_ENDINGS: &[&str] = &["at", "iz", "is", "ag", "ur", "bl", "dl", "tl", "c", "v", "u"];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    verbs: BTreeSet<String>,
}

impl Lemmatizer {
    pub fn new(verbs: BTreeSet<String>) -> Self {
        Self {
            irregular: IRREGULAR.iter().copied().collect(),
            verbs,
        }
    }

    /// Lemma of a lower-case word given its part of speech.
    pub fn lemma(&self, lower: &str, pos: PartOfSpeech) -> String {
        if let Some(base) = self.irregular.get(lower) {
            return (*base).to_string();
        }
        match pos {
            PartOfSpeech::Verb | PartOfSpeech::Auxiliary => self.verb_lemma(lower),
            PartOfSpeech::Noun => noun_lemma(lower),
            _ => lower.to_string(),
        }
    }

    fn is_verb(&self, word: &str) -> bool {
        self.verbs.contains(word)
    }

    fn verb_lemma(&self, word: &str) -> String {
        if self.is_verb(word) || word.chars().count() <= 3 {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix("ied") {
            return format!("{stem}y");
        }
        if let Some(stem) = word.strip_suffix("ing") {
            return self.restore_stem(stem);
        }
        if let Some(stem) = word.strip_suffix("ed") {
            return self.restore_stem(stem);
        }
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{stem}y");
        }
        if let Some(stem) = word.strip_suffix("es") {
            if ["s", "x", "z", "ch", "sh"].iter().any(|e| stem.ends_with(e)) {
                return stem.to_string();
            }
        }
        if let Some(stem) = word.strip_suffix('s') {
            if !stem.ends_with('s') {
                return stem.to_string();
            }
        }
        word.to_string()
    }

    /// Recover a base form from a stem left after removing `-ed` or `-ing`.
    fn restore_stem(&self, stem: &str) -> String {
        if stem.is_empty() {
            return String::new();
        }
        if self.is_verb(stem) {
            return stem.to_string();
        }
        let with_e = format!("{stem}e");
        if self.is_verb(&with_e) {
            return with_e;
        }
        if let Some(undoubled) = undouble(stem) {
            if self.is_verb(undoubled) || !E_RESTORING_ENDINGS.iter().any(|e| stem.ends_with(e)) {
                return undoubled.to_string();
            }
        }
        if E_RESTORING_ENDINGS.iter().any(|e| stem.ends_with(e)) {
            return with_e;
        }
        stem.to_string()
    }
}

/// `plann` -> `plan`, but keep `ll`, `ss` and `zz`.
fn undouble(stem: &str) -> Option<&str> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let before = chars.next()?;
    if last == before && !"aeiouylsz".contains(last) && last.is_ascii_alphabetic() {
        Some(&stem[..stem.len() - last.len_utf8()])
    } else {
        None
    }
}

fn noun_lemma(word: &str) -> String {
    if word.chars().count() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if ["ss", "us", "sis", "xis"].iter().any(|e| word.ends_with(e)) {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

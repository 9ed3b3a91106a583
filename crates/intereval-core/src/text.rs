//! Tokenization and phrase matching shared by every analysis backend.
//!
//! Words are runs of alphanumerics. Apostrophes and hyphens stay inside a
//! word when they sit between two alphanumerics (`didn't`, `real-time`), a
//! `.` or `,` stays inside a number (`3.5`, `1,000`) and a trailing `%`
//! attaches to a number (`40%`). Any other non-whitespace character is a
//! one-character punctuation token.

use std::sync::LazyLock;

use regex::Regex;

/// Word tokens with their joins, or any single non-space character.
///
/// A word unit is a `digit[.,]digit` group or one alphanumeric; units chain
/// directly or across an apostrophe or hyphen. The optional `%` is kept only
/// after a digit, see [`tokenize`].
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<word>(?:[0-9](?:[.,][0-9])+|[\p{Alphabetic}\p{N}])(?:[0-9](?:[.,][0-9])+|[\p{Alphabetic}\p{N}]|['\x{2019}-][\p{Alphabetic}\p{N}])*)(?P<pct>%)?|\S",
    )
    .expect("token pattern compiles")
});

/// Split `text` into word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for caps in TOKEN.captures_iter(text) {
        let (Some(word), Some(pct)) = (caps.name("word"), caps.name("pct")) else {
            if let Some(m) = caps.get(0) {
                tokens.push(m.as_str());
            }
            continue;
        };
        if word.as_str().ends_with(|c: char| c.is_ascii_digit()) {
            tokens.push(&text[word.start()..pct.end()]);
        } else {
            tokens.push(word.as_str());
            tokens.push(pct.as_str());
        }
    }
    tokens
}

/// `true` for word tokens (anything starting with an alphanumeric).
pub fn is_word(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_alphanumeric)
}

/// `true` for sentence-closing punctuation.
pub fn is_terminal(token: &str) -> bool {
    matches!(token, "." | "!" | "?")
}

/// `true` for numbers, including decimals and percentages.
pub fn is_numeric(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%'))
}

/// `true` for all-capital acronyms such as `AWS` or `SQL`.
pub fn is_acronym(token: &str) -> bool {
    token.chars().count() >= 2
        && token.chars().any(|c| c.is_ascii_uppercase())
        && token.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// `true` when the first character is upper-case.
pub fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

/// Lower-case a word and fold typographic apostrophes.
pub fn fold(word: &str) -> String {
    word.to_lowercase().replace('\u{2019}', "'")
}

/// Normalize a lexicon phrase into the single-spaced, lower-case word form
/// used by [`WordSequence`].
pub fn normalize_phrase(phrase: &str) -> String {
    tokenize(phrase)
        .into_iter()
        .filter(|t| is_word(t))
        .map(fold)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word counts per sentence.
///
/// A sentence ends at a terminal punctuation token unless `keeps_open`
/// returns `true` for that token's index. Runs of terminals (`?!`, `...`)
/// close a single sentence, and trailing words without a terminal still
/// form a final sentence.
pub fn sentence_lengths<F>(tokens: &[&str], keeps_open: F) -> Vec<usize>
where
    F: Fn(usize) -> bool,
{
    let mut lengths = Vec::new();
    let mut words = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        if is_word(token) {
            words += 1;
        } else if is_terminal(token) && words > 0 && !keeps_open(i) {
            lengths.push(words);
            words = 0;
        }
    }
    if words > 0 {
        lengths.push(words);
    }
    lengths
}

/// A lower-case, space-padded word sequence for whole-word phrase matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSequence {
    padded: String,
}

impl WordSequence {
    /// Build from already-tokenized words; punctuation tokens are skipped.
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut padded = String::from(" ");
        for token in tokens.into_iter().filter(|t| is_word(t)) {
            padded.push_str(&fold(token));
            padded.push(' ');
        }
        Self { padded }
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_tokens(tokenize(text))
    }

    pub fn is_empty(&self) -> bool {
        self.padded.trim().is_empty()
    }

    /// Whole-word match of an already normalized phrase.
    pub fn contains(&self, phrase: &str) -> bool {
        !phrase.is_empty() && self.padded.contains(&format!(" {phrase} "))
    }

    /// Number of distinct phrases present.
    pub fn count_matches<'a, I>(&self, phrases: I) -> usize
    where
        I: IntoIterator<Item = &'a String>,
    {
        phrases.into_iter().filter(|p| self.contains(p)).count()
    }

    /// `true` if any phrase is present.
    pub fn contains_any<'a, I>(&self, phrases: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        phrases.into_iter().any(|p| self.contains(p))
    }
}

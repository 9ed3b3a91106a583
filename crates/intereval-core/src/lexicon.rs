//! Heuristic word and phrase lists.
//!
//! The lists are configuration data, not logic: the built-in defaults can be
//! replaced list by list from a TOML file, e.g.
//!
//! ```toml
//! hedging_phrases = ["maybe", "perhaps", "i think", "not sure"]
//!
//! [domain_terms]
//! finance = ["npv", "irr", "cash flow"]
//! ```
//!
//! Every entry is normalized into the lower-case, single-spaced word form
//! that [`WordSequence`](crate::text::WordSequence) matches against.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::model::Domain;
use crate::text::normalize_phrase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub stop_words: BTreeSet<String>,
    /// Base forms used to recognise verbs.
    pub common_verbs: BTreeSet<String>,
    pub conjunctions: BTreeSet<String>,
    pub transition_words: BTreeSet<String>,
    /// Enumeration and signposting markers ("first", "finally", "in summary").
    pub structure_markers: BTreeSet<String>,
    pub hedging_phrases: BTreeSet<String>,
    pub confident_phrases: BTreeSet<String>,
    pub experience_phrases: BTreeSet<String>,
    pub example_markers: BTreeSet<String>,
    pub communication_keywords: BTreeSet<String>,
    pub positive_words: BTreeSet<String>,
    pub negative_words: BTreeSet<String>,
    /// Default technical vocabulary per domain name (`it`, `hr`, `finance`,
    /// `management`), used when a question has no keywords.
    pub domain_terms: BTreeMap<String, BTreeSet<String>>,
}

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
    "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "may",
    "me", "might", "mine", "more", "most", "must", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "our", "out", "over", "own", "same", "shall",
    "she", "should", "so", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "us", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "whose", "why", "will", "with", "would", "you", "your",
];

const COMMON_VERBS: &[&str] = &[
    "achieve", "adapt", "align", "analyze", "apply", "approach", "assess", "automate",
    "believe", "boost", "build", "cache", "calculate", "choose", "coach", "collaborate",
    "communicate", "complete", "configure", "coordinate", "create", "cut", "debug", "decide",
    "decrease", "define", "delegate", "deliver", "deploy", "describe", "design", "develop",
    "discuss", "document", "ensure", "evaluate", "explain", "facilitate", "fail", "find",
    "finish", "fix", "forecast", "handle", "help", "hire", "identify", "implement", "improve",
    "increase", "integrate", "invest", "know", "launch", "lead", "learn", "lower", "maintain",
    "manage", "measure", "mentor", "migrate", "monitor", "motivate", "negotiate", "optimize",
    "organize", "plan", "present", "prioritize", "reduce", "refactor", "report", "resolve",
    "review", "run", "save", "scale", "schedule", "ship", "solve", "streamline", "struggle",
    "support", "test", "think", "track", "train", "understand", "use", "write",
];

const CONJUNCTIONS: &[&str] = &[
    "although", "and", "because", "but", "if", "nor", "or", "since", "so", "though",
    "unless", "until", "whereas", "whether", "while", "yet",
];

const TRANSITION_WORDS: &[&str] = &[
    "additionally", "afterwards", "consequently", "finally", "first", "furthermore", "hence",
    "however", "lastly", "meanwhile", "moreover", "next", "second", "subsequently", "then",
    "therefore", "third", "thus", "as a result", "in addition",
];

const STRUCTURE_MARKERS: &[&str] = &[
    "additionally", "finally", "first", "however", "lastly", "next", "second", "then",
    "therefore", "third", "in conclusion", "in summary", "to begin with", "to summarize",
];

const HEDGING_PHRASES: &[&str] = &[
    "hopefully", "i don't know", "i guess", "i suppose", "i think", "idk", "kind of", "maybe",
    "not sure", "perhaps", "possibly", "probably", "sort of", "uncertain",
];

const CONFIDENT_PHRASES: &[&str] = &[
    "i achieved", "i am confident", "i believe", "i built", "i delivered", "i designed",
    "i developed", "i have experience", "i implemented", "i improved", "i know", "i led",
    "i managed", "i reduced", "i resolved", "i successfully", "i'm confident",
];

const EXPERIENCE_PHRASES: &[&str] = &[
    "i have", "i was responsible", "i worked", "i've", "in my experience",
    "in my last role", "in my previous role", "when i", "years of experience",
];

const EXAMPLE_MARKERS: &[&str] = &[
    "a time when", "an example", "as an example", "for example", "for instance",
    "in my experience", "in one case", "one example", "such as", "to illustrate",
];

const COMMUNICATION_KEYWORDS: &[&str] = &[
    "aligned", "clearly", "collaborate", "collaborated", "communicated", "coordinated",
    "discussed", "effectively", "explain", "explained", "listened", "present", "presented",
    "understood",
];

const POSITIVE_WORDS: &[&str] = &[
    "achieved", "analyzed", "built", "collaborated", "delivered", "deployed", "designed",
    "developed", "enhanced", "exceeded", "experience", "implemented", "improved", "increased",
    "led", "managed", "optimized", "reduced", "resolved", "solved", "successful",
    "successfully",
];

const NEGATIVE_WORDS: &[&str] = &[
    "can't", "challenge", "couldn't", "didn't", "difficult", "failed", "issue", "lack",
    "limited", "problem", "struggled", "unable", "wasn't",
];

const IT_TERMS: &[&str] = &[
    "abstraction", "algorithm", "api", "architecture", "cache", "caching", "cloud",
    "database", "debugging", "deployment", "design pattern", "devops", "docker",
    "encapsulation", "framework", "indexing", "inheritance", "kubernetes", "latency",
    "microservice", "microservices", "nosql", "optimization", "performance", "polymorphism",
    "rest", "scalability", "security", "sql", "testing", "version control",
];

const HR_TERMS: &[&str] = &[
    "adaptability", "collaboration", "conflict resolution", "deadline", "feedback",
    "leadership", "mentoring", "onboarding", "priorities", "stakeholder", "teamwork",
    "time management", "work ethic",
];

const FINANCE_TERMS: &[&str] = &[
    "balance sheet", "bloomberg", "bond", "cash flow", "dcf", "derivatives", "equity",
    "excel", "financial modeling", "financial ratios", "forex", "income statement", "irr",
    "liquidity", "npv", "portfolio", "risk management", "roi", "valuation",
];

const MANAGEMENT_TERMS: &[&str] = &[
    "accountability", "budget", "change management", "decision making", "delegation", "kpi",
    "okr", "performance management", "roadmap", "servant leadership", "stakeholders",
    "strategic planning", "strategy", "team management", "transformational",
];

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            stop_words: set(STOP_WORDS),
            common_verbs: set(COMMON_VERBS),
            conjunctions: set(CONJUNCTIONS),
            transition_words: set(TRANSITION_WORDS),
            structure_markers: set(STRUCTURE_MARKERS),
            hedging_phrases: set(HEDGING_PHRASES),
            confident_phrases: set(CONFIDENT_PHRASES),
            experience_phrases: set(EXPERIENCE_PHRASES),
            example_markers: set(EXAMPLE_MARKERS),
            communication_keywords: set(COMMUNICATION_KEYWORDS),
            positive_words: set(POSITIVE_WORDS),
            negative_words: set(NEGATIVE_WORDS),
            domain_terms: BTreeMap::from([
                (Domain::It.to_string(), set(IT_TERMS)),
                (Domain::Hr.to_string(), set(HR_TERMS)),
                (Domain::Finance.to_string(), set(FINANCE_TERMS)),
                (Domain::Management.to_string(), set(MANAGEMENT_TERMS)),
            ]),
        }
    }
}

impl Lexicon {
    /// Parse a lexicon from TOML. Lists missing from the file keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, EvalError> {
        let parsed: Lexicon = toml::from_str(content)
            .map_err(|e| EvalError::Configuration(format!("invalid lexicon: {e}")))?;
        let lexicon = parsed.normalized();
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Load a lexicon file.
    pub fn load(path: &Path) -> Result<Self, EvalError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EvalError::Configuration(format!(
                "failed to read lexicon {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            EvalError::Configuration(msg) => {
                EvalError::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Normalize every entry and drop entries that normalize to nothing.
    pub fn normalized(self) -> Self {
        fn norm(words: BTreeSet<String>) -> BTreeSet<String> {
            words
                .iter()
                .map(|w| normalize_phrase(w))
                .filter(|w| !w.is_empty())
                .collect()
        }
        Self {
            stop_words: norm(self.stop_words),
            common_verbs: norm(self.common_verbs),
            conjunctions: norm(self.conjunctions),
            transition_words: norm(self.transition_words),
            structure_markers: norm(self.structure_markers),
            hedging_phrases: norm(self.hedging_phrases),
            confident_phrases: norm(self.confident_phrases),
            experience_phrases: norm(self.experience_phrases),
            example_markers: norm(self.example_markers),
            communication_keywords: norm(self.communication_keywords),
            positive_words: norm(self.positive_words),
            negative_words: norm(self.negative_words),
            domain_terms: self
                .domain_terms
                .into_iter()
                .map(|(domain, terms)| (domain.trim().to_lowercase(), norm(terms)))
                .collect(),
        }
    }

    /// Every list the backends and extractors rely on must be non-empty.
    pub fn validate(&self) -> Result<(), EvalError> {
        let required = [
            ("stop_words", &self.stop_words),
            ("common_verbs", &self.common_verbs),
            ("conjunctions", &self.conjunctions),
            ("transition_words", &self.transition_words),
            ("structure_markers", &self.structure_markers),
            ("hedging_phrases", &self.hedging_phrases),
            ("confident_phrases", &self.confident_phrases),
            ("experience_phrases", &self.experience_phrases),
            ("example_markers", &self.example_markers),
            ("communication_keywords", &self.communication_keywords),
            ("positive_words", &self.positive_words),
            ("negative_words", &self.negative_words),
        ];
        for (name, list) in required {
            if list.is_empty() {
                return Err(EvalError::Configuration(format!(
                    "lexicon list `{name}` is empty"
                )));
            }
        }
        for name in self.domain_terms.keys() {
            name.parse::<Domain>().map_err(|e| {
                EvalError::Configuration(format!("lexicon domain_terms: {e}"))
            })?;
        }
        Ok(())
    }

    pub fn is_stop_word(&self, lower: &str) -> bool {
        self.stop_words.contains(lower)
    }

    pub fn is_conjunction(&self, lower: &str) -> bool {
        self.conjunctions.contains(lower)
    }

    /// Built-in vocabulary for a domain (empty if none is configured).
    pub fn domain_vocabulary(&self, domain: Domain) -> impl Iterator<Item = &String> {
        self.domain_terms
            .get(domain.to_string().as_str())
            .into_iter()
            .flatten()
    }
}

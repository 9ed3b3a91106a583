//! Core data model types for intereval.
//!
//! These are the value types that flow through an evaluation: the question
//! being answered, the four-dimensional sub-scores and the final result
//! handed back to the caller.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::rules;
use crate::traits::Capability;

/// An interview question, as supplied by the question catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the candidate.
    pub text: String,
    /// Interview domain the question belongs to.
    pub domain: Domain,
    /// How hard the question is.
    pub difficulty: Difficulty,
    /// What kind of question this is.
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Domain-relevant technical terms the answer is expected to use.
    #[serde(default)]
    pub keywords: BTreeSet<String>,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        domain: Domain,
        difficulty: Difficulty,
        question_type: QuestionType,
    ) -> Self {
        Self {
            text: text.into(),
            domain,
            difficulty,
            question_type,
            keywords: BTreeSet::new(),
        }
    }

    /// Attach technical keywords to the question.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Check the evaluation preconditions.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.text.trim().is_empty() {
            return Err(EvalError::MalformedQuestion(
                "question text is empty".into(),
            ));
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(EvalError::MalformedQuestion(
                "question keywords contain an empty entry".into(),
            ));
        }
        Ok(())
    }
}

/// Interview domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    It,
    Hr,
    Finance,
    Management,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::It, Domain::Hr, Domain::Finance, Domain::Management];
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::It => write!(f, "it"),
            Domain::Hr => write!(f, "hr"),
            Domain::Finance => write!(f, "finance"),
            Domain::Management => write!(f, "management"),
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "it" | "it/software engineering" | "software engineering" => Ok(Domain::It),
            "hr" | "hr/human resources" | "human resources" => Ok(Domain::Hr),
            "finance" => Ok(Domain::Finance),
            "management" => Ok(Domain::Management),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}

/// Question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Multiplier applied to the unclamped accuracy sum.
    pub fn accuracy_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => rules::EASY_ACCURACY_MULTIPLIER,
            Difficulty::Medium => rules::MEDIUM_ACCURACY_MULTIPLIER,
            Difficulty::Hard => rules::HARD_ACCURACY_MULTIPLIER,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Technical,
    Behavioral,
    Situational,
    General,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Technical => write!(f, "technical"),
            QuestionType::Behavioral => write!(f, "behavioral"),
            QuestionType::Situational => write!(f, "situational"),
            QuestionType::General => write!(f, "general"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical" => Ok(QuestionType::Technical),
            "behavioral" | "behavioural" => Ok(QuestionType::Behavioral),
            "situational" => Ok(QuestionType::Situational),
            "general" => Ok(QuestionType::General),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// The four scored dimensions, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Clarity,
    Accuracy,
    Communication,
    Confidence,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Clarity,
        Dimension::Accuracy,
        Dimension::Communication,
        Dimension::Confidence,
    ];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Clarity => write!(f, "clarity"),
            Dimension::Accuracy => write!(f, "accuracy"),
            Dimension::Communication => write!(f, "communication"),
            Dimension::Confidence => write!(f, "confidence"),
        }
    }
}

/// Per-dimension scores, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub clarity: f64,
    pub accuracy: f64,
    pub communication: f64,
    pub confidence: f64,
}

impl SubScores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Clarity => self.clarity,
            Dimension::Accuracy => self.accuracy,
            Dimension::Communication => self.communication,
            Dimension::Confidence => self.confidence,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::Clarity => self.clarity = value,
            Dimension::Accuracy => self.accuracy = value,
            Dimension::Communication => self.communication = value,
            Dimension::Confidence => self.confidence = value,
        }
    }

    /// Iterate `(dimension, score)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

/// Qualitative band for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= rules::EXCELLENT_BAND_MIN {
            ScoreBand::Excellent
        } else if score >= rules::GOOD_BAND_MIN {
            ScoreBand::Good
        } else if score >= rules::FAIR_BAND_MIN {
            ScoreBand::Fair
        } else {
            ScoreBand::NeedsImprovement
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Excellent => write!(f, "Excellent"),
            ScoreBand::Good => write!(f, "Good"),
            ScoreBand::Fair => write!(f, "Fair"),
            ScoreBand::NeedsImprovement => write!(f, "Needs improvement"),
        }
    }
}

/// The outcome of evaluating one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub sub_scores: SubScores,
    /// Weighted combination of the sub-scores, rounded to one decimal.
    pub overall_score: f64,
    /// Short templated summary.
    pub feedback_text: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    /// Which analysis backend produced the features. Informational only.
    pub backend: Capability,
}

impl EvaluationResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.overall_score)
    }
}

/// One recorded answer to score, with the question it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCase {
    /// Unique identifier within the answer set.
    pub id: String,
    pub question: Question,
    /// Raw answer text; may be empty.
    pub answer: String,
    /// Tags for filtering.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A named collection of answers scored together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cases: Vec<AnswerCase>,
}

impl AnswerSet {
    /// Keep only cases carrying at least one of `tags`. An empty filter keeps all.
    pub fn filter_by_tags(&mut self, tags: &[String]) {
        if tags.is_empty() {
            return;
        }
        self.cases
            .retain(|case| case.tags.iter().any(|t| tags.contains(t)));
    }
}

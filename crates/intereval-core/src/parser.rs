//! TOML answer set parser.
//!
//! Loads answer sets from TOML files and directories, and validates them.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::lexicon::Lexicon;
use crate::model::{AnswerCase, AnswerSet, Difficulty, Domain, Question, QuestionType};
use crate::text::normalize_phrase;

/// Intermediate TOML structure for parsing answer set files.
#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    answer_set: TomlAnswerSetHeader,
    #[serde(default)]
    cases: Vec<TomlAnswerCase>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswerSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_type() -> String {
    "general".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlAnswerCase {
    id: String,
    question: String,
    domain: String,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(rename = "type", default = "default_type")]
    question_type: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parse a single TOML file into an `AnswerSet`.
pub fn parse_answer_set(path: &Path) -> Result<AnswerSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer set file: {}", path.display()))?;

    parse_answer_set_str(&content, path)
}

/// Parse a TOML string into an `AnswerSet` (useful for testing).
pub fn parse_answer_set_str(content: &str, source_path: &Path) -> Result<AnswerSet> {
    let parsed: TomlAnswerFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let cases = parsed
        .cases
        .into_iter()
        .map(|c| {
            let in_case = |e: String| anyhow::anyhow!("case '{}': {}", c.id, e);
            let domain: Domain = c.domain.parse().map_err(in_case)?;
            let difficulty: Difficulty = c.difficulty.parse().map_err(in_case)?;
            let question_type: QuestionType = c.question_type.parse().map_err(in_case)?;

            Ok(AnswerCase {
                question: Question::new(c.question, domain, difficulty, question_type)
                    .with_keywords(c.keywords),
                id: c.id,
                answer: c.answer,
                tags: c.tags,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AnswerSet {
        id: parsed.answer_set.id,
        name: parsed.answer_set.name,
        description: parsed.answer_set.description,
        cases,
    })
}

/// Recursively load all `.toml` answer set files from a directory.
pub fn load_answer_directory(dir: &Path) -> Result<Vec<AnswerSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sets.extend(load_answer_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_answer_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single file, or every answer set under a directory.
pub fn load_answer_sets(path: &Path) -> Result<Vec<AnswerSet>> {
    if path.is_dir() {
        load_answer_directory(path)
    } else {
        Ok(vec![parse_answer_set(path)?])
    }
}

/// A warning from answer set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The case ID (if applicable).
    pub case_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an answer set for common issues.
pub fn validate_answer_set(set: &AnswerSet, lexicon: &Lexicon) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.cases.is_empty() {
        warnings.push(ValidationWarning {
            case_id: None,
            message: "answer set has no cases".into(),
        });
    }

    // Check for duplicate case IDs
    let mut seen_ids = std::collections::HashSet::new();
    for case in &set.cases {
        if !seen_ids.insert(&case.id) {
            warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: format!("duplicate case ID: {}", case.id),
            });
        }
    }

    for case in &set.cases {
        if let Err(e) = case.question.validate() {
            warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: e.to_string(),
            });
        }
        if case.answer.trim().is_empty() {
            warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: "answer is empty and will receive minimal scores".into(),
            });
        }
    }

    // Keywords outside the domain vocabulary are allowed, but often typos.
    for case in &set.cases {
        let vocabulary: BTreeSet<&String> =
            lexicon.domain_vocabulary(case.question.domain).collect();
        if vocabulary.is_empty() {
            continue;
        }
        for keyword in &case.question.keywords {
            if !vocabulary.contains(&normalize_phrase(keyword)) {
                warnings.push(ValidationWarning {
                    case_id: Some(case.id.clone()),
                    message: format!(
                        "keyword '{keyword}' is not in the {} vocabulary",
                        case.question.domain
                    ),
                });
            }
        }
    }

    warnings
}

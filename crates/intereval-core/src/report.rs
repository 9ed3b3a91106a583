//! Batch report types with JSON persistence and regression detection.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{AnswerSet, Difficulty, Domain, EvaluationResult};
use crate::statistics::BatchSummary;
use crate::traits::Capability;

/// The evaluation of one answer set case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub case_id: String,
    pub domain: Domain,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    pub result: EvaluationResult,
    /// Time spent evaluating, in microseconds.
    pub duration_us: u64,
}

/// A complete batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the answer set.
    pub answer_set: AnswerSetSummary,
    /// Analysis backend the scores were produced with.
    pub backend: Capability,
    /// Per-case results, in answer set order.
    pub results: Vec<CaseResult>,
    /// Aggregate statistics.
    pub summary: BatchSummary,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of an answer set (without the answers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSetSummary {
    pub id: String,
    pub name: String,
    pub case_count: usize,
}

impl From<&AnswerSet> for AnswerSetSummary {
    fn from(set: &AnswerSet) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            case_count: set.cases.len(),
        }
    }
}

impl BatchReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: BatchReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline. Overall scores moving by more
    /// than `threshold` points count as regressions or improvements.
    pub fn compare(&self, baseline: &BatchReport, threshold: f64) -> RegressionReport {
        let score_map = |report: &BatchReport| -> BTreeMap<String, f64> {
            report
                .results
                .iter()
                .map(|r| (r.case_id.clone(), r.result.overall_score))
                .collect()
        };

        let baseline_scores = score_map(baseline);
        let current_scores = score_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_cases = 0usize;

        for (case_id, &current) in &current_scores {
            let Some(&baseline_score) = baseline_scores.get(case_id) else {
                new_cases += 1;
                continue;
            };
            let delta = current - baseline_score;
            let change = ScoreChange {
                case_id: case_id.clone(),
                baseline_score,
                current_score: current,
                delta,
            };
            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_cases = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(*k))
            .count();

        if baseline.backend != self.backend {
            tracing::warn!(
                "comparing reports from different backends: {} vs {}",
                baseline.backend,
                self.backend
            );
        }

        RegressionReport {
            regressions,
            improvements,
            unchanged,
            new_cases,
            removed_cases,
            mean_delta: self.summary.mean_overall - baseline.summary.mean_overall,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Cases where the overall score went down.
    pub regressions: Vec<ScoreChange>,
    /// Cases where the overall score went up.
    pub improvements: Vec<ScoreChange>,
    /// Cases with no significant change.
    pub unchanged: usize,
    /// Cases in current but not baseline.
    pub new_cases: usize,
    /// Cases in baseline but not current.
    pub removed_cases: usize,
    /// Change of the mean overall score.
    pub mean_delta: f64,
}

/// An overall score that moved between two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub case_id: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

impl RegressionReport {
    /// Format the regression report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged, mean {:+.1}\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged,
            self.mean_delta
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Case | Baseline | Current | Delta |\n");
            md.push_str("|------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.1} | {:.1} | {:+.1} |\n",
                    c.case_id, c.baseline_score, c.current_score, c.delta
                ));
            }
            md.push('\n');
        }

        if self.new_cases > 0 || self.removed_cases > 0 {
            md.push_str(&format!(
                "{} new cases, {} removed cases\n",
                self.new_cases, self.removed_cases
            ));
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

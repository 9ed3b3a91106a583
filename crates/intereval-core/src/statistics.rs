//! Aggregate statistics over a batch of evaluations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Dimension, Domain, ScoreBand, SubScores};
use crate::report::CaseResult;
use crate::rules;

/// Summary statistics across all evaluated cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of evaluated cases.
    pub case_count: usize,
    /// Mean of each sub-score.
    pub mean_sub_scores: SubScores,
    /// Mean overall score.
    pub mean_overall: f64,
    /// Population standard deviation of the overall score.
    pub std_dev_overall: f64,
    pub min_overall: f64,
    pub max_overall: f64,
    /// Number of cases per score band.
    pub band_counts: BTreeMap<ScoreBand, usize>,
    /// Mean overall score per domain.
    pub per_domain: BTreeMap<Domain, DomainStats>,
}

/// Statistics for the cases of one domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainStats {
    pub case_count: usize,
    pub mean_overall: f64,
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Compute summary statistics from case results.
pub fn compute_batch_summary(results: &[CaseResult]) -> BatchSummary {
    let overall: Vec<f64> = results.iter().map(|r| r.result.overall_score).collect();

    let mut mean_sub_scores = SubScores::default();
    for dimension in Dimension::ALL {
        let values: Vec<f64> = results
            .iter()
            .map(|r| r.result.sub_scores.get(dimension))
            .collect();
        mean_sub_scores.set(
            dimension,
            rules::round_to(mean(&values), rules::SUB_SCORE_DECIMALS),
        );
    }

    let mut band_counts = BTreeMap::new();
    for r in results {
        *band_counts.entry(r.result.band()).or_insert(0) += 1;
    }

    let mut by_domain: BTreeMap<Domain, Vec<f64>> = BTreeMap::new();
    for r in results {
        by_domain
            .entry(r.domain)
            .or_default()
            .push(r.result.overall_score);
    }
    let per_domain = by_domain
        .into_iter()
        .map(|(domain, scores)| {
            (
                domain,
                DomainStats {
                    case_count: scores.len(),
                    mean_overall: rules::round_to(mean(&scores), rules::OVERALL_DECIMALS),
                },
            )
        })
        .collect();

    BatchSummary {
        case_count: results.len(),
        mean_sub_scores,
        mean_overall: rules::round_to(mean(&overall), rules::OVERALL_DECIMALS),
        std_dev_overall: rules::round_to(std_dev(&overall), rules::SUB_SCORE_DECIMALS),
        min_overall: overall.iter().copied().reduce(f64::min).unwrap_or(0.0),
        max_overall: overall.iter().copied().reduce(f64::max).unwrap_or(0.0),
        band_counts,
        per_domain,
    }
}

//! End-to-end pipeline tests over the bundled answer sets.
//!
//! These run the batch pipeline (parse → select backend → evaluate → summarize)
//! on every available backend tier and check that recorded answers land where
//! a reviewer would put them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use intereval_core::batch::{run_batch, NoopReporter};
use intereval_core::model::{AnswerSet, ScoreBand};
use intereval_core::parser::{load_answer_sets, parse_answer_set, validate_answer_set};
use intereval_core::report::BatchReport;
use intereval_core::traits::Capability;
use intereval_nlp::config::{build_engine, load_lexicon, BackendPreference, InterevalConfig};

fn answer_sets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../answer-sets")
}

fn config(backend: BackendPreference) -> InterevalConfig {
    InterevalConfig {
        backend,
        ..Default::default()
    }
}

async fn run(backend: BackendPreference, set: &AnswerSet) -> BatchReport {
    let engine = Arc::new(build_engine(&config(backend)).unwrap());
    run_batch(engine, set, 2, &NoopReporter).await.unwrap()
}

fn mean_for_tag(report: &BatchReport, tag: &str) -> f64 {
    let scores: Vec<f64> = report
        .results
        .iter()
        .filter(|r| r.tags.iter().any(|t| t == tag))
        .map(|r| r.result.overall_score)
        .collect();
    assert!(!scores.is_empty(), "no cases tagged {tag}");
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[test]
fn bundled_answer_sets_are_valid() {
    let lexicon = load_lexicon(&InterevalConfig::default()).unwrap();
    let sets = load_answer_sets(&answer_sets_dir()).unwrap();
    assert_eq!(sets.len(), 3);
    for set in &sets {
        let warnings = validate_answer_set(set, &lexicon);
        assert!(warnings.is_empty(), "{}: {warnings:?}", set.id);
    }
}

#[tokio::test]
async fn e2e_basic_backend_scores_rest_answer() {
    let set = parse_answer_set(&answer_sets_dir().join("software-engineering.toml")).unwrap();
    let report = run(BackendPreference::Basic, &set).await;

    assert_eq!(report.backend, Capability::Basic);
    assert_eq!(report.results.len(), 5);
    assert_eq!(report.summary.case_count, 5);

    let rest = &report.results[0];
    assert_eq!(rest.case_id, "rest_api_caching");
    assert_eq!(rest.result.overall_score, 75.7);
    assert_eq!(rest.result.band(), ScoreBand::Good);
    assert_eq!(rest.result.sub_scores.clarity, 100.0);
    assert_eq!(rest.result.sub_scores.accuracy, 71.55);
    assert_eq!(rest.result.sub_scores.communication, 61.0);
    assert_eq!(rest.result.sub_scores.confidence, 70.0);

    let unsure = &report.results[1];
    assert_eq!(unsure.case_id, "rest_api_unsure");
    assert_eq!(unsure.result.band(), ScoreBand::NeedsImprovement);
}

#[tokio::test]
async fn e2e_strong_answers_outscore_weak_ones_on_every_backend() {
    let sets = load_answer_sets(&answer_sets_dir()).unwrap();
    for backend in [BackendPreference::Basic, BackendPreference::Auto] {
        for set in &sets {
            let report = run(backend, set).await;
            let strong = mean_for_tag(&report, "strong");
            let weak = mean_for_tag(&report, "weak");
            assert!(
                strong > weak,
                "{} on {backend:?}: strong {strong:.1} <= weak {weak:.1}",
                set.id
            );
        }
    }
}

#[tokio::test]
async fn e2e_auto_backend_is_enriched() {
    let set = parse_answer_set(&answer_sets_dir().join("behavioral.toml")).unwrap();
    let report = run(BackendPreference::Auto, &set).await;

    assert_eq!(report.backend, Capability::Tagged);
    assert_eq!(report.results.len(), 4);
    for case in &report.results {
        assert_eq!(case.result.backend, Capability::Tagged);
        for (_, score) in case.result.sub_scores.iter() {
            assert!((0.0..=100.0).contains(&score));
        }
        assert!((0.0..=100.0).contains(&case.result.overall_score));
        assert!(!case.result.feedback_text.is_empty());
    }
}

#[tokio::test]
async fn e2e_batch_is_deterministic() {
    let set = parse_answer_set(&answer_sets_dir().join("finance.toml")).unwrap();
    let first = run(BackendPreference::Auto, &set).await;
    let second = run(BackendPreference::Auto, &set).await;

    let scores = |report: &BatchReport| -> Vec<f64> {
        report.results.iter().map(|r| r.result.overall_score).collect()
    };
    assert_eq!(scores(&first), scores(&second));
    assert_eq!(first.summary, second.summary);
}

#[tokio::test]
async fn e2e_filtered_batch_keeps_case_order() {
    let mut set = parse_answer_set(&answer_sets_dir().join("software-engineering.toml")).unwrap();
    set.filter_by_tags(&["technical".to_string()]);
    let report = run(BackendPreference::Basic, &set).await;

    let ids: Vec<&str> = report.results.iter().map(|r| r.case_id.as_str()).collect();
    let expected: Vec<&str> = set.cases.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, expected);
    assert_eq!(report.answer_set.case_count, set.cases.len());
}

#[tokio::test]
async fn e2e_report_round_trips_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let set = parse_answer_set(&answer_sets_dir().join("finance.toml")).unwrap();
    let report = run(BackendPreference::Basic, &set).await;

    let path = dir.path().join("nested").join("report.json");
    report.save_json(&path).unwrap();
    let loaded = BatchReport::load_json(&path).unwrap();

    assert_eq!(loaded.id, report.id);
    assert_eq!(loaded.backend, Capability::Basic);
    assert_eq!(loaded.answer_set.id, "finance");
    assert_eq!(loaded.summary.case_count, 3);
    assert_eq!(loaded.results.len(), report.results.len());
}

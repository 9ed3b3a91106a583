//! Batch runner.
//!
//! Scores every case of an answer set with bounded parallelism. Evaluation
//! is CPU-bound, so each case runs on tokio's blocking pool; a semaphore
//! caps how many run at once.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::engine::EvaluationEngine;
use crate::model::AnswerSet;
use crate::report::{AnswerSetSummary, BatchReport, CaseResult};
use crate::statistics::compute_batch_summary;

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_case_start(&self, case_id: &str);
    fn on_case_complete(&self, result: &CaseResult);
    fn on_case_error(&self, case_id: &str, error: &str);
    fn on_set_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_case_start(&self, _: &str) {}
    fn on_case_complete(&self, _: &CaseResult) {}
    fn on_case_error(&self, _: &str, _: &str) {}
    fn on_set_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// Evaluate every case in `set`.
///
/// Cases whose question is malformed are reported through `progress` and
/// left out of the report. Results keep the answer set's case order.
pub async fn run_batch(
    engine: Arc<EvaluationEngine>,
    set: &AnswerSet,
    parallelism: usize,
    progress: &dyn ProgressReporter,
) -> Result<BatchReport> {
    let start = Instant::now();
    let semaphore = Arc::new(Semaphore::new(parallelism.max(1)));

    let mut futures = FuturesUnordered::new();

    for (index, case) in set.cases.iter().enumerate() {
        let engine = Arc::clone(&engine);
        let semaphore = Arc::clone(&semaphore);
        let case = case.clone();
        progress.on_case_start(&case.id);

        futures.push(async move {
            let case_id = case.id.clone();
            let inner = async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| anyhow::anyhow!("semaphore closed"))?;

                tokio::task::spawn_blocking(move || {
                    let case_start = Instant::now();
                    let result = engine.evaluate(&case.question, &case.answer)?;
                    Ok::<_, anyhow::Error>(CaseResult {
                        case_id: case.id,
                        domain: case.question.domain,
                        difficulty: case.question.difficulty,
                        tags: case.tags,
                        result,
                        duration_us: case_start.elapsed().as_micros() as u64,
                    })
                })
                .await?
            };
            (index, case_id, inner.await)
        });
    }

    let mut results = Vec::new();
    let mut completed = 0usize;
    let mut failed = 0usize;
    let total = futures.len();

    while let Some((index, case_id, result)) = futures.next().await {
        match result {
            Ok(case_result) => {
                progress.on_case_complete(&case_result);
                results.push((index, case_result));
                completed += 1;
            }
            Err(e) => {
                tracing::error!("evaluation failed for {case_id}: {e:#}");
                progress.on_case_error(&case_id, &e.to_string());
                failed += 1;
            }
        }
    }

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<CaseResult> = results.into_iter().map(|(_, r)| r).collect();

    let elapsed = start.elapsed();
    progress.on_set_complete(total, completed, failed, elapsed);

    Ok(BatchReport {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        answer_set: AnswerSetSummary::from(set),
        backend: engine.capability(),
        summary: compute_batch_summary(&results),
        results,
        duration_ms: elapsed.as_millis() as u64,
    })
}

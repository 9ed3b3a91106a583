//! The `intereval batch` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Table};

use intereval_core::batch::{run_batch, ProgressReporter};
use intereval_core::parser;
use intereval_core::report::{BatchReport, CaseResult};
use intereval_nlp::config::{build_engine, load_config_from};

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_case_start(&self, case_id: &str) {
        eprintln!("  Starting: {case_id}");
    }

    fn on_case_complete(&self, result: &CaseResult) {
        eprintln!(
            "  Done: {} overall {:.1} ({}) ({}us)",
            result.case_id,
            result.result.overall_score,
            result.result.band(),
            result.duration_us,
        );
    }

    fn on_case_error(&self, case_id: &str, error: &str) {
        eprintln!("  ERROR: {case_id}: {error}");
    }

    fn on_set_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {completed}/{total} scored, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    answer_set_path: PathBuf,
    parallelism: Option<usize>,
    output: Option<PathBuf>,
    format: String,
    filter: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let parallelism = parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let formats: Vec<&str> = match format.as_str() {
        "all" => vec!["json", "table"],
        other => other.split(',').map(str::trim).collect(),
    };
    if let Some(unknown) = formats.iter().find(|f| !matches!(**f, "json" | "table")) {
        anyhow::bail!("unknown format '{unknown}', expected json, table or all");
    }

    let mut answer_sets = parser::load_answer_sets(&answer_set_path)?;
    anyhow::ensure!(
        !answer_sets.is_empty(),
        "no answer sets found at {}",
        answer_set_path.display()
    );

    if let Some(filter_tags) = &filter {
        let tags: Vec<String> = filter_tags
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for set in &mut answer_sets {
            set.filter_by_tags(&tags);
        }
    }

    let engine = Arc::new(build_engine(&config)?);
    let reporter = ConsoleReporter;

    for answer_set in &answer_sets {
        eprintln!(
            "intereval v{}: scoring {} cases of '{}' on the {} backend",
            env!("CARGO_PKG_VERSION"),
            answer_set.cases.len(),
            answer_set.name,
            engine.capability()
        );
        eprintln!();

        let report = run_batch(Arc::clone(&engine), answer_set, parallelism, &reporter).await?;

        if formats.contains(&"table") {
            print_results(&report);
        }
        print_summary(&report);

        if formats.contains(&"json") {
            let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
            let path = output.join(format!("report-{}-{timestamp}.json", answer_set.id));
            report.save_json(&path)?;
            eprintln!("Results saved to: {}", path.display());
        }
    }

    Ok(())
}

fn print_results(report: &BatchReport) {
    let mut table = Table::new();
    table.set_header(vec![
        "Case",
        "Domain",
        "Difficulty",
        "Clarity",
        "Accuracy",
        "Communication",
        "Confidence",
        "Overall",
        "Band",
    ]);

    for case in &report.results {
        let s = &case.result.sub_scores;
        table.add_row(vec![
            Cell::new(&case.case_id),
            Cell::new(case.domain),
            Cell::new(case.difficulty),
            Cell::new(format!("{:.2}", s.clarity)),
            Cell::new(format!("{:.2}", s.accuracy)),
            Cell::new(format!("{:.2}", s.communication)),
            Cell::new(format!("{:.2}", s.confidence)),
            Cell::new(format!("{:.1}", case.result.overall_score)),
            Cell::new(case.result.band()),
        ]);
    }

    println!("{table}");
}

fn print_summary(report: &BatchReport) {
    let summary = &report.summary;
    let mut table = Table::new();
    table.set_header(vec!["Cases", "Mean", "Std dev", "Min", "Max"]);
    table.add_row(vec![
        Cell::new(summary.case_count),
        Cell::new(format!("{:.1}", summary.mean_overall)),
        Cell::new(format!("{:.1}", summary.std_dev_overall)),
        Cell::new(format!("{:.1}", summary.min_overall)),
        Cell::new(format!("{:.1}", summary.max_overall)),
    ]);
    eprintln!("\n{table}");

    let bands: Vec<String> = summary
        .band_counts
        .iter()
        .map(|(band, count)| format!("{band}: {count}"))
        .collect();
    if !bands.is_empty() {
        eprintln!("Bands: {}", bands.join(", "));
    }
}

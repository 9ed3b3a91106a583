//! The `intereval compare` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use intereval_core::model::Dimension;
use intereval_core::report::{BatchReport, RegressionReport, ScoreChange};

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: f64,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = BatchReport::load_json(&baseline_path)?;
    let current = BatchReport::load_json(&current_path)?;
    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text(&baseline, &current, &report),
        other => anyhow::bail!("unknown format '{other}', expected text, json or markdown"),
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_text(baseline: &BatchReport, current: &BatchReport, report: &RegressionReport) {
    if baseline.backend != current.backend {
        println!(
            "Note: baseline scored with {}, current with {}",
            baseline.backend, current.backend
        );
    }

    println!(
        "Comparison: {} regressions, {} improvements, {} unchanged (mean {:+.1})",
        report.regressions.len(),
        report.improvements.len(),
        report.unchanged,
        report.mean_delta
    );

    print_changes("Regressions", &report.regressions);
    print_changes("Improvements", &report.improvements);

    let (old, new) = (
        &baseline.summary.mean_sub_scores,
        &current.summary.mean_sub_scores,
    );
    let mut table = Table::new();
    table.set_header(vec!["Dimension", "Baseline", "Current", "Delta"]);
    for dimension in Dimension::ALL {
        let (b, c) = (old.get(dimension), new.get(dimension));
        table.add_row(vec![
            Cell::new(dimension),
            Cell::new(format!("{b:.1}")),
            Cell::new(format!("{c:.1}")),
            Cell::new(format!("{:+.1}", c - b)),
        ]);
    }
    println!("\n{table}");

    if report.new_cases > 0 || report.removed_cases > 0 {
        println!(
            "\n{} new case(s), {} removed case(s)",
            report.new_cases, report.removed_cases
        );
    }
}

fn print_changes(title: &str, changes: &[ScoreChange]) {
    if changes.is_empty() {
        return;
    }
    println!("\n{title}:");
    for c in changes {
        println!(
            "  {} {:.1} -> {:.1} ({:+.1})",
            c.case_id, c.baseline_score, c.current_score, c.delta
        );
    }
}

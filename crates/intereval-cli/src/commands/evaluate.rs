//! The `intereval evaluate` command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use intereval_core::model::{Difficulty, Domain, EvaluationResult, Question, QuestionType};
use intereval_nlp::config::{build_engine, load_config_from};

pub struct EvaluateArgs {
    pub question: String,
    pub answer: String,
    pub domain: Domain,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub keywords: Option<String>,
    pub format: String,
    pub config: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let engine = build_engine(&config)?;

    let answer = if args.answer == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read answer from stdin")?;
        buf
    } else {
        args.answer
    };

    let keywords: Vec<String> = args
        .keywords
        .as_deref()
        .map(|k| {
            k.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let question = Question::new(args.question, args.domain, args.difficulty, args.question_type)
        .with_keywords(keywords);

    let result = engine.evaluate(&question, &answer)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_result(&result),
    }

    Ok(())
}

fn print_result(result: &EvaluationResult) {
    println!(
        "Overall: {:.1}/100 ({})",
        result.overall_score,
        result.band()
    );
    println!("Backend: {}", result.backend);

    let mut table = Table::new();
    table.set_header(vec!["Dimension", "Score"]);
    for (dimension, score) in result.sub_scores.iter() {
        table.add_row(vec![
            Cell::new(dimension.to_string()),
            Cell::new(format!("{score:.2}")),
        ]);
    }
    println!("\n{table}");

    println!("\n{}", result.feedback_text);
    if !result.strengths.is_empty() {
        println!("\nStrengths:");
        for s in &result.strengths {
            println!("  + {s}");
        }
    }
    if !result.improvements.is_empty() {
        println!("\nImprovements:");
        for i in &result.improvements {
            println!("  - {i}");
        }
    }
}

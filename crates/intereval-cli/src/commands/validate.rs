//! The `intereval validate` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;

use intereval_core::model::AnswerSet;
use intereval_core::parser::{load_answer_sets, validate_answer_set};
use intereval_nlp::config::{load_config_from, load_lexicon};

pub fn execute(answer_set_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let sets = load_answer_sets(&answer_set_path)?;
    // Keyword checks run against the configured lexicon, not only the built-in one.
    let lexicon = load_lexicon(&load_config_from(config_path.as_deref())?)?;

    let mut warning_count = 0;
    for set in &sets {
        println!("Answer set: {} ({} cases)", set.name, set.cases.len());
        if !set.cases.is_empty() {
            println!("  domains: {}", domain_breakdown(set));
        }

        for warning in validate_answer_set(set, &lexicon) {
            match &warning.case_id {
                Some(id) => println!("  [{id}] WARNING: {}", warning.message),
                None => println!("  WARNING: {}", warning.message),
            }
            warning_count += 1;
        }
    }

    if warning_count == 0 {
        println!("All answer sets valid.");
    } else {
        println!("\n{warning_count} warning(s) found.");
    }

    Ok(())
}

fn domain_breakdown(set: &AnswerSet) -> String {
    let mut counts = BTreeMap::new();
    for case in &set.cases {
        *counts.entry(case.question.domain).or_insert(0usize) += 1;
    }
    counts
        .iter()
        .map(|(domain, n)| format!("{domain} {n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

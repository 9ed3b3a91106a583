//! The `intereval backend` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use intereval_nlp::config::{build_engine, load_config_from, BackendPreference};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let engine = build_engine(&config)?;

    let requested = match config.backend {
        BackendPreference::Auto => "auto",
        BackendPreference::Basic => "basic",
    };
    println!("Requested: {requested}");
    println!("Active: {}", engine.capability());
    println!(
        "Enriched backend available: {}",
        if engine.is_enriched_backend_available() {
            "yes"
        } else {
            "no"
        }
    );
    if let Some(path) = &config.vectors_path {
        println!("Word vectors: {}", path.display());
    }
    if let Some(path) = &config.lexicon_path {
        println!("Lexicon: {}", path.display());
    }

    let weights = engine.weights();
    let mut table = Table::new();
    table.set_header(vec!["Dimension", "Weight"]);
    for (name, weight) in [
        ("clarity", weights.clarity),
        ("accuracy", weights.accuracy),
        ("communication", weights.communication),
        ("confidence", weights.confidence),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(format!("{weight:.2}"))]);
    }
    println!("\n{table}");

    Ok(())
}

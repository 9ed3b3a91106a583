//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const REST_QUESTION: &str =
    "Describe a REST API you implemented and deployed, focusing on performance optimization.";
const REST_ANSWER: &str = "I implemented a REST API using Python and deployed it on AWS. \
                           For example, I reduced latency by 40% through caching.";

/// A command isolated from the user's config files and environment.
fn intereval(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("intereval").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("INTEREVAL_BACKEND")
        .env_remove("INTEREVAL_VECTORS");
    cmd
}

fn answer_sets() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../answer-sets")
}

fn basic_config(dir: &Path) -> PathBuf {
    let path = dir.join("basic.toml");
    std::fs::write(&path, "backend = \"basic\"\n").unwrap();
    path
}

fn evaluate_rest(dir: &Path) -> Command {
    let mut cmd = intereval(dir);
    cmd.args(["evaluate", "--question", REST_QUESTION, "--answer", REST_ANSWER])
        .args(["--difficulty", "hard", "--type", "technical", "--keywords", "API"]);
    cmd
}

#[test]
fn validate_answer_set() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("validate")
        .arg("--answer-set")
        .arg(answer_sets().join("software-engineering.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("5 cases"))
        .stdout(predicate::str::contains("domains: it 5"))
        .stdout(predicate::str::contains("All answer sets valid"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("validate")
        .arg("--answer-set")
        .arg(answer_sets())
        .assert()
        .success()
        .stdout(predicate::str::contains("Software Engineering"))
        .stdout(predicate::str::contains("Behavioral Interviews"))
        .stdout(predicate::str::contains("Finance"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("set.toml");
    std::fs::write(
        &path,
        r#"
[answer_set]
id = "w"
name = "Warnings"

[[cases]]
id = "a"
question = "What is caching?"
domain = "it"
keywords = ["caching", "quantum"]
answer = ""

[[cases]]
id = "a"
question = "What is an index?"
domain = "it"
answer = "An index speeds up lookups."
"#,
    )
    .unwrap();

    intereval(dir.path())
        .arg("validate")
        .arg("--answer-set")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate case ID: a"))
        .stdout(predicate::str::contains("answer is empty"))
        .stdout(predicate::str::contains("keyword 'quantum'"))
        .stdout(predicate::str::contains("3 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("validate")
        .arg("--answer-set")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn evaluate_text_output() {
    let dir = TempDir::new().unwrap();
    let config = basic_config(dir.path());
    evaluate_rest(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 75.7/100 (Good)"))
        .stdout(predicate::str::contains("Backend: basic (lexical fallback)"))
        .stdout(predicate::str::contains("concrete example"));
}

#[test]
fn evaluate_json_output() {
    let dir = TempDir::new().unwrap();
    let config = basic_config(dir.path());
    let output = evaluate_rest(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["overall_score"], 75.7);
    assert_eq!(json["sub_scores"]["accuracy"], 71.55);
    assert_eq!(json["sub_scores"]["clarity"], 100.0);
    assert_eq!(json["backend"], "basic");
}

#[test]
fn evaluate_uses_enriched_backend_by_default() {
    let dir = TempDir::new().unwrap();
    evaluate_rest(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend: enriched (tagger only)"));
}

#[test]
fn evaluate_reads_answer_from_stdin() {
    let dir = TempDir::new().unwrap();
    let config = basic_config(dir.path());
    intereval(dir.path())
        .args(["evaluate", "--question", REST_QUESTION, "--answer", "-"])
        .arg("--config")
        .arg(&config)
        .write_stdin("maybe idk")
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall: 32.5/100 (Needs improvement)"))
        .stdout(predicate::str::contains("too short"));
}

#[test]
fn evaluate_rejects_empty_question() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .args(["evaluate", "--question", "   ", "--answer", "Some answer."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed question"));
}

#[test]
fn evaluate_rejects_unknown_domain() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .args(["evaluate", "--question", "Q?", "--answer", "A.", "--domain", "law"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown domain"));
}

#[test]
fn invalid_weights_fail_at_startup() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[weights]\naccuracy = 0.9\n").unwrap();
    evaluate_rest(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("score weights must sum to 1.0"));
}

#[test]
fn backend_command() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("backend")
        .assert()
        .success()
        .stdout(predicate::str::contains("Active: enriched (tagger only)"))
        .stdout(predicate::str::contains("Enriched backend available: yes"));

    let config = basic_config(dir.path());
    intereval(dir.path())
        .arg("backend")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Requested: basic"))
        .stdout(predicate::str::contains("Enriched backend available: no"));
}

#[test]
fn backend_env_override() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("backend")
        .env("INTEREVAL_BACKEND", "basic")
        .assert()
        .success()
        .stdout(predicate::str::contains("Active: basic (lexical fallback)"));
}

#[test]
fn backend_with_missing_vectors_degrades() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("backend")
        .env("INTEREVAL_VECTORS", "/nonexistent/glove.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Active: enriched (tagger only)"));
}

#[test]
fn batch_writes_report() {
    let dir = TempDir::new().unwrap();
    let config = basic_config(dir.path());
    let output = dir.path().join("results");

    intereval(dir.path())
        .arg("batch")
        .arg("--answer-set")
        .arg(answer_sets().join("software-engineering.toml"))
        .arg("--output")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("rest_api_caching"))
        .stdout(predicate::str::contains("75.7"))
        .stderr(predicate::str::contains("Results saved to"));

    let reports: Vec<_> = std::fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(reports.len(), 1);
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&reports[0]).unwrap()).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 5);
    assert_eq!(json["backend"], "basic");
    assert_eq!(json["summary"]["case_count"], 5);
}

#[test]
fn batch_filter_by_tag() {
    let dir = TempDir::new().unwrap();
    let config = basic_config(dir.path());
    let output = dir.path().join("results");

    intereval(dir.path())
        .arg("batch")
        .arg("--answer-set")
        .arg(answer_sets().join("software-engineering.toml"))
        .args(["--filter", "weak", "--format", "json"])
        .arg("--output")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let report = std::fs::read_dir(&output).unwrap().next().unwrap().unwrap().path();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(report).unwrap()).unwrap();
    let ids: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["case_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["rest_api_unsure", "testing_strategy"]);
}

#[test]
fn batch_table_only_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = basic_config(dir.path());
    let output = dir.path().join("results");

    intereval(dir.path())
        .arg("batch")
        .arg("--answer-set")
        .arg(answer_sets().join("finance.toml"))
        .args(["--format", "table"])
        .arg("--output")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("investment_appraisal"));
    assert!(!output.exists());
}

#[test]
fn batch_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("batch")
        .arg("--answer-set")
        .arg(answer_sets())
        .args(["--format", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'html'"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    intereval(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created intereval.toml"))
        .stdout(predicate::str::contains("Created answer-sets/example.toml"));

    assert!(dir.path().join("intereval.toml").exists());
    assert!(dir.path().join("answer-sets/example.toml").exists());

    intereval(dir.path())
        .args(["validate", "--answer-set", "answer-sets/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 cases"))
        .stdout(predicate::str::contains("All answer sets valid"));

    intereval(dir.path())
        .arg("backend")
        .assert()
        .success()
        .stdout(predicate::str::contains("Requested: auto"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    intereval(dir.path()).arg("init").assert().success();

    intereval(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn compare_reports() {
    let dir = TempDir::new().unwrap();
    let config = basic_config(dir.path());
    let baseline_dir = dir.path().join("baseline");

    intereval(dir.path())
        .arg("batch")
        .arg("--answer-set")
        .arg(answer_sets().join("software-engineering.toml"))
        .args(["--format", "json"])
        .arg("--output")
        .arg(&baseline_dir)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let baseline_path = std::fs::read_dir(&baseline_dir)
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();

    // Pretend the strong answer used to score higher.
    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&baseline_path).unwrap()).unwrap();
    json["results"][0]["result"]["overall_score"] = serde_json::json!(90.0);
    let inflated_path = dir.path().join("inflated.json");
    std::fs::write(&inflated_path, serde_json::to_string(&json).unwrap()).unwrap();

    intereval(dir.path())
        .arg("compare")
        .arg("--baseline")
        .arg(&inflated_path)
        .arg("--current")
        .arg(&baseline_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 regressions"))
        .stdout(predicate::str::contains("rest_api_caching 90.0 -> 75.7 (-14.3)"));

    intereval(dir.path())
        .arg("compare")
        .arg("--baseline")
        .arg(&inflated_path)
        .arg("--current")
        .arg(&baseline_path)
        .args(["--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| rest_api_caching | 90.0 | 75.7 | -14.3 |"));

    intereval(dir.path())
        .arg("compare")
        .arg("--baseline")
        .arg(&inflated_path)
        .arg("--current")
        .arg(&baseline_path)
        .arg("--fail-on-regression")
        .assert()
        .code(1);

    intereval(dir.path())
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&baseline_path)
        .arg("--fail-on-regression")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 regressions"))
        .stdout(predicate::str::contains("communication"));

    intereval(dir.path())
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline_path)
        .arg("--current")
        .arg(&baseline_path)
        .args(["--format", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'html'"));
}

#[test]
fn compare_nonexistent_report() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("compare")
        .arg("--baseline")
        .arg("no_such_file.json")
        .arg("--current")
        .arg("also_no_file.json")
        .assert()
        .failure();
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interview answer evaluation engine"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    intereval(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("intereval"));
}

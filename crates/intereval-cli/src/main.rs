//! intereval CLI: score interview answers from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use intereval_core::model::{Difficulty, Domain, QuestionType};

mod commands;

#[derive(Parser)]
#[command(name = "intereval", version, about = "Interview answer evaluation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single answer
    Evaluate {
        /// Question text
        #[arg(long)]
        question: String,

        /// Answer text ("-" reads from stdin)
        #[arg(long)]
        answer: String,

        /// Interview domain: it, hr, finance, management
        #[arg(long, default_value = "it")]
        domain: Domain,

        /// Question difficulty: easy, medium, hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// Question type: technical, behavioral, situational, general
        #[arg(long = "type", default_value = "general")]
        question_type: QuestionType,

        /// Expected technical keywords (comma-separated)
        #[arg(long)]
        keywords: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score every case of an answer set
    Batch {
        /// Path to .toml answer set or directory
        #[arg(long)]
        answer_set: PathBuf,

        /// Max concurrent evaluations (default from config)
        #[arg(long)]
        parallelism: Option<usize>,

        /// Output directory (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, table, all
        #[arg(long, default_value = "all")]
        format: String,

        /// Filter by tags
        #[arg(long)]
        filter: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate answer set TOML files
    Validate {
        /// Path to answer set file or directory
        #[arg(long)]
        answer_set: PathBuf,

        /// Config file path (for a custom lexicon)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two batch reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Regression threshold in overall-score points
        #[arg(long, default_value = "1.0")]
        threshold: f64,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show which analysis backend is active
    Backend {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example answer set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "intereval=info"
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            question,
            answer,
            domain,
            difficulty,
            question_type,
            keywords,
            format,
            config,
        } => commands::evaluate::execute(commands::evaluate::EvaluateArgs {
            question,
            answer,
            domain,
            difficulty,
            question_type,
            keywords,
            format,
            config,
        }),
        Commands::Batch {
            answer_set,
            parallelism,
            output,
            format,
            filter,
            config,
        } => {
            commands::batch::execute(answer_set, parallelism, output, format, filter, config)
                .await
        }
        Commands::Validate { answer_set, config } => {
            commands::validate::execute(answer_set, config)
        }
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Backend { config } => commands::backend::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

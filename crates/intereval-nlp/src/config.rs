//! Configuration, backend selection and engine construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use intereval_core::engine::EvaluationEngine;
use intereval_core::error::EvalError;
use intereval_core::lexical::LexicalBackend;
use intereval_core::lexicon::Lexicon;
use intereval_core::rules::ScoreWeights;
use intereval_core::traits::LinguisticBackend;

use crate::enriched::EnrichedBackend;
use crate::vectors::WordVectors;

/// Which analysis backend to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// The enriched backend, falling back as far as needed.
    #[default]
    Auto,
    /// Always the lexical fallback.
    Basic,
}

impl std::str::FromStr for BackendPreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "enriched" => Ok(Self::Auto),
            "basic" => Ok(Self::Basic),
            other => anyhow::bail!("unknown backend '{other}', expected 'auto' or 'basic'"),
        }
    }
}

/// Top-level intereval configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterevalConfig {
    #[serde(default)]
    pub backend: BackendPreference,
    /// Word-vector file for semantic similarity.
    #[serde(default)]
    pub vectors_path: Option<PathBuf>,
    /// Lexicon overrides; built-in lists are used when unset.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
    #[serde(default)]
    pub weights: ScoreWeights,
    /// Max concurrent case evaluations in batch runs.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for batch reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./intereval-results")
}

impl Default for InterevalConfig {
    fn default() -> Self {
        Self {
            backend: BackendPreference::default(),
            vectors_path: None,
            lexicon_path: None,
            weights: ScoreWeights::default(),
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from `path`, or from well-known paths when none is given.
///
/// Search order:
/// 1. `intereval.toml` in the current directory
/// 2. `~/.config/intereval/config.toml`
///
/// Environment variable overrides: `INTEREVAL_BACKEND`, `INTEREVAL_VECTORS`.
pub fn load_config_from(path: Option<&Path>) -> Result<InterevalConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("intereval.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<InterevalConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => InterevalConfig::default(),
    };

    let config = apply_env_overrides(config, |name| std::env::var(name).ok())?;
    Ok(resolve_paths(config))
}

fn apply_env_overrides<F>(mut config: InterevalConfig, var: F) -> Result<InterevalConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(backend) = var("INTEREVAL_BACKEND") {
        config.backend = backend
            .parse()
            .context("invalid INTEREVAL_BACKEND")?;
    }
    if let Some(vectors) = var("INTEREVAL_VECTORS") {
        config.vectors_path = (!vectors.trim().is_empty()).then(|| PathBuf::from(vectors));
    }
    Ok(config)
}

fn resolve_paths(mut config: InterevalConfig) -> InterevalConfig {
    config.vectors_path = config.vectors_path.as_deref().map(resolve_path);
    config.lexicon_path = config.lexicon_path.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("intereval"))
}

/// The lexicon named by the config, or the built-in one.
pub fn load_lexicon(config: &InterevalConfig) -> Result<Lexicon, EvalError> {
    match &config.lexicon_path {
        Some(path) => Lexicon::load(path),
        None => Ok(Lexicon::default()),
    }
}

/// Pick the most capable backend that can be built.
///
/// Never fails: an enriched backend that cannot be loaded is reported once
/// and replaced by the next tier down.
pub fn select_backend(
    config: &InterevalConfig,
    lexicon: Arc<Lexicon>,
) -> Arc<dyn LinguisticBackend> {
    if config.backend == BackendPreference::Basic {
        tracing::info!("using basic backend (configured)");
        return Arc::new(LexicalBackend::new(lexicon));
    }

    let enriched = match EnrichedBackend::new(Arc::clone(&lexicon)) {
        Ok(backend) => backend,
        Err(e) => {
            let e = EvalError::from(e);
            tracing::warn!("{e}; falling back to basic backend");
            return Arc::new(LexicalBackend::new(lexicon));
        }
    };

    match &config.vectors_path {
        Some(path) => match WordVectors::load(path) {
            Ok(vectors) => {
                tracing::info!(
                    path = %path.display(),
                    words = vectors.len(),
                    "using enriched backend with word vectors"
                );
                Arc::new(enriched.with_vectors(Arc::new(vectors)))
            }
            Err(e) => {
                let e = EvalError::from(e);
                tracing::warn!("{e}; continuing without word vectors");
                Arc::new(enriched)
            }
        },
        None => {
            tracing::info!(
                "using enriched backend without word vectors; set vectors_path for semantic similarity"
            );
            Arc::new(enriched)
        }
    }
}

/// Build the evaluation engine described by `config`.
///
/// Only configuration errors (bad lexicon, bad weights) are returned; backend
/// load failures degrade the backend instead.
pub fn build_engine(config: &InterevalConfig) -> Result<EvaluationEngine, EvalError> {
    let lexicon = Arc::new(load_lexicon(config)?);
    let backend = select_backend(config, Arc::clone(&lexicon));
    EvaluationEngine::new(backend, lexicon, config.weights)
}

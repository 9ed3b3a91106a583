//! Pre-trained word vectors.
//!
//! Reads the plain-text GloVe/word2vec format: one word per line followed by
//! its components, separated by whitespace. A leading `<count> <dim>` header
//! line (word2vec) is accepted and ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::BackendError;

#[derive(Debug, Clone)]
pub struct WordVectors {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl WordVectors {
    /// Load vectors from a file.
    pub fn load(path: &Path) -> Result<Self, BackendError> {
        let file = File::open(path).map_err(|source| BackendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vectors = Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            BackendError::Io { source, .. } => BackendError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(
            path = %path.display(),
            words = vectors.len(),
            dimension = vectors.dimension(),
            "loaded word vectors"
        );
        Ok(vectors)
    }

    /// Parse vectors from any buffered reader.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, BackendError> {
        let mut dimension = 0usize;
        let mut vectors = HashMap::new();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|source| BackendError::Io {
                path: Default::default(),
                source,
            })?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();

            if line_no == 1 && is_header(word, &rest) {
                continue;
            }
            if rest.is_empty() {
                return Err(BackendError::Malformed {
                    line: line_no,
                    message: format!("'{word}' has no components"),
                });
            }

            let components = rest
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| BackendError::Malformed {
                    line: line_no,
                    message: e.to_string(),
                })?;

            if dimension == 0 {
                dimension = components.len();
            } else if components.len() != dimension {
                return Err(BackendError::DimensionMismatch {
                    line: line_no,
                    expected: dimension,
                    found: components.len(),
                });
            }
            vectors.insert(word.to_lowercase(), components);
        }

        if vectors.is_empty() {
            return Err(BackendError::Empty);
        }
        Ok(Self { dimension, vectors })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    /// Mean vector of the words that have a vector, or `None` if none do.
    pub fn mean<'a>(&self, words: impl IntoIterator<Item = &'a str>) -> Option<Vec<f64>> {
        let mut sum = vec![0.0f64; self.dimension];
        let mut found = 0usize;
        for word in words {
            if let Some(v) = self.get(word) {
                for (acc, x) in sum.iter_mut().zip(v) {
                    *acc += f64::from(*x);
                }
                found += 1;
            }
        }
        if found == 0 {
            return None;
        }
        let n = found as f64;
        Some(sum.into_iter().map(|x| x / n).collect())
    }
}

fn is_header(first: &str, rest: &[&str]) -> bool {
    rest.len() == 1 && first.parse::<usize>().is_ok() && rest[0].parse::<usize>().is_ok()
}

/// Cosine similarity of two dense vectors; zero if either has no length.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

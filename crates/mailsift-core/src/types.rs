//! Core types for MailSift

use crate::error::{Error, Result};
use std::fmt;

/// Sparse numeric encoding of one input text.
///
/// Produced by a feature transformer and consumed only by the classifier
/// loaded alongside it. Entries are sorted by feature index and every index is
/// below `dim`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Create an all-zero vector with the given dimension
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build a vector from `(index, value)` pairs.
    ///
    /// Pairs are sorted by index; repeated indices are summed.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f64)>) -> Result<Self> {
        if let Some(&(index, _)) = entries.iter().find(|(i, _)| *i >= dim) {
            return Err(Error::transform(format!(
                "feature index {} out of range for dimension {}",
                index, dim
            )));
        }

        entries.sort_unstable_by_key(|(i, _)| *i);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == index => *acc += value,
                _ => merged.push((index, value)),
            }
        }

        Ok(Self {
            dim,
            entries: merged,
        })
    }

    /// Number of features
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Shape as a single-row matrix
    pub fn shape(&self) -> (usize, usize) {
        (1, self.dim)
    }

    /// Stored entries in index order
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Value at a feature index (zero when not stored)
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Dot product against a dense weight row.
    ///
    /// Fails when the weight row does not match the vector dimension.
    pub fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.dim {
            return Err(Error::classifier(format!(
                "X has {} features, but the model is expecting {} features as input",
                self.dim,
                weights.len()
            )));
        }

        Ok(self
            .entries
            .iter()
            .map(|(index, value)| weights[*index] * value)
            .sum())
    }
}

/// Outcome of one classification request
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Classified as spam, with confidence in percent when available
    Spam { confidence: Option<f64> },

    /// Classified as legitimate mail, with confidence in percent when available
    NotSpam { confidence: Option<f64> },

    /// Input rejected before reaching the model
    InvalidInput,

    /// Model pair failed to load at startup
    ModelUnavailable,

    /// Transformation or classification failed for this request
    ModelError(String),
}

impl Decision {
    /// Stable machine-readable label for this outcome
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Spam { .. } => "spam",
            Self::NotSpam { .. } => "not_spam",
            Self::InvalidInput => "invalid_input",
            Self::ModelUnavailable => "model_unavailable",
            Self::ModelError(_) => "model_error",
        }
    }

    /// Confidence percentage, if the classifier reported one
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Spam { confidence } | Self::NotSpam { confidence } => *confidence,
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSpam { confidence } => {
                write!(f, "✅ Not Spam")?;
                if let Some(c) = confidence {
                    write!(f, " (Confidence: {:.2}%)", c)?;
                }
                Ok(())
            }
            Self::Spam { confidence } => {
                write!(f, "⚠️ Spam")?;
                if let Some(c) = confidence {
                    write!(f, " (Confidence: {:.2}%)", c)?;
                }
                Ok(())
            }
            Self::InvalidInput => write!(f, "❌ Invalid input."),
            Self::ModelUnavailable => write!(f, "❌ Model not loaded correctly."),
            Self::ModelError(msg) => write!(f, "❌ Model error: {}", msg),
        }
    }
}

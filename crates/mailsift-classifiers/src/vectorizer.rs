//! Bag-of-words vectorizer applying a vocabulary fitted offline
//!
//! Supports raw term counts and tf-idf weighting. Nothing here fits a
//! vocabulary; the vocabulary, idf weights and options all come from the
//! model artifact.

use crate::transformer::FeatureTransformer;
use mailsift_core::{Error, FeatureVector, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Token pattern used when the artifact does not specify one
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Serialized vectorizer section of a model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerSpec {
    /// Weighting scheme
    #[serde(rename = "type")]
    pub kind: VectorizerKind,

    /// Term to feature index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature (tf-idf only)
    #[serde(default)]
    pub idf: Option<Vec<f64>>,

    /// Lowercase text before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Tokens dropped before n-grams are built
    #[serde(default)]
    pub stop_words: Vec<String>,

    /// Regex selecting tokens
    #[serde(default)]
    pub token_pattern: Option<String>,

    /// Clamp counts to 1
    #[serde(default)]
    pub binary: bool,

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Row normalisation; defaults to l2 for tf-idf and none for counts
    #[serde(default)]
    pub norm: Option<Norm>,
}

/// Vectorizer weighting scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorizerKind {
    /// Raw (or binary) term counts
    Count,
    /// Term counts scaled by idf
    Tfidf,
}

/// Row normalisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
    #[serde(rename = "none")]
    Disabled,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Vectorizer ready to transform text
#[derive(Debug)]
pub struct TextVectorizer {
    kind: VectorizerKind,
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    token_pattern: Regex,
    lowercase: bool,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    binary: bool,
    sublinear_tf: bool,
    norm: Norm,
}

impl TextVectorizer {
    /// Build a vectorizer from its serialized form, validating consistency
    pub fn from_spec(spec: VectorizerSpec) -> Result<Self> {
        let n_features = spec.vocabulary.len();
        if n_features == 0 {
            return Err(Error::artifact("vectorizer vocabulary is empty"));
        }

        let mut seen = HashSet::with_capacity(n_features);
        for (term, &index) in &spec.vocabulary {
            if index >= n_features {
                return Err(Error::artifact(format!(
                    "vocabulary term '{}' has index {} but only {} features exist",
                    term, index, n_features
                )));
            }
            if !seen.insert(index) {
                return Err(Error::artifact(format!(
                    "vocabulary index {} is assigned to more than one term",
                    index
                )));
            }
        }

        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::artifact(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let idf = match (spec.kind, spec.idf) {
            (VectorizerKind::Tfidf, None) => {
                return Err(Error::artifact("tfidf vectorizer is missing idf weights"));
            }
            (VectorizerKind::Tfidf, Some(idf)) => {
                if idf.len() != n_features {
                    return Err(Error::artifact(format!(
                        "idf has {} weights but vocabulary has {} terms",
                        idf.len(),
                        n_features
                    )));
                }
                if idf.iter().any(|w| !w.is_finite()) {
                    return Err(Error::artifact("idf weights must be finite"));
                }
                Some(idf)
            }
            (VectorizerKind::Count, _) => None,
        };

        let pattern = spec
            .token_pattern
            .as_deref()
            .unwrap_or(DEFAULT_TOKEN_PATTERN);
        let token_pattern = Regex::new(pattern).map_err(|e| {
            Error::artifact(format!("Failed to compile token pattern: {}", e))
        })?;

        let norm = spec.norm.unwrap_or(match spec.kind {
            VectorizerKind::Tfidf => Norm::L2,
            VectorizerKind::Count => Norm::Disabled,
        });

        let stop_words = spec
            .stop_words
            .into_iter()
            .map(|w| if spec.lowercase { w.to_lowercase() } else { w })
            .collect();

        Ok(Self {
            kind: spec.kind,
            vocabulary: spec.vocabulary,
            idf,
            token_pattern,
            lowercase: spec.lowercase,
            ngram_range: spec.ngram_range,
            stop_words,
            binary: spec.binary,
            sublinear_tf: spec.sublinear_tf,
            norm,
        })
    }

    /// Number of vocabulary terms
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Split text into tokens, after lowercasing and stop-word removal
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        self.token_pattern
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    fn terms(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();

        for n in min_n..=max_n {
            if n == 1 {
                terms.extend(tokens.iter().cloned());
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }

        terms
    }
}

impl FeatureTransformer for TextVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector> {
        let tokens = self.tokenize(text);

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.terms(&tokens) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| {
                let mut value = if self.binary { 1.0 } else { count };
                if self.sublinear_tf {
                    value = 1.0 + value.ln();
                }
                if let Some(idf) = &self.idf {
                    value *= idf[index];
                }
                (index, value)
            })
            .collect();

        if let Some(&(index, value)) = entries.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::transform(format!(
                "feature {} has non-finite value {}",
                index, value
            )));
        }

        let denominator = match self.norm {
            Norm::L1 => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Norm::L2 => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Norm::Disabled => 1.0,
        };
        if denominator > 0.0 && denominator != 1.0 {
            for (_, value) in &mut entries {
                *value /= denominator;
            }
        }

        FeatureVector::from_entries(self.vocabulary.len(), entries)
    }

    fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &str {
        match self.kind {
            VectorizerKind::Count => "count-vectorizer",
            VectorizerKind::Tfidf => "tfidf-vectorizer",
        }
    }
}

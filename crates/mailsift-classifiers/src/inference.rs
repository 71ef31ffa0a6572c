//! Single-request inference: validate, transform, classify, decide

use crate::bundle::ModelPair;
use crate::classifier::{ClassifierKind, NOT_SPAM_CLASS, NOT_SPAM_LABEL, SPAM_CLASS};
use crate::validator::is_valid_email_text;
use mailsift_core::{Decision, Error, Result};
use std::path::Path;
use tracing::{debug, error, warn};

/// Minimum not-spam probability for a NotSpam verdict.
///
/// Anything below this is reported as Spam, even when not-spam is the more
/// likely class.
pub const NOT_SPAM_THRESHOLD: f64 = 0.70;

/// Model availability, fixed at startup
#[derive(Debug)]
pub enum ModelState {
    /// Transformer and classifier loaded
    Loaded(ModelPair),

    /// Loading failed; every request reports the model as unavailable
    Unavailable { reason: String },
}

impl ModelState {
    /// Load the model pair, degrading to `Unavailable` on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match ModelPair::load(path) {
            Ok(pair) => Self::Loaded(pair),
            Err(e) => {
                error!(path = %path.display(), "Failed to load model/vectorizer: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    /// State for a model that could not be loaded
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Whether the model pair is present
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl From<ModelPair> for ModelState {
    fn from(pair: ModelPair) -> Self {
        Self::Loaded(pair)
    }
}

/// Turns submitted text into a [`Decision`]
///
/// Holds the model state read-only; share it across requests behind an `Arc`.
#[derive(Debug)]
pub struct InferenceService {
    state: ModelState,
}

impl InferenceService {
    /// Create a service over a fixed model state
    pub fn new(state: ModelState) -> Self {
        Self { state }
    }

    /// Whether requests can reach the model
    pub fn is_model_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    /// Classify one submitted text.
    ///
    /// Never fails: availability, validation and inference failures are all
    /// reported as decisions.
    pub fn predict(&self, text: &str) -> Decision {
        let pair = match &self.state {
            ModelState::Loaded(pair) => pair,
            ModelState::Unavailable { .. } => return Decision::ModelUnavailable,
        };

        if !is_valid_email_text(text) {
            return Decision::InvalidInput;
        }

        match classify(pair, text) {
            Ok(decision) => decision,
            Err(e) => {
                warn!("Inference failed: {}", e);
                Decision::ModelError(e.to_string())
            }
        }
    }
}

fn classify(pair: &ModelPair, text: &str) -> Result<Decision> {
    let features = pair.transformer().transform(text)?;
    debug!(
        "Transformed input shape: {:?} ({} non-zero)",
        features.shape(),
        features.nnz()
    );

    match pair.classifier() {
        ClassifierKind::Probabilistic(classifier) => {
            let prob = classifier.predict_proba(&features)?;
            decide_from_probabilities(&prob)
        }
        ClassifierKind::LabelOnly(classifier) => {
            let label = classifier.predict(&features)?;
            Ok(decide_from_label(label))
        }
    }
}

/// Apply the not-spam threshold to per-class probabilities
pub fn decide_from_probabilities(prob: &[f64]) -> Result<Decision> {
    if prob.len() < 2 {
        return Err(Error::classifier(format!(
            "expected probabilities for 2 classes, got {}",
            prob.len()
        )));
    }
    if prob.iter().any(|p| !p.is_finite()) {
        return Err(Error::classifier(format!(
            "classifier returned non-finite probabilities {:?}",
            prob
        )));
    }

    let not_spam = prob[NOT_SPAM_CLASS];
    Ok(if not_spam >= NOT_SPAM_THRESHOLD {
        Decision::NotSpam {
            confidence: Some(not_spam * 100.0),
        }
    } else {
        Decision::Spam {
            confidence: Some(prob[SPAM_CLASS] * 100.0),
        }
    })
}

/// Map a label-only prediction to a decision
pub fn decide_from_label(label: i64) -> Decision {
    if label == NOT_SPAM_LABEL {
        Decision::NotSpam { confidence: None }
    } else {
        Decision::Spam { confidence: None }
    }
}

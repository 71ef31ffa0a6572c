//! Classifier traits and the capability tag selected at load time

use mailsift_core::{FeatureVector, Result};

/// Class index the paired model uses for spam
pub const SPAM_CLASS: usize = 0;

/// Class index the paired model uses for legitimate mail
pub const NOT_SPAM_CLASS: usize = 1;

/// Label a label-only classifier returns for legitimate mail
pub const NOT_SPAM_LABEL: i64 = 1;

/// Classifier able to report per-class probabilities
pub trait ProbabilisticClassifier: Send + Sync {
    /// Probability for each class, indexed by class index
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Classifier that only produces a class label
pub trait LabelClassifier: Send + Sync {
    /// Predicted class label
    fn predict(&self, features: &FeatureVector) -> Result<i64>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// A loaded classifier, tagged by what it can report.
///
/// The variant is chosen once when the model is loaded; inference dispatches
/// on it instead of probing capabilities per request.
pub enum ClassifierKind {
    /// Reports probabilities; decisions use the not-spam threshold
    Probabilistic(Box<dyn ProbabilisticClassifier>),

    /// Reports labels only; decisions carry no confidence
    LabelOnly(Box<dyn LabelClassifier>),
}

impl ClassifierKind {
    /// Wrap a probability-capable classifier
    pub fn probabilistic(classifier: impl ProbabilisticClassifier + 'static) -> Self {
        Self::Probabilistic(Box::new(classifier))
    }

    /// Wrap a label-only classifier
    pub fn label_only(classifier: impl LabelClassifier + 'static) -> Self {
        Self::LabelOnly(Box::new(classifier))
    }

    /// Name of the wrapped classifier
    pub fn name(&self) -> &str {
        match self {
            Self::Probabilistic(c) => c.name(),
            Self::LabelOnly(c) => c.name(),
        }
    }

    /// Whether decisions from this classifier carry a confidence
    pub fn supports_proba(&self) -> bool {
        matches!(self, Self::Probabilistic(_))
    }
}

impl std::fmt::Debug for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Probabilistic(c) => f.debug_tuple("Probabilistic").field(&c.name()).finish(),
            Self::LabelOnly(c) => f.debug_tuple("LabelOnly").field(&c.name()).finish(),
        }
    }
}

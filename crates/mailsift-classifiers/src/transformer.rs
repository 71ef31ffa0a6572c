//! Feature transformer trait

use mailsift_core::{FeatureVector, Result};

/// Turns raw text into the feature space of its paired classifier
pub trait FeatureTransformer: Send + Sync {
    /// Encode one text as a feature vector
    fn transform(&self, text: &str) -> Result<FeatureVector>;

    /// Dimension of the vectors this transformer produces
    fn n_features(&self) -> usize;

    /// Get the transformer name
    fn name(&self) -> &str;
}

//! MailSift Classifiers
//!
//! Spam/not-spam inference over a model trained offline.
//!
//! A request runs through a fixed sequence:
//! - the input validator rejects text that cannot be email content
//! - the loaded vectorizer turns the text into a feature vector
//! - the loaded classifier scores it, by probability or by label
//! - the score becomes a [`Decision`](mailsift_core::Decision)
//!
//! The vectorizer and classifier come from one artifact and are loaded
//! together as a [`ModelPair`].

pub mod bundle;
pub mod classifier;
pub mod inference;
pub mod models;
pub mod transformer;
pub mod validator;
pub mod vectorizer;

pub use bundle::{BundleFormat, BundleMetadata, BundleSpec, ModelPair};
pub use classifier::{ClassifierKind, LabelClassifier, ProbabilisticClassifier};
pub use inference::{InferenceService, ModelState, NOT_SPAM_THRESHOLD};
pub use models::{ClassifierSpec, LinearSvc, LogisticRegression, MultinomialNb};
pub use transformer::FeatureTransformer;
pub use validator::is_valid_email_text;
pub use vectorizer::{Norm, TextVectorizer, VectorizerKind, VectorizerSpec};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bundle::ModelPair;
    pub use crate::classifier::{ClassifierKind, LabelClassifier, ProbabilisticClassifier};
    pub use crate::inference::{InferenceService, ModelState};
    pub use crate::transformer::FeatureTransformer;
    pub use mailsift_core::{Decision, FeatureVector};
}

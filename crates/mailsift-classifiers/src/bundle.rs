//! Model artifact loading
//!
//! An artifact holds exactly two objects produced by offline training: a
//! vectorizer and the classifier trained on its output. They are loaded
//! together into a [`ModelPair`] so neither can exist without the other.

use crate::classifier::ClassifierKind;
use crate::models::ClassifierSpec;
use crate::transformer::FeatureTransformer;
use crate::vectorizer::{TextVectorizer, VectorizerSpec};
use mailsift_core::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::info;

/// Serialized model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleSpec {
    /// Artifact format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Fitted feature transformer
    pub vectorizer: VectorizerSpec,

    /// Fitted classifier
    pub classifier: ClassifierSpec,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// On-disk encoding of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFormat {
    Json,
    Yaml,
}

impl BundleFormat {
    /// Pick the format from a file extension; anything but yaml/yml is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Descriptive data about a loaded pair
#[derive(Debug, Clone, Default)]
pub struct BundleMetadata {
    /// Artifact format version
    pub version: String,

    /// SHA-256 of the artifact bytes, hex encoded
    pub digest: Option<String>,
}

/// Transformer and classifier loaded as a unit
pub struct ModelPair {
    transformer: Box<dyn FeatureTransformer>,
    classifier: ClassifierKind,
    metadata: BundleMetadata,
}

impl ModelPair {
    /// Pair an already-built transformer and classifier
    pub fn new(transformer: impl FeatureTransformer + 'static, classifier: ClassifierKind) -> Self {
        Self {
            transformer: Box::new(transformer),
            classifier,
            metadata: BundleMetadata::default(),
        }
    }

    /// Load a pair from an artifact file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "Model file not found: {:?}",
                path
            )));
        }

        let bytes = std::fs::read(path)?;
        let pair = Self::from_slice(&bytes, BundleFormat::from_path(path))?;

        info!(
            path = %path.display(),
            version = %pair.metadata.version,
            digest = pair.metadata.digest.as_deref().unwrap_or("-"),
            "Model and vectorizer loaded successfully"
        );
        info!(
            "Vectorizer vocabulary size: {} ({}, classifier: {})",
            pair.transformer.n_features(),
            pair.transformer.name(),
            pair.classifier.name()
        );

        Ok(pair)
    }

    /// Decode a pair from artifact bytes
    pub fn from_slice(bytes: &[u8], format: BundleFormat) -> Result<Self> {
        let spec: BundleSpec = match format {
            BundleFormat::Json => serde_json::from_slice(bytes)?,
            BundleFormat::Yaml => serde_yaml::from_slice(bytes)?,
        };

        let digest = Sha256::digest(bytes)
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>();

        let mut pair = Self::from_spec(spec)?;
        pair.metadata.digest = Some(digest);
        Ok(pair)
    }

    /// Build a pair from a decoded artifact
    pub fn from_spec(spec: BundleSpec) -> Result<Self> {
        let transformer = TextVectorizer::from_spec(spec.vectorizer)?;
        let classifier = spec.classifier.build()?;

        Ok(Self {
            transformer: Box::new(transformer),
            classifier,
            metadata: BundleMetadata {
                version: spec.version,
                digest: None,
            },
        })
    }

    /// The feature transformer
    pub fn transformer(&self) -> &dyn FeatureTransformer {
        self.transformer.as_ref()
    }

    /// The classifier, tagged by capability
    pub fn classifier(&self) -> &ClassifierKind {
        &self.classifier
    }

    /// Artifact metadata
    pub fn metadata(&self) -> &BundleMetadata {
        &self.metadata
    }
}

impl std::fmt::Debug for ModelPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelPair")
            .field("transformer", &self.transformer.name())
            .field("n_features", &self.transformer.n_features())
            .field("classifier", &self.classifier)
            .field("metadata", &self.metadata)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE_JSON: &str = r#"{
        "version": "2.1",
        "vectorizer": {
            "type": "count",
            "vocabulary": {"free": 0, "meeting": 1}
        },
        "classifier": {
            "type": "linear-svc",
            "coef": [-1.0, 1.0]
        }
    }"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(BundleFormat::from_path(Path::new("m.yaml")), BundleFormat::Yaml);
        assert_eq!(BundleFormat::from_path(Path::new("m.yml")), BundleFormat::Yaml);
        assert_eq!(BundleFormat::from_path(Path::new("m.json")), BundleFormat::Json);
        assert_eq!(BundleFormat::from_path(Path::new("spam_bundle")), BundleFormat::Json);
    }

    #[test]
    fn test_from_slice_records_metadata() {
        let pair = ModelPair::from_slice(BUNDLE_JSON.as_bytes(), BundleFormat::Json).unwrap();

        assert_eq!(pair.metadata().version, "2.1");
        let digest = pair.metadata().digest.as_deref().unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(pair.transformer().n_features(), 2);
        assert!(!pair.classifier().supports_proba());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let err = ModelPair::from_slice(
            br#"{"vectorizer": {"type": "count", "vocabulary": {"a": 0}}}"#,
            BundleFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ModelPair::load("/definitely/not/here/spam_bundle.json").unwrap_err();
        assert!(err.to_string().contains("Model file not found"));
    }
}

//! Linear models executed from fitted parameters
//!
//! Each model is binary: two classes, with class index 0 = spam and
//! class index 1 = not spam.

use crate::classifier::{ClassifierKind, LabelClassifier, ProbabilisticClassifier};
use mailsift_core::{Error, FeatureVector, Result};
use serde::{Deserialize, Serialize};

/// Serialized classifier section of a model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClassifierSpec {
    /// Binary logistic regression (probabilistic)
    LogisticRegression {
        coef: Vec<f64>,
        #[serde(default)]
        intercept: f64,
        #[serde(default = "default_classes")]
        classes: Vec<i64>,
    },

    /// Multinomial naive Bayes (probabilistic)
    MultinomialNb {
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
        #[serde(default = "default_classes")]
        classes: Vec<i64>,
    },

    /// Linear support vector classifier (label only)
    LinearSvc {
        coef: Vec<f64>,
        #[serde(default)]
        intercept: f64,
        #[serde(default = "default_classes")]
        classes: Vec<i64>,
    },
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

impl ClassifierSpec {
    /// Instantiate the classifier and tag it by capability
    pub fn build(self) -> Result<ClassifierKind> {
        match self {
            Self::LogisticRegression {
                coef,
                intercept,
                classes,
            } => {
                check_classes(&classes)?;
                check_finite("coef", &coef)?;
                check_finite("intercept", &[intercept])?;
                Ok(ClassifierKind::probabilistic(LogisticRegression::new(
                    coef, intercept,
                )))
            }
            Self::MultinomialNb {
                class_log_prior,
                feature_log_prob,
                classes,
            } => {
                check_classes(&classes)?;
                Ok(ClassifierKind::probabilistic(MultinomialNb::new(
                    class_log_prior,
                    feature_log_prob,
                )?))
            }
            Self::LinearSvc {
                coef,
                intercept,
                classes,
            } => {
                check_classes(&classes)?;
                check_finite("coef", &coef)?;
                check_finite("intercept", &[intercept])?;
                Ok(ClassifierKind::label_only(LinearSvc::new(
                    coef,
                    intercept,
                    [classes[0], classes[1]],
                )))
            }
        }
    }
}

fn check_classes(classes: &[i64]) -> Result<()> {
    if classes.len() != 2 {
        return Err(Error::artifact(format!(
            "binary classifier needs exactly 2 classes, found {}",
            classes.len()
        )));
    }
    Ok(())
}

fn check_finite(field: &str, values: &[f64]) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::artifact(format!("{} contains non-finite values", field)));
    }
    Ok(())
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Binary logistic regression
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept }
    }

    /// Signed distance to the decision boundary
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64> {
        Ok(features.dot(&self.coef)? + self.intercept)
    }
}

impl ProbabilisticClassifier for LogisticRegression {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let p = sigmoid(self.decision_function(features)?);
        Ok(vec![1.0 - p, p])
    }

    fn name(&self) -> &str {
        "logistic-regression"
    }
}

/// Multinomial naive Bayes
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn new(class_log_prior: Vec<f64>, feature_log_prob: Vec<Vec<f64>>) -> Result<Self> {
        if class_log_prior.len() != 2 || feature_log_prob.len() != 2 {
            return Err(Error::artifact(format!(
                "naive Bayes expects 2 classes, found {} priors and {} likelihood rows",
                class_log_prior.len(),
                feature_log_prob.len()
            )));
        }
        if feature_log_prob[0].len() != feature_log_prob[1].len() {
            return Err(Error::artifact(
                "naive Bayes likelihood rows have different lengths",
            ));
        }
        check_finite("class_log_prior", &class_log_prior)?;
        for row in &feature_log_prob {
            check_finite("feature_log_prob", row)?;
        }

        Ok(Self {
            class_log_prior,
            feature_log_prob,
        })
    }
}

impl ProbabilisticClassifier for MultinomialNb {
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let joint = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, row)| features.dot(row).map(|d| prior + d))
            .collect::<Result<Vec<f64>>>()?;

        let max = joint.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + joint.iter().map(|j| (j - max).exp()).sum::<f64>().ln();

        Ok(joint.iter().map(|j| (j - log_norm).exp()).collect())
    }

    fn name(&self) -> &str {
        "multinomial-nb"
    }
}

/// Linear support vector classifier; reports labels only
#[derive(Debug, Clone)]
pub struct LinearSvc {
    coef: Vec<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LinearSvc {
    pub fn new(coef: Vec<f64>, intercept: f64, classes: [i64; 2]) -> Self {
        Self {
            coef,
            intercept,
            classes,
        }
    }
}

impl LabelClassifier for LinearSvc {
    fn predict(&self, features: &FeatureVector) -> Result<i64> {
        let score = features.dot(&self.coef)? + self.intercept;
        Ok(if score > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }

    fn name(&self) -> &str {
        "linear-svc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x(dim: usize, entries: Vec<(usize, f64)>) -> FeatureVector {
        FeatureVector::from_entries(dim, entries).unwrap()
    }

    #[test]
    fn test_logistic_regression_probabilities() {
        let lr = LogisticRegression::new(vec![2.0, -2.0], 0.0);

        let p = lr.predict_proba(&x(2, vec![])).unwrap();
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!((p[1] - 0.5).abs() < 1e-12);

        let p = lr.predict_proba(&x(2, vec![(0, 1.0)])).unwrap();
        assert!(p[1] > 0.88 && p[1] < 0.89);
        assert!((p[0] + p[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_is_stable_for_large_inputs() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let lr = LogisticRegression::new(vec![1.0, 1.0, 1.0], 0.0);
        let err = lr.predict_proba(&x(2, vec![(0, 1.0)])).unwrap_err();
        assert!(err.to_string().contains("expecting 3 features"));
    }

    #[test]
    fn test_naive_bayes_probabilities_sum_to_one() {
        let nb = MultinomialNb::new(
            vec![0.5f64.ln(), 0.5f64.ln()],
            vec![vec![0.8f64.ln(), 0.2f64.ln()], vec![0.2f64.ln(), 0.8f64.ln()]],
        )
        .unwrap();

        let p = nb.predict_proba(&x(2, vec![(1, 2.0)])).unwrap();
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // 0.8^2 vs 0.2^2 -> 16:1 in favour of class 1
        assert!((p[1] - 16.0 / 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_naive_bayes_rejects_bad_shapes() {
        assert!(MultinomialNb::new(vec![0.0], vec![vec![0.0]]).is_err());
        assert!(MultinomialNb::new(vec![0.0, 0.0], vec![vec![0.0], vec![0.0, 0.0]]).is_err());
    }

    #[test]
    fn test_linear_svc_labels() {
        let svc = LinearSvc::new(vec![1.0, -1.0], 0.0, [0, 1]);
        assert_eq!(svc.predict(&x(2, vec![(0, 1.0)])).unwrap(), 1);
        assert_eq!(svc.predict(&x(2, vec![(1, 1.0)])).unwrap(), 0);
        assert_eq!(svc.predict(&x(2, vec![])).unwrap(), 0);
    }

    #[test]
    fn test_spec_selects_capability() {
        let spec: ClassifierSpec = serde_json::from_str(
            r#"{"type": "logistic-regression", "coef": [1.0], "intercept": 0.1}"#,
        )
        .unwrap();
        assert!(spec.build().unwrap().supports_proba());

        let spec: ClassifierSpec =
            serde_json::from_str(r#"{"type": "linear-svc", "coef": [1.0]}"#).unwrap();
        let kind = spec.build().unwrap();
        assert!(!kind.supports_proba());
        assert_eq!(kind.name(), "linear-svc");
    }

    #[test]
    fn test_spec_rejects_non_finite_intercept() {
        let yaml = "type: linear-svc\ncoef: [1.0, -1.0]\nintercept: .nan\n";
        let spec: ClassifierSpec = serde_yaml::from_str(yaml).unwrap();
        let err = spec.build().unwrap_err();
        assert!(err.to_string().contains("intercept"));

        let yaml = "type: logistic-regression\ncoef: [1.0]\nintercept: .inf\n";
        let spec: ClassifierSpec = serde_yaml::from_str(yaml).unwrap();
        assert!(spec.build().is_err());
    }

    #[test]
    fn test_spec_rejects_non_binary_classes() {
        let spec: ClassifierSpec = serde_json::from_str(
            r#"{"type": "linear-svc", "coef": [1.0], "classes": [0, 1, 2]}"#,
        )
        .unwrap();
        assert!(spec.build().is_err());
    }
}

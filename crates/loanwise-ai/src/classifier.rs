//! Loan classifiers loaded from JSON model artifacts.
//!
//! An artifact declares its label alphabet explicitly. The invoker compares
//! labels as strings, so an artifact trained on numeric targets must export
//! them as the strings it expects to be matched (`"N"` for rejection).
//!
//! ```json
//! {
//!   "kind": "logistic",
//!   "name": "loan-status-lr",
//!   "features": ["credit_history", "applicant_income_log", "..."],
//!   "labels": ["N", "Y"],
//!   "coefficients": [3.1, 0.12, "..."],
//!   "intercept": -2.4,
//!   "threshold": 0.5
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use loanwise_core::{FEATURE_COUNT, FEATURE_NAMES, PredictionResult};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{ModelError, PredictError};

/// Injected prediction capability.
///
/// Implementations are built once at startup and shared read-only between
/// requests.
pub trait Classifier: Send + Sync {
    /// Number of input columns the classifier expects.
    fn arity(&self) -> usize;

    /// Label alphabet the classifier can emit.
    fn labels(&self) -> &[String];

    /// Classify one feature row, returning the raw label.
    fn classify(&self, features: &[f64]) -> Result<String, PredictError>;
}

/// Model family and its fitted parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    /// Binary logistic regression. Emits `labels[1]` when
    /// `sigmoid(w·x + b) >= threshold`, otherwise `labels[0]`.
    Logistic {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    /// Nearest centroid by Euclidean distance, one centroid per label.
    Centroid {
        centroids: BTreeMap<String, Vec<f64>>,
    },
}

fn default_threshold() -> f64 {
    0.5
}

/// A fitted model as exported to disk.
///
/// Only constructed through [`ModelArtifact::from_json`] or
/// [`ModelArtifact::load`], so every instance has passed validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    name: Option<String>,
    /// Column names the model was trained on, in order. Checked against
    /// the encoder's column order when present.
    #[serde(default)]
    features: Option<Vec<String>>,
    labels: Vec<String>,
    #[serde(flatten)]
    kind: ModelKind,
}

impl ModelArtifact {
    /// Load and validate a model artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        let artifact = Self::from_json(&json)?;
        info!(
            model = %path.display(),
            name = artifact.name().unwrap_or("unnamed"),
            kind = artifact.kind_name(),
            arity = artifact.arity(),
            labels = ?artifact.labels(),
            "loaded loan model"
        );
        Ok(artifact)
    }

    /// Parse and validate a model artifact from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: Self = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ModelKind::Logistic { .. } => "logistic",
            ModelKind::Centroid { .. } => "centroid",
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.labels.is_empty() {
            return Err(ModelError::Invalid("label alphabet is empty".into()));
        }
        let distinct: HashSet<&str> = self.labels.iter().map(String::as_str).collect();
        if distinct.len() != self.labels.len() {
            return Err(ModelError::Invalid("label alphabet has duplicates".into()));
        }

        match &self.kind {
            ModelKind::Logistic {
                coefficients,
                intercept,
                threshold,
            } => {
                if self.labels.len() != 2 {
                    return Err(ModelError::Invalid(format!(
                        "logistic model needs exactly 2 labels, got {}",
                        self.labels.len()
                    )));
                }
                if coefficients.is_empty() {
                    return Err(ModelError::Invalid("no coefficients".into()));
                }
                if !all_finite(coefficients) || !intercept.is_finite() {
                    return Err(ModelError::Invalid("non-finite parameter".into()));
                }
                if !(*threshold > 0.0 && *threshold < 1.0) {
                    return Err(ModelError::Invalid(format!(
                        "threshold {threshold} outside (0, 1)"
                    )));
                }
            }
            ModelKind::Centroid { centroids } => {
                let keys: HashSet<&str> = centroids.keys().map(String::as_str).collect();
                if keys != distinct {
                    return Err(ModelError::Invalid(
                        "centroid labels do not match the label alphabet".into(),
                    ));
                }
                let dim = centroids.values().next().map(Vec::len).unwrap_or(0);
                if dim == 0 {
                    return Err(ModelError::Invalid("empty centroid".into()));
                }
                for (label, centroid) in centroids {
                    if centroid.len() != dim {
                        return Err(ModelError::Invalid(format!(
                            "centroid '{label}' has {} columns, expected {dim}",
                            centroid.len()
                        )));
                    }
                    if !all_finite(centroid) {
                        return Err(ModelError::Invalid(format!(
                            "centroid '{label}' has a non-finite value"
                        )));
                    }
                }
            }
        }

        if let Some(features) = &self.features {
            if features.len() != self.arity() {
                return Err(ModelError::Invalid(format!(
                    "{} feature names for {} columns",
                    features.len(),
                    self.arity()
                )));
            }
            if features.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(ModelError::Invalid(
                    "feature order does not match the encoder".into(),
                ));
            }
        }

        if self.arity() != FEATURE_COUNT {
            warn!(
                arity = self.arity(),
                expected = FEATURE_COUNT,
                "model arity differs from the encoder; predictions will be rejected"
            );
        }
        if !self
            .labels()
            .iter()
            .any(|l| l == PredictionResult::REJECTED_LABEL)
        {
            warn!(
                labels = ?self.labels(),
                rejected = PredictionResult::REJECTED_LABEL,
                "model cannot emit the rejection label; every application will be approved"
            );
        }
        Ok(())
    }
}

impl Classifier for ModelArtifact {
    fn arity(&self) -> usize {
        match &self.kind {
            ModelKind::Logistic { coefficients, .. } => coefficients.len(),
            ModelKind::Centroid { centroids } => {
                centroids.values().next().map(Vec::len).unwrap_or(0)
            }
        }
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn classify(&self, features: &[f64]) -> Result<String, PredictError> {
        if features.len() != self.arity() {
            return Err(PredictError::InvalidInput {
                expected: self.arity(),
                actual: features.len(),
            });
        }

        match &self.kind {
            ModelKind::Logistic {
                coefficients,
                intercept,
                threshold,
            } => {
                let z = intercept + dot(coefficients, features);
                let p = sigmoid(z);
                if !p.is_finite() {
                    return Err(PredictError::Model(format!("non-finite score for z={z}")));
                }
                let idx = usize::from(p >= *threshold);
                self.labels.get(idx).cloned().ok_or_else(|| {
                    PredictError::Model(format!("no label at index {idx} of {:?}", self.labels))
                })
            }
            ModelKind::Centroid { centroids } => {
                let mut best: Option<(&str, f64)> = None;
                // Walk labels in declared order so ties go to the earlier label.
                for label in &self.labels {
                    let Some(centroid) = centroids.get(label) else {
                        continue;
                    };
                    let dist = squared_distance(features, centroid);
                    if best.is_none_or(|(_, d)| dist < d) {
                        best = Some((label.as_str(), dist));
                    }
                }
                best.map(|(label, _)| label.to_string())
                    .ok_or_else(|| PredictError::Model("no centroids".into()))
            }
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn all_finite(v: &[f64]) -> bool {
    v.iter().all(|x| x.is_finite())
}

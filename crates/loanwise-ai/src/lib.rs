//! Prediction layer: the injected classifier capability, JSON model artifacts,
//! and the invoker that maps classifier labels to loan decisions.

mod classifier;
mod error;
mod predict;

pub use classifier::{Classifier, ModelArtifact, ModelKind};
pub use error::{ModelError, PredictError};
pub use predict::predict;

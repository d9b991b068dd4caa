use loanwise_core::{FeatureVector, PredictionResult};
use tracing::debug;

use crate::{Classifier, PredictError};

/// Run the classifier on an encoded application and map its label to a
/// loan decision: `"N"` rejects, any other label approves.
///
/// `model` is `None` when no artifact could be loaded at startup.
pub fn predict(
    vector: &FeatureVector,
    model: Option<&dyn Classifier>,
) -> Result<PredictionResult, PredictError> {
    let model = model.ok_or(PredictError::ModelUnavailable)?;

    let features = vector.as_slice();
    if features.len() != model.arity() {
        return Err(PredictError::InvalidInput {
            expected: model.arity(),
            actual: features.len(),
        });
    }

    let label = model.classify(features)?;
    let result = PredictionResult::from_label(&label);
    debug!(label = %label, result = result.as_str(), "classified application");
    Ok(result)
}

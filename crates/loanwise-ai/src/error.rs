use thiserror::Error;

/// The model artifact could not be loaded at startup.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file not found: {0}")]
    NotFound(std::path::PathBuf),

    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("model file is not a valid artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    #[error("prediction model is not loaded")]
    ModelUnavailable,

    #[error("feature vector has {actual} columns, model expects {expected}")]
    InvalidInput { expected: usize, actual: usize },

    #[error("classifier failed: {0}")]
    Model(String),
}

use std::sync::Arc;

use loanwise_ai::{Classifier, ModelArtifact};
use loanwise_chat::{ChatError, ChatRelay};
use tracing::{error, info, warn};

use crate::ServerConfig;

/// Process-wide handles shared by every request.
///
/// Built once at startup and never mutated afterwards.
pub struct AppState {
    /// `None` when the model could not be loaded; `/predict` then reports an
    /// error instead of predicting.
    pub classifier: Option<Arc<dyn Classifier>>,
    pub chat: ChatRelay,
}

impl AppState {
    pub fn new(classifier: Option<Arc<dyn Classifier>>, chat: ChatRelay) -> Self {
        Self { classifier, chat }
    }

    /// Load the model and set up the chat relay.
    ///
    /// A missing or invalid model does not fail startup.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ChatError> {
        let classifier = match &config.model_path {
            Some(path) => match ModelArtifact::load(path) {
                Ok(artifact) => Some(Arc::new(artifact) as Arc<dyn Classifier>),
                Err(e) => {
                    error!(model = %path.display(), error = %e, "model not loaded; predictions disabled");
                    None
                }
            },
            None => {
                warn!("no model path configured; predictions disabled");
                None
            }
        };

        let chat = ChatRelay::new(config.chat.clone())?;
        if chat.is_configured() {
            info!(model = %config.chat.model, "chat relay configured");
        } else {
            warn!("GEMINI_API_KEY not set; chat requests will fail");
        }

        Ok(Self::new(classifier, chat))
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_model_degrades() {
        let config = ServerConfig {
            model_path: Some(PathBuf::from("/nonexistent/loanwise/model.json")),
            ..ServerConfig::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert!(!state.model_loaded());
        assert!(!state.chat.is_configured());
    }

    #[test]
    fn bundled_model_loads() {
        let config = ServerConfig {
            model_path: Some(
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/loan_model.json"),
            ),
            ..ServerConfig::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert!(state.model_loaded());
    }
}

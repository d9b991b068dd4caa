use std::path::PathBuf;

use loanwise_chat::ChatEndpoint;

/// Startup configuration for the web server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON model artifact. `None` starts the server without a model.
    pub model_path: Option<PathBuf>,
    pub chat: ChatEndpoint,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            model_path: Some(PathBuf::from("models/loan_model.json")),
            chat: ChatEndpoint::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

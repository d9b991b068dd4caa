use thiserror::Error;

/// Messages never include the API credential.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat endpoint unreachable: {0}")]
    EndpointUnreachable(String),

    #[error("chat relay is not configured: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::EndpointUnreachable("request timed out".into());
        }
        // The URL is dropped so query strings never reach logs or clients.
        Self::EndpointUnreachable(err.without_url().to_string())
    }
}

//! Router and server lifecycle.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{chat_api, chatbot_page, health_check, home, predict, predict_redirect};
use crate::{AppState, ServerConfig};

/// Build the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", get(predict_redirect).post(predict))
        .route("/chatbot", get(chatbot_page))
        .route("/chat_api", post(chat_api))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct WebServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl WebServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Load the model, build the chat relay, and wrap both in a server.
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        let state = AppState::from_config(&config).context("initialising application state")?;
        Ok(Self::new(config, state))
    }

    /// Serve until Ctrl-C.
    pub async fn start(&self) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("binding {addr}"))?;
        info!(
            addr = %listener.local_addr()?,
            model_loaded = self.state.model_loaded(),
            chat_configured = self.state.chat.is_configured(),
            "loanwise listening"
        );

        axum::serve(listener, router(self.state.clone()))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

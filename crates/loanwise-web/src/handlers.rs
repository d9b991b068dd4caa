//! Request handlers.
//!
//! No handler propagates a failure to the transport layer: prediction errors
//! are rendered into the result page, chat errors become JSON `{error}`
//! bodies.

use std::sync::Arc;

use axum::{
    Form, Json, debug_handler,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use loanwise_ai::predict as run_prediction;
use loanwise_chat::LOAN_ADVISOR_PROMPT;
use loanwise_core::{ChatHistory, LoanForm, encode};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{AppState, render};

pub const MODEL_NOT_LOADED: &str = "Error: Prediction model is not loaded.";

/// Body of `POST /chat_api`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: ChatHistory,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatFailure {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub model_loaded: bool,
    pub chat_configured: bool,
}

#[debug_handler]
pub async fn home() -> Html<&'static str> {
    Html(render::index())
}

#[debug_handler]
pub async fn chatbot_page() -> Html<&'static str> {
    Html(render::chatbot())
}

/// `GET /predict` has nothing to show without a submission.
#[debug_handler]
pub async fn predict_redirect() -> Redirect {
    Redirect::to("/")
}

#[debug_handler]
pub async fn predict(
    State(state): State<Arc<AppState>>,
    form: Result<Form<LoanForm>, FormRejection>,
) -> Html<String> {
    Html(render::prediction(&predict_text(&state, form)))
}

fn predict_text(state: &AppState, form: Result<Form<LoanForm>, FormRejection>) -> String {
    let Some(model) = state.classifier.as_deref() else {
        warn!("prediction requested but no model is loaded");
        return MODEL_NOT_LOADED.to_string();
    };

    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected prediction form");
            return format!("Error: invalid form submission: {}", rejection.body_text());
        }
    };

    let application = match form.parse() {
        Ok(app) => app,
        Err(e) => {
            warn!(error = %e, "invalid loan application");
            return format!("Error: {e}");
        }
    };

    let vector = encode(&application);
    match run_prediction(&vector, Some(model)) {
        Ok(result) => {
            info!(result = result.as_str(), "loan prediction");
            format!("Loan Status is: {}", result.as_str())
        }
        Err(e) => {
            error!(error = %e, "prediction failed");
            format!("Error: {e}")
        }
    }
}

#[debug_handler]
pub async fn chat_api(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected chat request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ChatFailure {
                    error: format!("invalid request: {}", rejection.body_text()),
                }),
            )
                .into_response();
        }
    };

    match state.chat.relay(&request.history, LOAN_ADVISOR_PROMPT).await {
        Ok(text) => Json(ChatReply { text }).into_response(),
        Err(e) => {
            error!(error = %e, "chat relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatFailure {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[debug_handler]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        model_loaded: state.model_loaded(),
        chat_configured: state.chat.is_configured(),
    })
}

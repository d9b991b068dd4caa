//! HTTP client for the `generateContent` endpoint.

use std::fmt;
use std::time::Duration;

use loanwise_core::ChatTurn;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ChatError;

/// Reply returned when the endpoint answers without any candidate text.
pub const FALLBACK_REPLY: &str = "Sorry, I could not process that request.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Where and how to reach the generative-language API.
#[derive(Clone)]
pub struct ChatEndpoint {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ChatEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ChatEndpoint {
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl fmt::Debug for ChatEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatEndpoint")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Request body for `generateContent`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: &'a [ChatTurn],
    tools: [Tool; 1],
    system_instruction: SystemInstruction<'a>,
}

#[derive(Serialize)]
struct Tool {
    google_search: Empty,
}

#[derive(Serialize)]
struct Empty {}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Build the `generateContent` payload: the history verbatim, the web search
/// tool, and the system prompt as a single instruction part.
pub fn build_payload(history: &[ChatTurn], system_prompt: &str) -> serde_json::Value {
    let request = GenerateRequest {
        contents: history,
        tools: [Tool {
            google_search: Empty {},
        }],
        system_instruction: SystemInstruction {
            parts: [TextPart {
                text: system_prompt,
            }],
        },
    };
    // Serializing plain structs of strings cannot fail.
    serde_json::to_value(request).unwrap_or_default()
}

/// Text of the first part of the first candidate, or [`FALLBACK_REPLY`].
pub fn extract_text(response: serde_json::Value) -> String {
    let response: GenerateResponse = serde_json::from_value(response).unwrap_or_default();
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

/// Chat relay shared by all requests.
///
/// Holds only an immutable, internally pooled HTTP client, so concurrent
/// requests never contend on a lock while waiting for the endpoint.
#[derive(Debug, Clone)]
pub struct ChatRelay {
    client: reqwest::Client,
    endpoint: ChatEndpoint,
}

impl ChatRelay {
    pub fn new(endpoint: ChatEndpoint) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(|e| ChatError::Configuration(format!("HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// Whether an API credential is available.
    pub fn is_configured(&self) -> bool {
        self.endpoint
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Send the conversation to the endpoint and return the reply text.
    pub async fn relay(
        &self,
        history: &[ChatTurn],
        system_prompt: &str,
    ) -> Result<String, ChatError> {
        let api_key = match self.endpoint.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => {
                return Err(ChatError::Configuration(
                    "no API credential configured (set GEMINI_API_KEY)".into(),
                ));
            }
        };

        let payload = build_payload(history, system_prompt);
        info!(
            model = %self.endpoint.model,
            turns = history.len(),
            "relaying chat request"
        );

        let resp = self
            .client
            .post(self.endpoint.url())
            .header(API_KEY_HEADER, api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "chat endpoint returned an error");
            return Err(ChatError::EndpointUnreachable(format!(
                "endpoint returned {status}"
            )));
        }

        let body: serde_json::Value = resp.json().await?;
        let text = extract_text(body);
        info!(chars = text.len(), "chat reply received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    const KEY: &str = "test-secret-key";

    #[derive(Clone)]
    struct Fake {
        status: StatusCode,
        reply: Value,
        delay: Duration,
        seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    async fn fake_generate(
        State(fake): State<Fake>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let key = headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        fake.seen.lock().unwrap().push((key, body));
        tokio::time::sleep(fake.delay).await;
        (fake.status, Json(fake.reply.clone()))
    }

    /// Serve a fake `generateContent` endpoint and return its base URL.
    async fn serve(fake: Fake) -> String {
        let app = Router::new()
            .route("/v1beta/models/:call", post(fake_generate))
            .with_state(fake);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1beta")
    }

    fn fake(status: StatusCode, reply: Value) -> Fake {
        Fake {
            status,
            reply,
            delay: Duration::ZERO,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn relay_to(base_url: String, api_key: Option<&str>) -> ChatRelay {
        ChatRelay::new(ChatEndpoint {
            base_url,
            model: "gemini-test".into(),
            api_key: api_key.map(str::to_string),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn reply(text: &str) -> Value {
        json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]})
    }

    #[test]
    fn payload_shape() {
        let history = vec![ChatTurn::user("hi"), ChatTurn::model("hello")];
        let payload = build_payload(&history, "be brief");
        assert_eq!(
            payload,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "model", "parts": [{"text": "hello"}]}
                ],
                "tools": [{"google_search": {}}],
                "systemInstruction": {"parts": [{"text": "be brief"}]}
            })
        );
    }

    #[test]
    fn extract_first_candidate_first_part() {
        let body = json!({"candidates": [
            {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
            {"content": {"parts": [{"text": "other"}]}}
        ]});
        assert_eq!(extract_text(body), "first");
    }

    #[test]
    fn extract_falls_back_on_missing_levels() {
        for body in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{}]}),
            json!({"candidates": [{"content": {}}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"functionCall": {}}]}}]}),
            json!({"candidates": "nope"}),
            json!(null),
        ] {
            assert_eq!(extract_text(body.clone()), FALLBACK_REPLY, "{body}");
        }
    }

    #[test]
    fn url_joins_model_and_method() {
        let endpoint = ChatEndpoint {
            base_url: "http://localhost:9000/v1beta/".into(),
            model: "m".into(),
            ..ChatEndpoint::default()
        };
        assert_eq!(
            endpoint.url(),
            "http://localhost:9000/v1beta/models/m:generateContent"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let endpoint = ChatEndpoint {
            api_key: Some(KEY.into()),
            ..ChatEndpoint::default()
        };
        let debug = format!("{endpoint:?}");
        assert!(!debug.contains(KEY));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn relay_returns_reply_text() {
        let fake = fake(StatusCode::OK, reply("Credit history matters most."));
        let seen = fake.seen.clone();
        let relay = relay_to(serve(fake).await, Some(KEY));

        let text = relay.relay(&[], crate::LOAN_ADVISOR_PROMPT).await.unwrap();
        assert_eq!(text, "Credit history matters most.");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (key, body) = &seen[0];
        assert_eq!(key.as_deref(), Some(KEY));
        assert_eq!(body["contents"], json!([]));
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            crate::LOAN_ADVISOR_PROMPT
        );
    }

    #[tokio::test]
    async fn relay_forwards_history_verbatim() {
        let fake = fake(StatusCode::OK, reply("ok"));
        let seen = fake.seen.clone();
        let relay = relay_to(serve(fake).await, Some(KEY));

        let history = vec![
            ChatTurn::user("What is credit history?"),
            ChatTurn::model("A record of repayments."),
            ChatTurn::user("Does it matter?"),
        ];
        relay.relay(&history, "prompt").await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].1["contents"], serde_json::to_value(&history).unwrap());
    }

    #[tokio::test]
    async fn relay_falls_back_on_empty_candidates() {
        let relay = relay_to(
            serve(fake(StatusCode::OK, json!({"candidates": []}))).await,
            Some(KEY),
        );
        assert_eq!(relay.relay(&[], "p").await.unwrap(), FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn relay_keeps_empty_candidate_text() {
        let relay = relay_to(serve(fake(StatusCode::OK, reply(""))).await, Some(KEY));
        assert_eq!(relay.relay(&[], "p").await.unwrap(), "");
    }

    #[tokio::test]
    async fn non_json_success_body_is_unreachable() {
        let app = Router::new().route(
            "/v1beta/models/:call",
            post(|| async { "<html>gateway page</html>" }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let relay = relay_to(format!("http://{addr}/v1beta"), Some(KEY));
        let err = relay.relay(&[ChatTurn::user("hi")], "p").await.unwrap_err();
        assert!(matches!(err, ChatError::EndpointUnreachable(_)), "{err}");
        assert!(!err.to_string().contains(KEY));
    }

    #[tokio::test]
    async fn missing_key_is_configuration_error() {
        let fake = fake(StatusCode::OK, reply("unused"));
        let seen = fake.seen.clone();
        let relay = relay_to(serve(fake).await, None);
        assert!(!relay.is_configured());

        let err = relay.relay(&[], "p").await.unwrap_err();
        assert!(matches!(err, ChatError::Configuration(_)), "{err}");
        assert!(seen.lock().unwrap().is_empty(), "nothing should be sent");

        let blank = relay_to("http://127.0.0.1:1".into(), Some("   "));
        assert!(matches!(
            blank.relay(&[], "p").await,
            Err(ChatError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn error_status_is_unreachable() {
        let relay = relay_to(
            serve(fake(
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"error": {"message": "overloaded"}}),
            ))
            .await,
            Some(KEY),
        );
        let err = relay.relay(&[], "p").await.unwrap_err();
        assert!(matches!(err, ChatError::EndpointUnreachable(_)));
        let msg = err.to_string();
        assert!(msg.contains("503"), "{msg}");
        assert!(!msg.contains(KEY));
    }

    #[tokio::test]
    async fn connection_refused_is_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let relay = relay_to(format!("http://{addr}"), Some(KEY));
        let err = relay.relay(&[ChatTurn::user("hi")], "p").await.unwrap_err();
        assert!(matches!(err, ChatError::EndpointUnreachable(_)), "{err}");
        assert!(!err.to_string().contains(KEY));
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let mut slow = fake(StatusCode::OK, reply("late"));
        slow.delay = Duration::from_secs(3);
        let base_url = serve(slow).await;
        let relay = ChatRelay::new(ChatEndpoint {
            base_url,
            model: "gemini-test".into(),
            api_key: Some(KEY.into()),
            timeout: Duration::from_millis(200),
        })
        .unwrap();

        let err = relay.relay(&[], "p").await.unwrap_err();
        assert_eq!(
            err,
            ChatError::EndpointUnreachable("request timed out".into())
        );
    }
}

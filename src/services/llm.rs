//! Chat-completions client for general conversation.
//!
//! Speaks the Mistral `/chat/completions` wire format, which any
//! OpenAI-compatible endpoint also accepts. Every call is one-shot: a fixed
//! system instruction plus the user's text, no history.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

const CONNECT_TIMEOUT_SECS: u64 = 10;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant for a design studio. Answer clearly and \
concisely. If the user wants a graphic, banner, poster, logo or thumbnail, tell them to ask you to design it.";

/// Returned instead of calling out when no API key is configured.
pub const LLM_UNAVAILABLE_MESSAGE: &str =
    "The AI chat service isn't configured right now, so I can't answer that. Design requests still work!";

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    ApiRequest(String),

    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    #[error("API response parse failed: {0}")]
    ApiParse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Anything that can answer a free-form chat message.
#[async_trait]
pub trait LlmQuery: Send + Sync {
    async fn query(&self, user_input: &str, session_id: &str) -> Result<String, LlmError>;
}

pub struct LlmClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, api_key: &str, body: &CompletionRequest<'_>) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmQuery for LlmClient {
    async fn query(&self, user_input: &str, session_id: &str) -> Result<String, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!(session_id, "no LLM API key configured, skipping completion");
            return Ok(LLM_UNAVAILABLE_MESSAGE.to_string());
        };

        let body = build_request(&self.model, self.temperature, user_input);
        tracing::debug!(session_id, model = %self.model, "requesting chat completion");
        let text = self.send(api_key, &body).await?;
        parse_completion(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn build_request<'a>(model: &'a str, temperature: f32, user_input: &'a str) -> CompletionRequest<'a> {
    CompletionRequest {
        model,
        temperature,
        messages: vec![
            WireMessage { role: "system", content: SYSTEM_INSTRUCTION },
            WireMessage { role: "user", content: user_input },
        ],
    }
}

fn parse_completion(text: &str) -> Result<String, LlmError> {
    let response: CompletionResponse =
        serde_json::from_str(text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| LlmError::ApiParse("response contained no message content".into()))?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LLM_MODEL;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        routing::post,
    };
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    fn config_at(base_url: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            api_key: api_key.map(String::from),
            base_url: base_url.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.7,
            timeout: Duration::from_secs(2),
        }
    }

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn request_carries_system_instruction_and_temperature() {
        let body = serde_json::to_value(build_request("m", 0.2, "hi there")).unwrap();
        assert_eq!(body["model"], "m");
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_INSTRUCTION);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hi there");
    }

    #[test]
    fn parse_text_response() {
        let json = json!({
            "id": "cmpl-1",
            "model": "mistral-small-latest",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "  Paris.  " },
                "finish_reason": "stop"
            }]
        })
        .to_string();
        assert_eq!(parse_completion(&json).unwrap(), "Paris.");
    }

    #[test]
    fn parse_missing_choices() {
        let json = json!({ "choices": [] }).to_string();
        assert!(matches!(parse_completion(&json), Err(LlmError::ApiParse(_))));
    }

    #[test]
    fn parse_null_content() {
        let json = json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })
        .to_string();
        assert!(parse_completion(&json).is_err());
    }

    #[test]
    fn parse_garbage() {
        assert!(matches!(parse_completion("<html>"), Err(LlmError::ApiParse(_))));
    }

    #[tokio::test]
    async fn missing_key_degrades_to_notice() {
        // Nothing listens here; a request would fail, not return the notice.
        let client = LlmClient::new(&config_at("http://127.0.0.1:9", None)).unwrap();
        assert!(!client.is_configured());
        let reply = client.query("hello", "s-1").await.unwrap();
        assert_eq!(reply, LLM_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn completion_is_sent_with_bearer_auth() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
        let seen_in_handler = seen.clone();
        let router = Router::new().route(
            "/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = seen_in_handler.clone();
                async move {
                    let auth = headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *seen.lock().unwrap() = Some((auth, body));
                    Json(json!({
                        "choices": [{ "message": { "role": "assistant", "content": "  Hi there!  " } }]
                    }))
                }
            }),
        );
        let base_url = spawn_server(router).await;

        let client = LlmClient::new(&config_at(&base_url, Some("test-key"))).unwrap();
        let reply = client.query("hello", "s-1").await.unwrap();

        assert_eq!(reply, "Hi there!");
        let (auth, body) = seen.lock().unwrap().take().unwrap();
        assert_eq!(auth, "Bearer test-key");
        assert_eq!(body["model"], DEFAULT_LLM_MODEL);
        assert_eq!(body["messages"][1]["content"], "hello");
    }

    #[tokio::test]
    async fn non_200_maps_to_api_response() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        );
        let base_url = spawn_server(router).await;

        let client = LlmClient::new(&config_at(&base_url, Some("test-key"))).unwrap();
        let err = client.query("hello", "s-1").await.unwrap_err();

        assert!(matches!(err, LlmError::ApiResponse { status: 503, ref body } if body == "overloaded"));
    }

    #[tokio::test]
    async fn closed_port_maps_to_api_request() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = LlmClient::new(&config_at(&format!("http://{addr}"), Some("test-key"))).unwrap();
        let err = client.query("hello", "s-1").await.unwrap_err();

        assert!(matches!(err, LlmError::ApiRequest(_)));
    }

    #[tokio::test]
    async fn slow_server_times_out_as_api_request() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({ "choices": [] }))
            }),
        );
        let base_url = spawn_server(router).await;

        let mut config = config_at(&base_url, Some("test-key"));
        config.timeout = Duration::from_millis(200);
        let client = LlmClient::new(&config).unwrap();
        let err = client.query("hello", "s-1").await.unwrap_err();

        assert!(matches!(err, LlmError::ApiRequest(_)));
    }
}

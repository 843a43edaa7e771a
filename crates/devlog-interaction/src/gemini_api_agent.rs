//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls `models/<model>:generateContent` with a single user text part and
//! returns the first text part of the answer.

use async_trait::async_trait;
use devlog_core::config::{Credential, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, GeneratorConfig};
use devlog_core::error::{DevlogError, Result};
use devlog_core::generator::{RetryPolicy, TextGenerator};
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Text generator that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }

    /// Builds an agent from a resolved credential and the generator settings.
    ///
    /// A model named in the secret file wins over the configured one.
    pub fn from_config(credential: &Credential, config: &GeneratorConfig) -> Self {
        let model = credential
            .model_override
            .clone()
            .unwrap_or_else(|| config.model.clone());
        Self::new(credential.api_key.clone(), model).with_base_url(config.base_url.clone())
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at another endpoint root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| DevlogError::Collaborator {
                retryable: err.is_connect() || err.is_timeout(),
                message: format!("Gemini API request failed: {}", err.without_url()),
                status_code: None,
                retry_after: None,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            DevlogError::collaborator(format!(
                "Failed to parse Gemini response: {}",
                err.without_url()
            ))
        })?;

        extract_text_response(parsed)
    }
}

impl Default for GeminiApiAgent {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_GEMINI_MODEL)
    }
}

#[async_trait]
impl TextGenerator for GeminiApiAgent {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(DevlogError::collaborator("Gemini payload must include text"));
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending generateContent request");
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            DevlogError::collaborator("Gemini API returned no text in the response candidates")
        })
}

fn map_http_error(status: StatusCode, body: String, retry_after: Option<Duration>) -> DevlogError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    RetryPolicy::classify_with_retry_after(status.as_u16(), retry_after)
        .into_error(status.as_u16(), message)
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn agent_for(server: &MockServer) -> GeminiApiAgent {
        GeminiApiAgent::new("test-key", "gemini-2.5-flash").with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_returns_first_text_part() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gemini-2.5-flash:generateContent"))
            .and(header(API_KEY_HEADER, "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "write it" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "I worked on the codec." }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = agent_for(&server).generate("write it").await.unwrap();
        assert_eq!(text, "I worked on the codec.");
    }

    #[tokio::test]
    async fn test_rate_limit_is_retryable_with_hint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "7")
                    .set_body_json(serde_json::json!({
                        "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
                    })),
            )
            .mount(&server)
            .await;

        let err = agent_for(&server).generate("hello").await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        assert!(err.to_string().contains("RESOURCE_EXHAUSTED: Quota exceeded"));
    }

    #[tokio::test]
    async fn test_bad_key_is_not_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = agent_for(&server).generate("hello").await.unwrap_err();
        assert!(!err.is_retryable());
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_retryable_and_hides_key() {
        let agent = GeminiApiAgent::new("secret-key", "m").with_base_url("http://127.0.0.1:1");
        let err = agent.generate("hello").await.unwrap_err();
        assert!(err.is_collaborator());
        assert!(err.is_retryable());
        assert!(!err.to_string().contains("secret-key"));
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected_without_request() {
        let err = GeminiApiAgent::default().generate("   ").await.unwrap_err();
        assert!(err.is_collaborator());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(extract_text_response(response).is_err());

        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{}, {"text": "b"}]}}]}"#)
                .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "b");
    }

    #[test]
    fn test_map_http_error_plain_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream".into(), None);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("HTTP 502: upstream"));
    }

    #[test]
    fn test_from_config_prefers_secret_model() {
        let credential = Credential {
            api_key: "k".into(),
            model_override: Some("gemini-2.5-pro".into()),
            source: "test".into(),
        };
        let config = GeneratorConfig::default();
        let agent = GeminiApiAgent::from_config(&credential, &config);
        assert_eq!(agent.model(), "gemini-2.5-pro");
        assert_eq!(agent.endpoint(), format!("{DEFAULT_GEMINI_BASE_URL}/gemini-2.5-pro:generateContent"));

        let agent = agent.with_model("other").with_base_url("http://proxy/");
        assert_eq!(agent.endpoint(), "http://proxy/other:generateContent");
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::CompletionService;
use crate::connector::adapter::{HttpRequest, HttpTransport};
use crate::domain::{ApiKey, CompletionRequest, CompletionResult, DomainError, DEFAULT_MODEL};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Minimal subset of the chat completion response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ApiMessage>,
}

#[derive(Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

/// Client for the OpenAI chat completions API (and compatible servers).
///
/// Makes a single POST per call with bearer auth and JSON content
/// negotiation. Non-2xx replies, transport failures, and replies without a
/// first choice's message content all become [`CompletionResult::Failure`].
///
/// Configuration via environment (see [`from_env`](Self::from_env)):
///
/// ```text
/// OPENAI_BASE_URL=https://api.openai.com
/// OPENAI_MODEL=gpt-3.5-turbo
/// ```
pub struct OpenAiCompletionClient {
    transport: Arc<dyn HttpTransport>,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiCompletionClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            model: model.into(),
            url: completions_url(&base_url.into()),
        }
    }

    /// Construct with the default model and endpoint.
    pub fn with_defaults(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(transport, DEFAULT_MODEL, DEFAULT_BASE_URL)
    }

    /// | Variable          | Default                  |
    /// |-------------------|--------------------------|
    /// | `OPENAI_BASE_URL` | `https://api.openai.com` |
    /// | `OPENAI_MODEL`    | `gpt-3.5-turbo`          |
    pub fn from_env(transport: Arc<dyn HttpTransport>) -> Self {
        let base = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(transport, model, base)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.url = completions_url(&base_url.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_request(&self, prompt: &str, api_key: &ApiKey) -> Result<HttpRequest, DomainError> {
        let body = serde_json::to_string(&CompletionRequest::new(self.model.as_str(), prompt))
            .map_err(|e| DomainError::internal(format!("failed to encode request: {e}")))?;

        Ok(HttpRequest::post(&self.url, body)
            .with_header("Authorization", api_key.bearer())
            .with_header("Content-Type", "application/json")
            .with_header("Accept", "application/json"))
    }

    async fn try_fetch(&self, prompt: &str, api_key: &ApiKey) -> Result<String, DomainError> {
        let request = self.build_request(prompt, api_key)?;
        let response = self.transport.post(request).await?;

        if !response.is_success() {
            warn!(
                "OpenAiCompletionClient: API returned {}: {}",
                response.status, response.body
            );
            return Err(DomainError::http(response.status, response.body));
        }

        debug!("OpenAiCompletionClient raw response: {}", response.body);
        Self::extract_content(&response.body)
    }

    /// Pull `choices[0].message.content` out of a success body.
    fn extract_content(body: &str) -> Result<String, DomainError> {
        let api_response: ApiResponse = serde_json::from_str(body)
            .map_err(|e| DomainError::parse(format!("malformed completion response: {e}")))?;

        api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::parse("completion response contained no choices"))?
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| DomainError::parse("first choice has no message content"))
    }
}

fn completions_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_PATH)
}

#[async_trait]
impl CompletionService for OpenAiCompletionClient {
    async fn fetch_completion(&self, prompt: &str, api_key: &ApiKey) -> CompletionResult {
        self.try_fetch(prompt, api_key).await.into()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

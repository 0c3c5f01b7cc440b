//! Claude API client for copy generation.
//!
//! One non-streaming Messages API call per generation. The text blocks of the
//! response are returned unmodified.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ClaudeConfig;

use super::CopyGenerator;
use super::error::{ApiErrorResponse, ClaudeError};
use super::prompts::Prompt;
use super::types::{ChatRequest, ChatResponse, Message};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Claude API client.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    model: String,
}

impl std::fmt::Debug for ClaudeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeClient")
            .field("model", &self.inner.model)
            .finish_non_exhaustive()
    }
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Errors
    ///
    /// Returns `ClaudeError::Unauthorized` if the API key cannot be sent as a
    /// header, or `ClaudeError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ClaudeConfig) -> Result<Self, ClaudeError> {
        let api_key = HeaderValue::from_str(config.api_key.expose_secret()).map_err(|_| {
            ClaudeError::Unauthorized("API key contains invalid header characters".to_string())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                model: config.model.clone(),
            }),
        })
    }

    /// Generate copy for `tool` from the user's `input`.
    ///
    /// # Errors
    ///
    /// Returns `ClaudeError::EmptyInput` without calling the API if `input`
    /// is blank, or an error if the API request fails.
    #[instrument(skip(self, input), fields(model = %self.inner.model, input_len = input.len()))]
    pub async fn generate_copy(&self, tool: &str, input: &str) -> Result<String, ClaudeError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ClaudeError::EmptyInput);
        }

        let prompt = Prompt::build(tool, input);
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message::user(prompt.user.clone())],
            system: Some(prompt.system().to_string()),
            temperature: Some(DEFAULT_TEMPERATURE),
        };

        let response = self
            .inner
            .client
            .post(ANTHROPIC_API_URL)
            .json(&request)
            .send()
            .await?;

        let response = handle_response(response).await?;
        tracing::info!(
            response_id = %response.id,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Copy generated"
        );
        Ok(response.text())
    }
}

#[async_trait::async_trait]
impl CopyGenerator for ClaudeClient {
    async fn generate_copy(&self, tool: &str, input: &str) -> Result<String, ClaudeError> {
        Self::generate_copy(self, tool, input).await
    }
}

/// Handle a response, successful or not.
async fn handle_response(response: reqwest::Response) -> Result<ChatResponse, ClaudeError> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ClaudeError::Parse(format!("Failed to parse response: {e}")))
    } else {
        Err(handle_error_status(status, response).await)
    }
}

/// Handle an error status code.
async fn handle_error_status(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> ClaudeError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return ClaudeError::RateLimited(retry_after);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return ClaudeError::Unauthorized("Invalid API key".to_string());
    }

    match response.text().await {
        Ok(body) => parse_error_body(body),
        Err(e) => ClaudeError::Http(e),
    }
}

fn parse_error_body(body: String) -> ClaudeError {
    match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(api_error) => ClaudeError::Api {
            error_type: api_error.error.error_type,
            message: api_error.error.message,
        },
        Err(_) => ClaudeError::Api {
            error_type: "unknown".to_string(),
            message: body,
        },
    }
}

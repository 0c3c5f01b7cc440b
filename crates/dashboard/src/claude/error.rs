//! Error types for the Claude API client.

use thiserror::Error;

/// Errors that can occur when generating copy with Claude.
#[derive(Debug, Error)]
pub enum ClaudeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Claude API returned an error.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the API.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Nothing to generate from.
    #[error("input is empty")]
    EmptyInput,

    /// No API key configured.
    #[error("AI generation is not configured")]
    NotConfigured,
}

impl ClaudeError {
    /// Message safe to show in the workspace output panel.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "Describe what you need before generating.".to_string(),
            Self::NotConfigured => {
                "AI generation is not configured. Set CLAUDE_API_KEY and restart.".to_string()
            }
            Self::RateLimited(secs) => {
                format!("Too many requests. Try again in {secs} seconds.")
            }
            Self::Unauthorized(_) => "The AI service rejected the configured API key.".to_string(),
            Self::Http(_) | Self::Api { .. } | Self::Parse(_) => {
                "Failed to generate copy. Please try again.".to_string()
            }
        }
    }
}

/// API error response from Claude.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
}

//! Claude API integration for copy generation.
//!
//! Handlers depend on the [`CopyGenerator`] trait rather than on
//! [`ClaudeClient`] directly, so tests can plug in a canned generator.

mod client;
mod error;
pub mod prompts;
mod types;

pub use client::ClaudeClient;
pub use error::{ApiError, ApiErrorResponse, ClaudeError};
pub use prompts::{MAGIC_BOX, Persona, Prompt};
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message, StopReason, Usage};

/// Something that turns a tool id and user input into marketing copy.
#[async_trait::async_trait]
pub trait CopyGenerator: Send + Sync {
    /// Generate copy for `tool` (a catalog tool id or [`MAGIC_BOX`]).
    ///
    /// # Errors
    ///
    /// Returns `ClaudeError::EmptyInput` for blank input, or any error from
    /// the backing service.
    async fn generate_copy(&self, tool: &str, input: &str) -> Result<String, ClaudeError>;
}

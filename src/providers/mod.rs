use crate::config::Provider;
use crate::core::error::SwaboxError;
use async_trait::async_trait;

pub mod anthropic;
pub mod base_client;
pub mod factory;
pub mod manager;
pub mod openai;
pub mod prompt;

pub use manager::ProviderManager;

/// Request-scoped context for a suggestion. Built fresh for every call.
#[derive(Debug, Clone, Default)]
pub struct AiContext {
    /// Most recent history entries, oldest first, one rendered line each.
    pub command_history: Vec<String>,
    pub current_directory: String,
    pub current_task: String,
}

/// A remote completion backend.
///
/// Implementations only supply `complete`; the two user-facing operations
/// are provided on top of it and never fail, turning every error into a
/// displayable string.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    fn provider(&self) -> Provider;

    fn model(&self) -> &str;

    /// Base URL requests are sent to.
    fn endpoint(&self) -> &str;

    /// Sends one user prompt and returns the first completion's text.
    async fn complete(&self, prompt: &str) -> Result<String, SwaboxError>;

    async fn get_suggestion(&self, context: &AiContext) -> String {
        match self.complete(&prompt::suggestion_prompt(context)).await {
            Ok(text) if text.trim().is_empty() => "No suggestion available".to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e @ SwaboxError::MissingApiKey { .. }) => e.to_string(),
            Err(e) => format!("Error getting suggestion: {}", error_detail(&e)),
        }
    }

    async fn process_natural_language(&self, query: &str) -> String {
        match self.complete(&prompt::translation_prompt(query)).await {
            Ok(text) => {
                let command = prompt::process_response(&text);
                if command.is_empty() {
                    "Could not process the request".to_string()
                } else {
                    command
                }
            }
            Err(e @ SwaboxError::MissingApiKey { .. }) => e.to_string(),
            Err(e) => format!("Error processing request: {}", error_detail(&e)),
        }
    }
}

/// Message of an error without the variant prefix for API failures.
fn error_detail(err: &SwaboxError) -> String {
    match err {
        SwaboxError::Api(detail) => detail.clone(),
        other => other.to_string(),
    }
}

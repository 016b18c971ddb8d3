use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Interface for a stateless language model
/// Stateless means the LLM doesn't store memory, system prompts, or user messages
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Generate a chat completion and return the text of the first choice
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        system: Option<&str>,
    ) -> Result<String, CompletionError>;
}

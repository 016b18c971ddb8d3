use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stateless_llm_interface::{ChatMessage, StatelessLLMInterface};
use crate::error::CompletionError;

/// OpenAI compatible LLM implementation
/// Talks to any `/chat/completions` endpoint (OpenAI, Groq, Ollama, DeepSeek, ...)
pub struct OpenAICompatibleLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: String,
    organization_id: Option<String>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
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

impl OpenAICompatibleLLM {
    pub fn new(
        client: Client,
        model: String,
        base_url: String,
        api_key: String,
        organization_id: Option<String>,
        temperature: f32,
    ) -> Self {
        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            model, base_url
        );
        Self {
            client,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            organization_id,
            temperature,
        }
    }
}

/// Pull the first choice's text out of a chat-completions body
fn first_choice_text(body: ChatCompletionResponse) -> Result<String, CompletionError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        system: Option<&str>,
    ) -> Result<String, CompletionError> {
        let mut request_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(sys) = system {
            request_messages.push(ChatMessage {
                role: "system".to_string(),
                content: sys.to_string(),
            });
        }
        request_messages.extend_from_slice(messages);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: request_messages,
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {} (model={})", url, self.model);

        let mut request = self.client.post(&url).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }
        if let Some(org) = &self.organization_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        first_choice_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_choice() {
        let body: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        }))
        .unwrap();
        assert_eq!(first_choice_text(body).unwrap(), "first");
    }

    #[test]
    fn missing_choices_is_empty_response() {
        let body: ChatCompletionResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(matches!(
            first_choice_text(body),
            Err(CompletionError::EmptyResponse)
        ));
    }

    #[test]
    fn null_content_is_empty_response() {
        let body: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert!(matches!(
            first_choice_text(body),
            Err(CompletionError::EmptyResponse)
        ));
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::stateless_llm_interface::{ChatMessage, StatelessLLMInterface};
use crate::error::CompletionError;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude LLM implementation (Anthropic messages API)
pub struct ClaudeLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ClaudeLLM {
    pub fn new(
        client: Client,
        base_url: String,
        model: String,
        api_key: String,
        max_tokens: u32,
    ) -> Self {
        info!("Initialized ClaudeLLM: model={}, base_url={}", model, base_url);
        Self {
            client,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            max_tokens,
        }
    }
}

fn first_text_block(body: MessagesResponse) -> Result<String, CompletionError> {
    body.content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or(CompletionError::EmptyResponse)
}

#[async_trait]
impl StatelessLLMInterface for ClaudeLLM {
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        system: Option<&str>,
    ) -> Result<String, CompletionError> {
        // Claude takes the system prompt as a top-level field, not a message
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages,
        };

        let url = format!("{}/v1/messages", self.base_url);
        debug!("POST {} (model={})", url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        first_text_block(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_non_text_blocks() {
        let body: MessagesResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "tool_use", "id": "t1"},
                {"type": "text", "text": "use a match here"}
            ]
        }))
        .unwrap();
        assert_eq!(first_text_block(body).unwrap(), "use a match here");
    }

    #[test]
    fn system_prompt_is_top_level() {
        let messages = vec![ChatMessage::user("x=1")];
        let body = MessagesRequest {
            model: "claude-3-haiku-20240307",
            max_tokens: 256,
            system: Some("be brief"),
            messages: &messages,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["system"], "be brief");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
    }
}

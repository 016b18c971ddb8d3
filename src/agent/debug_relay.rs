//! Code review relay: wraps a snippet in a fixed prompt and asks the LLM.

use std::sync::Arc;
use tracing::{error, info};

use crate::agent::stateless_llm::{ChatMessage, StatelessLLMInterface};
use crate::error::{CompletionError, DEBUG_FAILURE_MESSAGE};

pub const DEBUG_SYSTEM_PROMPT: &str = "Analyze the code and identify any bugs or improvements.";

/// User message for the standalone debugging check
pub const DEBUG_CHECK_PROMPT: &str = "Run an AI-powered debugging check.";

pub fn debug_user_prompt(code: Option<&str>) -> String {
    format!(
        "Debug the following code and suggest fixes:\n\n{}",
        code.unwrap_or_default()
    )
}

#[derive(Clone)]
pub struct DebugRelay {
    llm: Arc<dyn StatelessLLMInterface>,
}

impl DebugRelay {
    pub fn new(llm: Arc<dyn StatelessLLMInterface>) -> Self {
        Self { llm }
    }

    /// Ask for suggestions on `code`; the snippet itself is not validated
    pub async fn suggest(&self, code: Option<&str>) -> Result<String, CompletionError> {
        let messages = [ChatMessage::user(debug_user_prompt(code))];
        self.llm
            .chat_completion(&messages, Some(DEBUG_SYSTEM_PROMPT))
            .await
    }

    /// Project-wide debugging check. Never fails: upstream errors are
    /// logged and replaced by a generic message.
    pub async fn run_ai_debugging(&self) -> String {
        let messages = [ChatMessage::user(DEBUG_CHECK_PROMPT)];
        match self
            .llm
            .chat_completion(&messages, Some(DEBUG_SYSTEM_PROMPT))
            .await
        {
            Ok(output) => {
                info!("AI Debugging Output: {}", output);
                output
            }
            Err(e) => {
                error!("AI Debugging Failed: {}", e);
                DEBUG_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the last prompt and answers with a canned result
    struct RecordingLLM {
        reply: Option<String>,
        seen: Mutex<Vec<(Vec<ChatMessage>, Option<String>)>>,
    }

    impl RecordingLLM {
        fn new(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl StatelessLLMInterface for RecordingLLM {
        async fn chat_completion(
            &self,
            messages: &[ChatMessage],
            system: Option<&str>,
        ) -> Result<String, CompletionError> {
            self.seen
                .lock()
                .unwrap()
                .push((messages.to_vec(), system.map(str::to_string)));
            self.reply.clone().ok_or(CompletionError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn embeds_code_in_prompt_template() {
        let llm = Arc::new(RecordingLLM::new(Some("looks fine")));
        let relay = DebugRelay::new(llm.clone());

        let out = relay.suggest(Some("x=1")).await.unwrap();
        assert_eq!(out, "looks fine");

        let seen = llm.seen.lock().unwrap();
        let (messages, system) = &seen[0];
        assert_eq!(system.as_deref(), Some(DEBUG_SYSTEM_PROMPT));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        assert!(messages[0].content.ends_with("\n\nx=1"));
    }

    #[tokio::test]
    async fn absent_code_still_calls_upstream() {
        let llm = Arc::new(RecordingLLM::new(Some("nothing to review")));
        let relay = DebugRelay::new(llm.clone());

        assert_eq!(relay.suggest(None).await.unwrap(), "nothing to review");
        let seen = llm.seen.lock().unwrap();
        assert_eq!(
            seen[0].0[0].content,
            "Debug the following code and suggest fixes:\n\n"
        );
    }

    #[tokio::test]
    async fn suggest_propagates_failure() {
        let relay = DebugRelay::new(Arc::new(RecordingLLM::new(None)));
        assert!(relay.suggest(Some("x")).await.is_err());
    }

    #[tokio::test]
    async fn debugging_check_swallows_failure() {
        let relay = DebugRelay::new(Arc::new(RecordingLLM::new(None)));
        assert_eq!(relay.run_ai_debugging().await, DEBUG_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn debugging_check_uses_fixed_prompt() {
        let llm = Arc::new(RecordingLLM::new(Some("all good")));
        let relay = DebugRelay::new(llm.clone());

        assert_eq!(relay.run_ai_debugging().await, "all good");
        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen[0].0[0].content, DEBUG_CHECK_PROMPT);
    }
}

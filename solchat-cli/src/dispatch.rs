//! Hand-off of submitted input to the AI backend.
//!
//! The backend itself lives elsewhere; the CLI ships an echo dispatcher that
//! shows exactly what would be sent.

use async_trait::async_trait;
use solchat_core::ParsedCommand;

/// One submitted chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Text sent to the model: the command's prompt, or the raw message.
    pub prompt: String,
    pub command: Option<ParsedCommand>,
}

impl ChatRequest {
    pub fn from_command(command: ParsedCommand) -> Self {
        Self {
            prompt: command.prompt().to_string(),
            command: Some(command),
        }
    }

    pub fn from_message(text: &str) -> Self {
        Self {
            prompt: text.trim().to_string(),
            command: None,
        }
    }
}

/// Sends a chat request somewhere and returns the text to show the user.
#[async_trait]
pub trait PromptDispatcher: Send + Sync {
    async fn dispatch(&self, request: &ChatRequest) -> anyhow::Result<String>;
}

/// Renders the request instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoDispatcher {
    pub json: bool,
}

#[async_trait]
impl PromptDispatcher for EchoDispatcher {
    async fn dispatch(&self, request: &ChatRequest) -> anyhow::Result<String> {
        tracing::info!(
            command = request.command.as_ref().map(|c| c.trigger()),
            "dispatching prompt"
        );
        if self.json {
            let body = match &request.command {
                Some(command) => serde_json::to_value(command)?,
                None => serde_json::json!({ "type": "message", "prompt": request.prompt }),
            };
            return Ok(serde_json::to_string_pretty(&body)?);
        }
        Ok(format!("prompt: {}", request.prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solchat_core::parse;

    #[test]
    fn test_echo_plain() {
        let dispatcher = EchoDispatcher::default();
        let request = ChatRequest::from_command(parse("/tps").unwrap());
        let out = tokio_test::block_on(dispatcher.dispatch(&request)).unwrap();
        assert_eq!(out, "prompt: What is the current Solana TPS?");
    }

    #[test]
    fn test_echo_json_command() {
        let dispatcher = EchoDispatcher { json: true };
        let request = ChatRequest::from_command(parse("/tps").unwrap());
        let out = tokio_test::block_on(dispatcher.dispatch(&request)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["type"], "tps");
        assert_eq!(value["prompt"], "What is the current Solana TPS?");
    }

    #[test]
    fn test_echo_json_message() {
        let dispatcher = EchoDispatcher { json: true };
        let request = ChatRequest::from_message("  gm  ");
        let out = tokio_test::block_on(dispatcher.dispatch(&request)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["type"], "message");
        assert_eq!(value["prompt"], "gm");
    }
}

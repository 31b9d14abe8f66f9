//! LLM abstraction layer

mod error;
mod ollama;

pub use error::{LlmError, LlmResult};
pub use ollama::{ModelInfo, OllamaClient, DEFAULT_CHAT_TIMEOUT, DEFAULT_LIST_TIMEOUT};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::streaming::FragmentStream;

/// Message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering a turn
    pub fn label(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "you",
            Role::Assistant => "assistant",
        }
    }
}

/// Trait for LLM backends
#[async_trait]
pub trait Llm: Send + Sync {
    /// List installed model identifiers.
    ///
    /// Never fails: any error is logged and reported as an empty list,
    /// which callers treat as "backend unavailable".
    async fn list_models(&self) -> Vec<String>;

    /// Start a streaming chat completion over the full message list
    /// (system prompt already prepended).
    async fn stream_chat(&self, model: &str, messages: &[Message]) -> LlmResult<FragmentStream>;

    /// Base URL of the inference server, for display
    fn base_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = Message::assistant("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "hi"}));
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("s").role, Role::System);
        assert_eq!(Message::user("u").role, Role::User);
        assert_eq!(Message::assistant("a").content, "a");
    }
}

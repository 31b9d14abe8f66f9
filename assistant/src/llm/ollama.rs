//! Ollama LLM implementation
//!
//! Talks to the Ollama HTTP API directly: `GET /api/tags` for model
//! discovery and `POST /api/chat` with `stream: true` for answers.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{Llm, LlmError, LlmResult, Message};
use crate::streaming::{decode_fragments, FragmentStream};

/// Timeout for the model listing request
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest silence tolerated while connecting or reading a chat answer
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(300);

/// Information about an available model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// Ollama client wrapper
pub struct OllamaClient {
    base_url: Url,
    display_url: String,
    list_timeout: Duration,
    chat_timeout: Duration,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(url: &str) -> LlmResult<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        // Url::join replaces the last path segment unless the base ends in '/'
        let base_url = Url::parse(&format!("{}/", trimmed)).map_err(|source| LlmError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        Ok(Self {
            base_url,
            display_url: trimmed.to_string(),
            list_timeout: DEFAULT_LIST_TIMEOUT,
            chat_timeout: DEFAULT_CHAT_TIMEOUT,
        })
    }

    /// Override the model listing timeout
    pub fn with_list_timeout(mut self, timeout: Duration) -> Self {
        self.list_timeout = timeout;
        self
    }

    /// Override the chat connect/read timeout
    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> LlmResult<Url> {
        self.base_url
            .join(path)
            .map_err(|source| LlmError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })
    }

    /// Fetch installed models, propagating every failure
    pub async fn fetch_models(&self) -> LlmResult<Vec<ModelInfo>> {
        let client = reqwest::Client::builder()
            .timeout(self.list_timeout)
            .build()?;

        let response = client.get(self.endpoint("api/tags")?).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let body = response.bytes().await?;
        let tags: OllamaTagsResponse = serde_json::from_slice(&body)?;

        Ok(tags.models)
    }
}

#[async_trait]
impl Llm for OllamaClient {
    async fn list_models(&self) -> Vec<String> {
        match self.fetch_models().await {
            Ok(models) => {
                tracing::debug!("Ollama reported {} models", models.len());
                models.into_iter().map(|m| m.name).collect()
            }
            Err(e) => {
                tracing::warn!("Could not list models from {}: {}", self.display_url, e);
                Vec::new()
            }
        }
    }

    async fn stream_chat(&self, model: &str, messages: &[Message]) -> LlmResult<FragmentStream> {
        // Bounds each wait on the server, not the whole answer
        let client = reqwest::Client::builder()
            .connect_timeout(self.chat_timeout)
            .read_timeout(self.chat_timeout)
            .build()?;

        let body = ChatRequest {
            model,
            messages,
            stream: true,
        };

        tracing::info!(
            model,
            messages = messages.len(),
            "Sending streaming chat request"
        );

        let response = client
            .post(self.endpoint("api/chat")?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        Ok(decode_fragments(response.bytes_stream()))
    }

    fn base_url(&self) -> &str {
        &self.display_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_api_path() {
        let client = OllamaClient::new("http://localhost:11434").unwrap();
        assert_eq!(
            client.endpoint("api/tags").unwrap().as_str(),
            "http://localhost:11434/api/tags"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = OllamaClient::new("http://gpu-box:8080/ollama/").unwrap();
        assert_eq!(
            client.endpoint("api/chat").unwrap().as_str(),
            "http://gpu-box:8080/ollama/api/chat"
        );
        assert_eq!(client.base_url(), "http://gpu-box:8080/ollama");
    }

    #[test]
    fn test_invalid_url() {
        let result = OllamaClient::new("not a url");
        assert!(matches!(result, Err(LlmError::InvalidUrl { .. })));
    }

    #[test]
    fn test_chat_request_shape() {
        let messages = vec![Message::system("sys"), Message::user("hi")];
        let body = ChatRequest {
            model: "qwen2.5:7b",
            messages: &messages,
            stream: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "qwen2.5:7b");
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_tags_response_without_models_key() {
        let tags: OllamaTagsResponse = serde_json::from_str("{}").unwrap();
        assert!(tags.models.is_empty());
    }

    #[test]
    fn test_tags_response_keeps_order() {
        let json = r#"{"models":[{"name":"llama3","size":1},{"name":"qwen2.5:7b"}]}"#;
        let tags: OllamaTagsResponse = serde_json::from_str(json).unwrap();
        let names: Vec<_> = tags.models.into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["llama3", "qwen2.5:7b"]);
    }
}

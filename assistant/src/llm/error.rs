//! Error types for Ollama requests
//!
//! Model discovery absorbs these errors into an empty list; streaming chat
//! surfaces them to the user.

use thiserror::Error;

/// Errors that can occur while talking to the inference server
#[derive(Error, Debug)]
pub enum LlmError {
    /// The configured server URL could not be parsed
    #[error("invalid Ollama URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connection refused, timeout, or the body was cut off
    #[error("request to Ollama failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Ollama API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A response record was not valid JSON
    #[error("failed to decode Ollama response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server reported an error inside the stream
    #[error("Ollama reported an error: {0}")]
    Server(String),

    /// A new turn was started while another response was still streaming
    #[error("a response is already being generated")]
    TurnInFlight,
}

/// Result type alias for inference server operations
pub type LlmResult<T> = Result<T, LlmError>;

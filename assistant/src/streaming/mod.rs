//! Streaming support for LLM responses
//!
//! Ollama answers `POST /api/chat` with newline-delimited JSON. Each record
//! is decoded on its own and its content fragment is handed to the caller
//! as soon as the line is complete, so rendering can start before the full
//! answer exists.

mod buffer;

pub use buffer::LineBuffer;

use std::pin::Pin;

use futures_util::{stream, Stream, StreamExt};
use serde::Deserialize;

use crate::llm::{LlmError, LlmResult};

/// Lazy, forward-only sequence of text fragments.
///
/// Ends when the server closes the connection or sends a `done` record.
/// An `Err` item is always the last item.
pub type FragmentStream = Pin<Box<dyn Stream<Item = LlmResult<String>> + Send>>;

// ============================================================================
// Streaming Response Types (Ollama format)
// ============================================================================

/// A streaming response chunk from Ollama
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaStreamChunk {
    /// The model name
    pub model: Option<String>,
    /// The message content
    pub message: Option<StreamMessage>,
    /// Whether this is the final chunk
    #[serde(default)]
    pub done: bool,
    /// Reason for completion (if done)
    pub done_reason: Option<String>,
    /// Error reported mid-stream
    pub error: Option<String>,
}

/// Message content in a stream chunk
#[derive(Debug, Clone, Deserialize)]
pub struct StreamMessage {
    /// Role (usually "assistant")
    pub role: Option<String>,
    /// Text content
    pub content: Option<String>,
}

impl OllamaStreamChunk {
    /// The non-empty content fragment carried by this record, if any
    pub fn fragment(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .filter(|c| !c.is_empty())
    }
}

/// Parse a streaming response line
///
/// Blank lines yield `None`.
pub fn parse_chunk(line: &str) -> LlmResult<Option<OllamaStreamChunk>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let chunk: OllamaStreamChunk = serde_json::from_str(line)?;
    Ok(Some(chunk))
}

// ============================================================================
// Fragment decoding
// ============================================================================

struct DecodeState<S> {
    bytes: Pin<Box<S>>,
    lines: LineBuffer,
    /// The byte stream has ended; only buffered lines remain
    eof: bool,
    /// A terminal record or error was seen; nothing more is yielded
    finished: bool,
}

enum LineOutcome {
    Skip,
    Fragment(String),
    Done(Option<String>),
    Failed(LlmError),
}

fn decode_line(line: &str) -> LineOutcome {
    let mut chunk = match parse_chunk(line) {
        Ok(Some(chunk)) => chunk,
        Ok(None) => return LineOutcome::Skip,
        Err(e) => return LineOutcome::Failed(e),
    };

    if let Some(error) = chunk.error.take() {
        return LineOutcome::Failed(LlmError::Server(error));
    }

    let fragment = chunk.fragment().map(str::to_string);
    if chunk.done {
        tracing::debug!(reason = ?chunk.done_reason, "Stream finished");
        return LineOutcome::Done(fragment);
    }

    match fragment {
        Some(text) => LineOutcome::Fragment(text),
        None => LineOutcome::Skip,
    }
}

/// Turn a response body into a stream of content fragments
///
/// Generic over the byte source so it can be fed from `reqwest` or from
/// an in-memory stream.
pub fn decode_fragments<S, B, E>(bytes: S) -> FragmentStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<LlmError> + Send + 'static,
{
    let state = DecodeState {
        bytes: Box::pin(bytes),
        lines: LineBuffer::new(),
        eof: false,
        finished: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if state.finished {
                return None;
            }

            let line = match state.lines.next_line() {
                Some(line) => Some(line),
                None if state.eof => state.lines.take_remainder(),
                None => None,
            };

            if let Some(line) = line {
                match decode_line(&line) {
                    LineOutcome::Skip => continue,
                    LineOutcome::Fragment(text) => return Some((Ok(text), state)),
                    LineOutcome::Done(fragment) => {
                        state.finished = true;
                        match fragment {
                            Some(text) => return Some((Ok(text), state)),
                            None => return None,
                        }
                    }
                    LineOutcome::Failed(e) => {
                        state.finished = true;
                        return Some((Err(e), state));
                    }
                }
            }

            if state.eof {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => state.lines.push(chunk.as_ref()),
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(e.into()), state));
                }
                None => state.eof = true,
            }
        }
    }))
}

// ============================================================================
// Tests
// ============================================================================

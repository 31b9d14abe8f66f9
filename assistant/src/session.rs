//! Session state for one interactive conversation
//!
//! A [`Session`] owns the conversation history and the selected model, and
//! runs one question/answer turn at a time:
//!
//! `Idle -> AwaitingInput -> StreamingResponse -> Idle`

use futures_util::StreamExt;

use crate::conversation::Conversation;
use crate::llm::{Llm, LlmError, LlmResult, Message, Role};
use crate::output::{OutputEvent, OutputWriter};

/// Where the session is within a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    /// Waiting for the user to type or pick a question
    AwaitingInput,
    /// Fragments of an answer are being rendered
    StreamingResponse,
}

/// Session-scoped context threaded through the UI loop
#[derive(Debug)]
pub struct Session {
    conversation: Conversation,
    model: String,
    state: TurnState,
}

impl Session {
    /// Start an empty session using `model`
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            conversation: Conversation::new(),
            model: model.into(),
            state: TurnState::Idle,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Switch model; history is kept
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Mark the session as waiting for input
    pub fn await_input(&mut self) {
        if self.state == TurnState::Idle {
            self.state = TurnState::AwaitingInput;
        }
    }

    /// Clear the conversation and abandon any unfinished turn
    pub fn reset(&mut self) {
        self.conversation.reset();
        self.state = TurnState::Idle;
        tracing::info!("Conversation reset");
    }

    /// Run one turn: record the question, stream the answer, record it
    ///
    /// Fragments are written to `output` as they arrive. On a stream
    /// failure the partial answer stays in the transcript and the error is
    /// returned; nothing is retried.
    pub async fn run_turn(
        &mut self,
        input: &str,
        system_prompt: &str,
        llm: &dyn Llm,
        output: &dyn OutputWriter,
    ) -> LlmResult<String> {
        if self.state == TurnState::StreamingResponse {
            return Err(LlmError::TurnInFlight);
        }

        self.conversation.push(Message::user(input));
        output.write(OutputEvent::Turn {
            role: Role::User,
            content: input.to_string(),
        });

        let messages = self.conversation.to_request(system_prompt);
        self.state = TurnState::StreamingResponse;
        let result = self.stream_response(&messages, llm, output).await;
        self.state = TurnState::Idle;

        result
    }

    async fn stream_response(
        &mut self,
        messages: &[Message],
        llm: &dyn Llm,
        output: &dyn OutputWriter,
    ) -> LlmResult<String> {
        let mut stream = match llm.stream_chat(&self.model, messages).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                output.write(OutputEvent::Error(e.to_string()));
                return Err(e);
            }
        };

        output.write(OutputEvent::TurnStart(Role::Assistant));

        let mut response = String::new();
        let mut failure = None;
        while let Some(item) = stream.next().await {
            match item {
                Ok(fragment) => {
                    response.push_str(&fragment);
                    output.write(OutputEvent::Token(fragment));
                }
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        output.write(OutputEvent::NewLine);
        output.flush();

        match failure {
            None => {
                tracing::debug!(chars = response.chars().count(), "Answer complete");
                self.conversation.push(Message::assistant(response.clone()));
                Ok(response)
            }
            Some(e) => {
                tracing::error!("Stream ended early: {}", e);
                if !response.is_empty() {
                    self.conversation.push(Message::assistant(response));
                }
                output.write(OutputEvent::Error(format!("応答が途中で終了しました: {}", e)));
                Err(e)
            }
        }
    }
}

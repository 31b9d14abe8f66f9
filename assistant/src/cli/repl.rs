//! REPL (Read-Eval-Print Loop) for interactive CLI
//!
//! This module provides the main interactive loop: it renders the header and
//! transcript, dispatches slash commands, and runs question/answer turns
//! with the answer streamed into the terminal as it is generated.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use super::commands::{format_examples, CommandContext, CommandRegistry, CommandResult};
use super::BACKEND_UNAVAILABLE;
use crate::conversation::Conversation;
use crate::knowledge::KnowledgeBase;
use crate::llm::Llm;
use crate::models::{resolve_model, PREFERRED_MODELS};
use crate::output::{OutputEvent, OutputWriter};
use crate::prompt::compose_system_prompt;
use crate::session::Session;

pub const TITLE: &str = "🧬 QIIME 2 Assistant";
pub const CAPTION: &str = "QIIME 2 マニュアルに基づく対話式AIアシスタント（ローカル LLM）";
pub const WELCOME: &str = "QIIME 2について質問してください... (/examples で質問の例、/help でコマンド一覧)";

const PROMPT: &str = "qiime2> ";

/// REPL configuration
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Models selected by default when installed, in priority order
    pub preferred_models: Vec<String>,
    /// Model asked for on the command line
    pub requested_model: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            preferred_models: PREFERRED_MODELS.iter().map(|m| m.to_string()).collect(),
            requested_model: None,
        }
    }
}

/// Whether the loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Render the conversation, or the welcome view when it is empty
pub fn render_transcript(conversation: &Conversation, output: &dyn OutputWriter) {
    if conversation.is_empty() {
        output.write(OutputEvent::System(WELCOME.to_string()));
        output.write(OutputEvent::NewLine);
        return;
    }

    for turn in conversation.turns() {
        output.write(OutputEvent::Turn {
            role: turn.role,
            content: turn.content.clone(),
        });
        output.write(OutputEvent::NewLine);
    }
}

/// Interactive REPL
pub struct Repl<'a> {
    llm: &'a dyn Llm,
    knowledge: &'a mut KnowledgeBase,
    output: &'a dyn OutputWriter,
    command_registry: CommandRegistry,
    session: Session,
}

impl<'a> Repl<'a> {
    /// Discover models and open a session
    ///
    /// Returns `None` after telling the user to start Ollama when no model
    /// can be listed.
    pub async fn connect(
        llm: &'a dyn Llm,
        knowledge: &'a mut KnowledgeBase,
        output: &'a dyn OutputWriter,
        config: &ReplConfig,
    ) -> Option<Repl<'a>> {
        let models = llm.list_models().await;
        let model = match resolve_model(
            &models,
            config.requested_model.as_deref(),
            config.preferred_models.as_slice(),
        ) {
            Some(model) => model.to_string(),
            None => {
                output.write(OutputEvent::Error(BACKEND_UNAVAILABLE.to_string()));
                return None;
            }
        };

        tracing::info!(model = %model, available = models.len(), "Session started");

        Some(Self {
            llm,
            knowledge,
            output,
            command_registry: CommandRegistry::new(),
            session: Session::new(model),
        })
    }

    /// The session driven by this REPL
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Title, settings, example questions and the transcript
    pub fn render_header(&self) {
        self.output.write(OutputEvent::Text(TITLE.to_string()));
        self.output.write(OutputEvent::System(CAPTION.to_string()));
        self.output.write(OutputEvent::Status(format!(
            "Model: {} | Ollama ({})",
            self.session.model(),
            self.llm.base_url()
        )));
        self.output.write(OutputEvent::Status(format!(
            "Manual: {} documents in {}",
            self.knowledge.document_count(),
            self.knowledge.dir().display()
        )));
        self.output.write(OutputEvent::NewLine);
        self.output.write(OutputEvent::Text(format_examples()));
        render_transcript(self.session.conversation(), self.output);
    }

    /// Run the REPL loop on stdin
    pub async fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        self.run_with(stdin.lock()).await
    }

    /// Run the REPL loop on any line source
    pub async fn run_with<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        self.render_header();

        let mut stdout = io::stdout();

        loop {
            self.session.await_input();

            print!("{}", PROMPT);
            stdout.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // EOF
                self.output.write(OutputEvent::NewLine);
                break;
            }

            if self.handle_input(line.trim()).await == Flow::Exit {
                break;
            }
        }

        Ok(())
    }

    /// Handle one line of input
    pub async fn handle_input(&mut self, input: &str) -> Flow {
        if input.is_empty() {
            return Flow::Continue;
        }

        if input == "quit" || input == "exit" {
            return Flow::Exit;
        }

        if !CommandRegistry::is_command(input) {
            self.ask(input).await;
            return Flow::Continue;
        }

        let result = {
            let mut ctx = CommandContext {
                session: &mut self.session,
                llm: self.llm,
                knowledge: &mut *self.knowledge,
                output: self.output,
            };
            self.command_registry.try_execute(input, &mut ctx).await
        };

        match result {
            Some(Ok(CommandResult::Exit)) => return Flow::Exit,
            Some(Ok(CommandResult::Message(msg))) => {
                self.output.write(OutputEvent::Text(msg));
                self.output.write(OutputEvent::NewLine);
            }
            Some(Ok(CommandResult::Submit(question))) => {
                self.ask(&question).await;
            }
            Some(Ok(CommandResult::Reset)) => {
                render_transcript(self.session.conversation(), self.output);
            }
            Some(Ok(CommandResult::Ok)) => {
                self.output.write(OutputEvent::NewLine);
            }
            Some(Err(e)) => {
                self.output
                    .write(OutputEvent::Error(format!("Command error: {}", e)));
                self.output.write(OutputEvent::NewLine);
            }
            None => {
                self.ask(input).await;
            }
        }

        Flow::Continue
    }

    /// Send a question, typed or picked from the examples
    async fn ask(&mut self, question: &str) {
        let system_prompt = compose_system_prompt(self.knowledge.text());

        // Failures are already rendered by the session
        if let Err(e) = self
            .session
            .run_turn(question, &system_prompt, self.llm, self.output)
            .await
        {
            tracing::debug!("Turn failed: {}", e);
        }
        self.output.write(OutputEvent::NewLine);
    }
}

//! Slash command system for interactive CLI
//!
//! This module provides a trait-based system for slash commands like `/help`, `/models`, etc.
//! Commands are registered in a registry and dispatched based on user input.

mod clear;
mod examples;
mod help;
mod history;
mod models;
mod quit;
mod reload;

pub use clear::ResetCommand;
pub use examples::{format_examples, ExamplesCommand, EXAMPLE_QUESTIONS};
pub use help::HelpCommand;
pub use history::HistoryCommand;
pub use models::ModelsCommand;
pub use quit::QuitCommand;
pub use reload::ReloadCommand;

use crate::knowledge::KnowledgeBase;
use crate::llm::Llm;
use crate::output::OutputWriter;
use crate::session::Session;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

// ============================================================================
// Command Context
// ============================================================================

/// Context passed to commands during execution
pub struct CommandContext<'a> {
    /// The current session
    pub session: &'a mut Session,
    /// The inference backend
    pub llm: &'a dyn Llm,
    /// The loaded manual
    pub knowledge: &'a mut KnowledgeBase,
    /// The output writer
    pub output: &'a dyn OutputWriter,
}

// ============================================================================
// Command Result
// ============================================================================

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command executed successfully
    Ok,
    /// Command executed, display this message
    Message(String),
    /// Submit this text as if the user had typed it
    Submit(String),
    /// The conversation was reset; show the welcome view
    Reset,
    /// Exit the REPL
    Exit,
}

// ============================================================================
// SlashCommand Trait
// ============================================================================

/// Trait for slash commands
///
/// Implement this trait to add new slash commands to the CLI.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Command name (without the leading slash)
    fn name(&self) -> &'static str;

    /// Short description for help text
    fn description(&self) -> &'static str;

    /// Aliases for this command (e.g., ["q"] for quit)
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Execute the command
    async fn execute(&self, args: &str, ctx: &mut CommandContext<'_>) -> Result<CommandResult>;
}

// ============================================================================
// Command Registry
// ============================================================================

/// Registry of slash commands
pub struct CommandRegistry {
    commands: Vec<Arc<dyn SlashCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Create a new registry with all built-in commands
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn SlashCommand>> = vec![
            Arc::new(HelpCommand),
            Arc::new(ModelsCommand),
            Arc::new(ExamplesCommand),
            Arc::new(ResetCommand),
            Arc::new(HistoryCommand),
            Arc::new(ReloadCommand),
            Arc::new(QuitCommand),
        ];

        Self { commands }
    }

    /// Find a command by name or alias
    pub fn find(&self, name: &str) -> Option<&Arc<dyn SlashCommand>> {
        self.commands
            .iter()
            .find(|cmd| cmd.name() == name || cmd.aliases().iter().any(|a| *a == name))
    }

    /// Check if input is a command (starts with /)
    pub fn is_command(input: &str) -> bool {
        input.starts_with('/')
    }

    /// Parse command input into (command_name, args)
    pub fn parse_command(input: &str) -> Option<(&str, &str)> {
        if !Self::is_command(input) {
            return None;
        }

        let input = input.trim_start_matches('/');
        let mut parts = input.splitn(2, char::is_whitespace);
        let name = parts.next()?;
        let args = parts.next().unwrap_or("").trim();

        Some((name, args))
    }

    /// Get all registered commands
    pub fn all_commands(&self) -> &[Arc<dyn SlashCommand>] {
        &self.commands
    }

    /// Try to execute a command
    ///
    /// Returns `Some(result)` if input was a command, `None` if not a command.
    pub async fn try_execute(
        &self,
        input: &str,
        ctx: &mut CommandContext<'_>,
    ) -> Option<Result<CommandResult>> {
        let (name, args) = Self::parse_command(input)?;

        let cmd = match self.find(name) {
            Some(cmd) => cmd,
            None => {
                return Some(Ok(CommandResult::Message(format!(
                    "Unknown command: /{}. Type /help for available commands.",
                    name
                ))));
            }
        };

        tracing::debug!(command = cmd.name(), args, "Executing slash command");
        Some(cmd.execute(args, ctx).await)
    }
}

// ============================================================================
// Tests
// ============================================================================

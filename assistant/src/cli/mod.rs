//! CLI module
//!
//! This module provides:
//! - CLI argument definitions (args)
//! - Slash commands for interactive mode (commands)
//! - REPL functionality (repl)

pub mod args;
pub mod commands;
pub mod repl;

pub use args::{Cli, Commands};
pub use commands::{CommandContext, CommandRegistry, CommandResult, SlashCommand, EXAMPLE_QUESTIONS};
pub use repl::{render_transcript, Flow, Repl, ReplConfig};

/// Shown when no model can be listed from Ollama
pub const BACKEND_UNAVAILABLE: &str =
    "Ollama が起動していません。`ollama serve` を実行してください。";

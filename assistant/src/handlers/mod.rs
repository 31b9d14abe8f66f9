//! Command handlers module
//!
//! This module contains handler functions for CLI commands.
//! CommandContext resolves settings shared across handlers.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::ReplConfig;
use crate::config::{expand_path, AssistantFileConfig};
use crate::knowledge::KnowledgeBase;
use crate::llm::OllamaClient;

pub mod core;

pub use self::core::{ask, ask_with, chat, models};

// =============================================================================
// CommandContext - resolved settings
// =============================================================================

/// Shared context for command handlers.
///
/// Settings are resolved with priority: CLI/env > config file > defaults.
pub struct CommandContext {
    pub ollama_url: String,
    pub model: Option<String>,
    pub docs_dir: PathBuf,
    pub file_config: AssistantFileConfig,
}

impl CommandContext {
    /// Create a new CommandContext from CLI args and file config
    pub fn new(
        ollama_url: Option<String>,
        model: Option<String>,
        docs_dir: Option<String>,
        file_config: AssistantFileConfig,
    ) -> Self {
        let ollama_url = ollama_url.unwrap_or_else(|| file_config.llm.url.clone());
        let docs_dir = expand_path(&docs_dir.unwrap_or_else(|| file_config.knowledge.docs_dir.clone()));

        Self {
            ollama_url,
            model,
            docs_dir,
            file_config,
        }
    }

    /// Create an OllamaClient configured with the context's settings
    pub fn llm(&self) -> Result<OllamaClient> {
        let client = OllamaClient::new(&self.ollama_url)
            .with_context(|| format!("Cannot use Ollama URL '{}'", self.ollama_url))?
            .with_list_timeout(self.file_config.llm.list_timeout())
            .with_chat_timeout(self.file_config.llm.chat_timeout());
        Ok(client)
    }

    /// Knowledge base for the configured docs directory (not yet loaded)
    pub fn knowledge(&self) -> KnowledgeBase {
        KnowledgeBase::new(&self.docs_dir)
    }

    /// REPL settings derived from this context
    pub fn repl_config(&self) -> ReplConfig {
        ReplConfig {
            preferred_models: self.file_config.llm.preferred_models.clone(),
            requested_model: self.model.clone(),
        }
    }
}

//! CLI argument definitions
//!
//! Contains the main CLI struct and Commands enum for clap parsing.

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "qiime-assistant")]
#[command(about = "Interactive QIIME 2 assistant backed by a local Ollama server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Ollama server URL (default: from .assistant.toml or http://localhost:11434)
    #[arg(long, env = "OLLAMA_URL", global = true)]
    pub ollama_url: Option<String>,

    /// Model to use (default: qwen2.5:7b if installed, else the first model listed)
    #[arg(short = 'm', long, env = "OLLAMA_MODEL", global = true)]
    pub model: Option<String>,

    /// Directory holding the manual's Markdown pages
    #[arg(long, env = "QIIME_DOCS_DIR", global = true)]
    pub docs_dir: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive chat session (default)
    Chat,
    /// Ask a single question and stream the answer
    Ask {
        /// Question to send
        question: String,
    },
    /// List available models from Ollama
    Models,
}

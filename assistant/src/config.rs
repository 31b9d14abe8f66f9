//! Configuration loading

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::PREFERRED_MODELS;

/// Config file name searched for from the working directory upwards
pub const CONFIG_FILE_NAME: &str = ".assistant.toml";

/// Find a config file by walking up the directory tree, then checking global config.
///
/// Search order:
/// 1. Current directory and parent directories (walking up to root)
/// 2. Global config at ~/.config/qiime-assistant/
///
/// Returns the path if found, None otherwise.
fn find_config_file(filename: &str) -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    // Walk up the directory tree
    loop {
        let candidate = current.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    // Fallback: Check global config
    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("qiime-assistant").join(filename);
        if global_path.exists() {
            return Some(global_path);
        }
    }

    None
}

// ============================================================================
// Assistant Configuration (.assistant.toml)
// ============================================================================

/// Top-level configuration (from .assistant.toml)
#[derive(Debug, Default, Deserialize)]
pub struct AssistantFileConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// LLM configuration section
#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,
    /// Models selected by default when installed, in priority order
    #[serde(default = "default_preferred_models")]
    pub preferred_models: Vec<String>,
    #[serde(default = "default_list_timeout_secs")]
    pub list_timeout_secs: u64,
    #[serde(default = "default_chat_timeout_secs")]
    pub chat_timeout_secs: u64,
}

/// Knowledge base configuration section
#[derive(Debug, Deserialize)]
pub struct KnowledgeConfig {
    /// Directory holding the manual's Markdown pages
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
}

// Default value functions
fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_preferred_models() -> Vec<String> {
    PREFERRED_MODELS.iter().map(|m| m.to_string()).collect()
}

fn default_list_timeout_secs() -> u64 {
    5
}

fn default_chat_timeout_secs() -> u64 {
    300
}

fn default_docs_dir() -> String {
    "../qiime2-manual/docs".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            preferred_models: default_preferred_models(),
            list_timeout_secs: default_list_timeout_secs(),
            chat_timeout_secs: default_chat_timeout_secs(),
        }
    }
}

impl LlmConfig {
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
        }
    }
}

impl AssistantFileConfig {
    /// Load config from .assistant.toml
    ///
    /// Search order:
    /// 1. Walk up directory tree from cwd looking for .assistant.toml
    /// 2. Check ~/.config/qiime-assistant/.assistant.toml (global fallback)
    /// 3. Fall back to defaults
    pub fn load() -> Result<Self> {
        if let Some(config_path) = find_config_file(CONFIG_FILE_NAME) {
            tracing::debug!("Loading config from: {}", config_path.display());
            return Self::load_from_path(&config_path);
        }

        // No config file found, return defaults
        tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AssistantFileConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }
}

/// Expand `~` and `$VAR` in a configured path
///
/// Unknown variables leave the path as written.
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or_else(|_| path.into());
    PathBuf::from(expanded.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AssistantFileConfig::default();
        assert_eq!(config.llm.url, "http://localhost:11434");
        assert_eq!(config.llm.preferred_models, vec!["qwen2.5:7b", "qwen2.5-coder:7b"]);
        assert_eq!(config.llm.list_timeout(), Duration::from_secs(5));
        assert_eq!(config.llm.chat_timeout(), Duration::from_secs(300));
        assert_eq!(config.knowledge.docs_dir, "../qiime2-manual/docs");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[llm]\nurl = \"http://gpu-box:11434\"\n\n[knowledge]\ndocs_dir = \"/srv/manual\"\n",
        )
        .unwrap();

        let config = AssistantFileConfig::load_from_path(&path).unwrap();
        assert_eq!(config.llm.url, "http://gpu-box:11434");
        assert_eq!(config.llm.chat_timeout_secs, 300);
        assert_eq!(config.llm.preferred_models.len(), 2);
        assert_eq!(config.knowledge.docs_dir, "/srv/manual");
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[llm\nurl = ").unwrap();

        let err = AssistantFileConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("docs"), PathBuf::from("docs"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/docs"), home.join("docs"));
        }
        assert_eq!(
            expand_path("$QIIME_ASSISTANT_UNSET_VAR/docs"),
            PathBuf::from("$QIIME_ASSISTANT_UNSET_VAR/docs")
        );
    }
}

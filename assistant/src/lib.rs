//! Chat assistant for the QIIME 2 manual, backed by a local Ollama server

pub mod cli;
pub mod config;
pub mod conversation;
pub mod handlers;
pub mod knowledge;
pub mod llm;
pub mod models;
pub mod output;
pub mod prompt;
pub mod session;
pub mod streaming;

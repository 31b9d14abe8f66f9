//! Plain text output for pipes and CI environments
//!
//! No colors or special formatting - just clean text output.

use std::io::{self, Write};

use super::{OutputEvent, OutputWriter};
use crate::llm::Role;

/// Plain text output writer (no colors)
#[derive(Default)]
pub struct PlainOutput;

impl PlainOutput {
    /// Create a new plain output writer
    pub fn new() -> Self {
        Self
    }

    fn label(role: Role) -> String {
        format!("[{}]", role.label())
    }
}

impl OutputWriter for PlainOutput {
    fn write(&self, event: OutputEvent) {
        match event {
            OutputEvent::Text(text) => {
                println!("{}", text);
            }

            OutputEvent::Turn { role, content } => {
                println!("{}", Self::label(role));
                println!("{}", content);
            }

            OutputEvent::TurnStart(role) => {
                println!("{}", Self::label(role));
            }

            OutputEvent::Token(token) => {
                print!("{}", token);
                let _ = io::stdout().flush();
            }

            OutputEvent::Status(msg) => {
                eprintln!("  {}", msg);
            }

            OutputEvent::Error(msg) => {
                eprintln!("Error: {}", msg);
            }

            OutputEvent::Warning(msg) => {
                eprintln!("Warning: {}", msg);
            }

            OutputEvent::System(msg) => {
                println!("{}", msg);
            }

            OutputEvent::NewLine => {
                println!();
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}

//! Terminal output with colors and formatting
//!
//! Uses ANSI escape codes for colors and styling.

use std::io::{self, Write};

use super::{OutputEvent, OutputWriter};
use crate::llm::Role;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";

/// Terminal output writer with colors and formatting
pub struct TerminalOutput {
    /// Whether to use colors (can be disabled)
    use_colors: bool,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    /// Create a new terminal output writer
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create without colors
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Format with color if colors are enabled
    fn color(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Format with multiple styles
    fn styled(&self, codes: &[&str], text: &str) -> String {
        if self.use_colors {
            let prefix: String = codes.iter().copied().collect();
            format!("{}{}{}", prefix, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Role label shown above each turn
    fn role_label(&self, role: Role) -> String {
        let code = match role {
            Role::User => GREEN,
            Role::Assistant => CYAN,
            Role::System => GRAY,
        };
        self.styled(&[BOLD, code], &format!("{}>", role.label()))
    }

    /// Print to stderr (for status/progress messages)
    fn eprint(&self, msg: &str) {
        eprintln!("{}", msg);
    }

    /// Print to stdout (for content)
    fn print(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Print without newline (for streaming)
    fn print_inline(&self, msg: &str) {
        print!("{}", msg);
        let _ = io::stdout().flush();
    }
}

impl OutputWriter for TerminalOutput {
    fn write(&self, event: OutputEvent) {
        match event {
            OutputEvent::Text(text) => {
                self.print(&text);
            }

            OutputEvent::Turn { role, content } => {
                self.print(&self.role_label(role));
                self.print(&content);
            }

            OutputEvent::TurnStart(role) => {
                self.print(&self.role_label(role));
            }

            OutputEvent::Token(token) => {
                // Stream tokens inline without newline
                self.print_inline(&token);
            }

            OutputEvent::Status(msg) => {
                self.eprint(&self.color(GRAY, &format!("  {}", msg)));
            }

            OutputEvent::Error(msg) => {
                self.eprint(&format!(
                    "{} {}",
                    self.styled(&[BOLD, RED], "Error:"),
                    self.color(RED, &msg)
                ));
            }

            OutputEvent::Warning(msg) => {
                self.eprint(&format!(
                    "{} {}",
                    self.styled(&[BOLD, YELLOW], "Warning:"),
                    self.color(YELLOW, &msg)
                ));
            }

            OutputEvent::System(msg) => {
                self.print(&self.color(GRAY, &msg));
            }

            OutputEvent::NewLine => {
                self.print("");
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_output_creation() {
        let output = TerminalOutput::new();
        assert!(output.use_colors);

        let output = TerminalOutput::without_colors();
        assert!(!output.use_colors);
    }

    #[test]
    fn test_color_formatting() {
        let output = TerminalOutput::new();
        let colored = output.color(RED, "test");
        assert!(colored.contains("\x1b[31m"));
        assert!(colored.contains("\x1b[0m"));
        assert!(colored.contains("test"));

        let output = TerminalOutput::without_colors();
        let plain = output.color(RED, "test");
        assert_eq!(plain, "test");
    }

    #[test]
    fn test_role_label() {
        let output = TerminalOutput::without_colors();
        assert_eq!(output.role_label(Role::User), "you>");
        assert_eq!(output.role_label(Role::Assistant), "assistant>");

        let output = TerminalOutput::new();
        assert!(output.role_label(Role::Assistant).contains(CYAN));
    }
}

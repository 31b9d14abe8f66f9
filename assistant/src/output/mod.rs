//! Output abstraction for CLI and other consumers
//!
//! This module provides a trait-based output system that decouples event emission
//! from display logic. Different implementations can handle terminal output,
//! plain text (for pipes/CI), or other formats.

mod plain;
mod terminal;

pub use plain::PlainOutput;
pub use terminal::TerminalOutput;

use crate::llm::Role;

// ============================================================================
// Output Events
// ============================================================================

/// Events that can be displayed to the user
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    /// Plain text message
    Text(String),

    /// A complete turn from the transcript
    Turn { role: Role, content: String },

    /// A turn whose content follows as `Token` events
    TurnStart(Role),

    /// Streaming token
    Token(String),

    /// Status message (informational)
    Status(String),

    /// Error message
    Error(String),

    /// Warning message
    Warning(String),

    /// System message (dimmed, for internal info)
    System(String),

    /// New line / separator
    NewLine,
}

// ============================================================================
// Output Writer Trait
// ============================================================================

/// Trait for writing output events
///
/// Implementations handle how events are displayed. This decouples
/// the session's event emission from the display logic.
pub trait OutputWriter: Send + Sync {
    /// Write an output event
    fn write(&self, event: OutputEvent);

    /// Flush any buffered output
    fn flush(&self);
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a default output writer based on environment
pub fn default_output() -> Box<dyn OutputWriter> {
    // Check if stdout is a terminal
    if atty::is(atty::Stream::Stdout) {
        // https://no-color.org
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            Box::new(TerminalOutput::without_colors())
        } else {
            Box::new(TerminalOutput::new())
        }
    } else {
        Box::new(PlainOutput::new())
    }
}

// ============================================================================
// Tests
// ============================================================================

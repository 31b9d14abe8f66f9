//! Quit command

use super::{CommandContext, CommandResult, SlashCommand};
use anyhow::Result;
use async_trait::async_trait;

/// Quit command
pub struct QuitCommand;

#[async_trait]
impl SlashCommand for QuitCommand {
    fn name(&self) -> &'static str {
        "quit"
    }

    fn description(&self) -> &'static str {
        "Exit the assistant"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["q", "exit"]
    }

    async fn execute(&self, _args: &str, _ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        Ok(CommandResult::Exit)
    }
}

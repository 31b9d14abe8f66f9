//! Reset command - start the conversation over

use super::{CommandContext, CommandResult, SlashCommand};
use crate::output::OutputEvent;
use anyhow::Result;
use async_trait::async_trait;

/// Reset command
pub struct ResetCommand;

#[async_trait]
impl SlashCommand for ResetCommand {
    fn name(&self) -> &'static str {
        "reset"
    }

    fn description(&self) -> &'static str {
        "Clear the conversation (会話をリセット)"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["clear", "c"]
    }

    async fn execute(&self, args: &str, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        if !args.trim().is_empty() {
            ctx.output
                .write(OutputEvent::Warning("Usage: /reset".to_string()));
            return Ok(CommandResult::Ok);
        }

        ctx.session.reset();
        ctx.output.write(OutputEvent::Status(
            "Conversation history cleared".to_string(),
        ));
        Ok(CommandResult::Reset)
    }
}

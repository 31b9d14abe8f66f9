//! History command - show the transcript again

use super::{CommandContext, CommandResult, SlashCommand};
use crate::cli::repl::render_transcript;
use anyhow::Result;
use async_trait::async_trait;

/// History command
pub struct HistoryCommand;

#[async_trait]
impl SlashCommand for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    fn description(&self) -> &'static str {
        "Show the conversation so far"
    }

    async fn execute(&self, _args: &str, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        render_transcript(ctx.session.conversation(), ctx.output);
        Ok(CommandResult::Ok)
    }
}

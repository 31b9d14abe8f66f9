//! Reload command - re-read the manual from disk

use super::{CommandContext, CommandResult, SlashCommand};
use anyhow::Result;
use async_trait::async_trait;

/// Reload command
pub struct ReloadCommand;

#[async_trait]
impl SlashCommand for ReloadCommand {
    fn name(&self) -> &'static str {
        "reload"
    }

    fn description(&self) -> &'static str {
        "Re-read the manual documents"
    }

    async fn execute(&self, _args: &str, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        ctx.knowledge.reload();
        let chars = ctx.knowledge.text().chars().count();
        let documents = ctx.knowledge.document_count();

        Ok(CommandResult::Message(format!(
            "Reloaded {} documents ({} characters) from {}",
            documents,
            chars,
            ctx.knowledge.dir().display()
        )))
    }
}

//! Help command - displays available commands

use super::{CommandContext, CommandRegistry, CommandResult, SlashCommand};
use crate::output::OutputEvent;
use anyhow::Result;
use async_trait::async_trait;

/// Help command
pub struct HelpCommand;

/// Build the help listing for every registered command
pub(crate) fn help_text(registry: &CommandRegistry) -> String {
    let mut help_text = String::new();
    help_text.push_str("Available commands:\n\n");

    for cmd in registry.all_commands() {
        let aliases = cmd.aliases();
        let alias_str = if aliases.is_empty() {
            String::new()
        } else {
            format!(
                " ({})",
                aliases
                    .iter()
                    .map(|a| format!("/{}", a))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };

        help_text.push_str(&format!(
            "  /{:<12} {}{}\n",
            cmd.name(),
            cmd.description(),
            alias_str
        ));
    }

    help_text.push_str("\nAnything else is sent to the assistant as a question.\n");
    help_text.push_str("  quit, exit   Exit the assistant\n");
    help_text
}

#[async_trait]
impl SlashCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Show available commands"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["h", "?"]
    }

    async fn execute(&self, _args: &str, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let registry = CommandRegistry::new();
        ctx.output.write(OutputEvent::Text(help_text(&registry)));

        Ok(CommandResult::Ok)
    }
}

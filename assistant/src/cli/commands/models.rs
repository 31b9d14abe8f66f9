//! Models command - list and switch models

use super::{CommandContext, CommandResult, SlashCommand};
use crate::cli::BACKEND_UNAVAILABLE;
use crate::models::is_installed;
use crate::output::OutputEvent;
use anyhow::Result;
use async_trait::async_trait;

/// Models command
pub struct ModelsCommand;

/// Render the model list, marking the current model
pub(crate) fn format_model_list(models: &[String], current: &str) -> String {
    let mut output = String::new();
    output.push_str("Available models:\n\n");

    for model in models {
        let marker = if model == current { " *" } else { "" };
        output.push_str(&format!("  {}{}\n", model, marker));
    }

    output.push_str(&format!("\nCurrent: {}\n", current));
    output.push_str("\nUse /models <name> to switch models\n");
    output
}

#[async_trait]
impl SlashCommand for ModelsCommand {
    fn name(&self) -> &'static str {
        "models"
    }

    fn description(&self) -> &'static str {
        "List available models or switch model"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["model", "m"]
    }

    async fn execute(&self, args: &str, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let args = args.trim();

        // Always re-fetch: models may have been pulled or removed meanwhile
        let models = ctx.llm.list_models().await;
        if models.is_empty() {
            ctx.output
                .write(OutputEvent::Warning(BACKEND_UNAVAILABLE.to_string()));
            ctx.output.write(OutputEvent::Text(format!(
                "Current model: {}\n",
                ctx.session.model()
            )));
            return Ok(CommandResult::Ok);
        }

        if args.is_empty() {
            ctx.output.write(OutputEvent::Text(format_model_list(
                &models,
                ctx.session.model(),
            )));
            return Ok(CommandResult::Ok);
        }

        if !is_installed(&models, args) {
            ctx.output.write(OutputEvent::Warning(format!(
                "Model '{}' is not installed in Ollama ({})",
                args,
                ctx.llm.base_url()
            )));
            return Ok(CommandResult::Ok);
        }

        ctx.session.set_model(args);
        tracing::info!(model = args, "Switched model");

        Ok(CommandResult::Message(format!("Switched to model: {}", args)))
    }
}

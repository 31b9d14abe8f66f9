//! Core command handlers

use anyhow::Result;

use super::CommandContext;
use crate::cli::{Repl, BACKEND_UNAVAILABLE};
use crate::llm::Llm;
use crate::models::resolve_model;
use crate::output::{default_output, OutputEvent, OutputWriter};
use crate::prompt::compose_system_prompt;
use crate::session::Session;

/// Handle the `chat` command - interactive session
pub async fn chat(ctx: &CommandContext) -> Result<()> {
    let llm = ctx.llm()?;
    let mut knowledge = ctx.knowledge();
    let output = default_output();

    let repl = Repl::connect(&llm, &mut knowledge, output.as_ref(), &ctx.repl_config()).await;
    match repl {
        Some(mut repl) => {
            repl.run().await?;
            tracing::info!(
                turns = repl.session().conversation().len(),
                "Session ended"
            );
            Ok(())
        }
        // The user has already been told to start Ollama
        None => Ok(()),
    }
}

/// Handle the `ask` command - one question, streamed answer
pub async fn ask(ctx: &CommandContext, question: &str) -> Result<()> {
    let output = default_output();
    ask_with(ctx, question, output.as_ref()).await
}

/// Answer one question, rendering to `output`
pub async fn ask_with(ctx: &CommandContext, question: &str, output: &dyn OutputWriter) -> Result<()> {
    let llm = ctx.llm()?;

    let models = llm.list_models().await;
    let config = ctx.repl_config();
    let Some(model) = resolve_model(&models, config.requested_model.as_deref(), config.preferred_models.as_slice()) else {
        output.write(OutputEvent::Error(BACKEND_UNAVAILABLE.to_string()));
        return Ok(());
    };

    let knowledge = ctx.knowledge();
    let system_prompt = compose_system_prompt(knowledge.text());

    let mut session = Session::new(model);
    // Failures are already rendered by the session
    if let Err(e) = session
        .run_turn(question, &system_prompt, &llm, output)
        .await
    {
        tracing::debug!("Turn failed: {}", e);
    }

    Ok(())
}

/// Handle the `models` command - list available models
pub async fn models(ctx: &CommandContext) -> Result<()> {
    let llm = ctx.llm()?;
    let models = llm.list_models().await;

    if models.is_empty() {
        eprintln!("{}", BACKEND_UNAVAILABLE);
        return Ok(());
    }

    let config = ctx.repl_config();
    let selected = resolve_model(&models, config.requested_model.as_deref(), config.preferred_models.as_slice());

    println!("Available models ({}):", llm.base_url());
    for m in &models {
        let marker = if Some(m.as_str()) == selected { " (default)" } else { "" };
        println!("  {}{}", m, marker);
    }
    Ok(())
}

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qiime_assistant::cli::{Cli, Commands};
use qiime_assistant::config::AssistantFileConfig;
use qiime_assistant::handlers::{self, CommandContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: RUST_LOG wins over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let file_config = AssistantFileConfig::load()?;
    let ctx = CommandContext::new(
        cli.ollama_url,
        cli.model,
        cli.docs_dir,
        file_config,
    );
    tracing::debug!(url = %ctx.ollama_url, docs = %ctx.docs_dir.display(), "Resolved settings");

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => handlers::chat(&ctx).await?,
        Commands::Ask { question } => handlers::ask(&ctx, &question).await?,
        Commands::Models => handlers::models(&ctx).await?,
    }

    Ok(())
}

//! Examples command - pick one of the prepared questions

use super::{CommandContext, CommandResult, SlashCommand};
use crate::output::OutputEvent;
use anyhow::Result;
use async_trait::async_trait;

/// Questions offered as shortcuts (質問の例)
pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "DADA2のパラメータの決め方は？",
    "サンプリング深度はどう決める？",
    "内部標準（IS）の除去手順を教えて",
    "Rでphyloseqを使う方法は？",
    "PERMANOVAの実行方法は？",
    "分類器の作り方を教えて",
];

/// Numbered listing of the example questions
pub fn format_examples() -> String {
    let mut text = String::from("質問の例:\n");
    for (i, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
        text.push_str(&format!("  {}. {}\n", i + 1, question));
    }
    text.push_str("\nUse /examples <number> to ask one\n");
    text
}

/// Examples command
pub struct ExamplesCommand;

#[async_trait]
impl SlashCommand for ExamplesCommand {
    fn name(&self) -> &'static str {
        "examples"
    }

    fn description(&self) -> &'static str {
        "List example questions, or ask one by number"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ex", "e"]
    }

    async fn execute(&self, args: &str, ctx: &mut CommandContext<'_>) -> Result<CommandResult> {
        let args = args.trim();

        if args.is_empty() {
            ctx.output.write(OutputEvent::Text(format_examples()));
            return Ok(CommandResult::Ok);
        }

        let question = args
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| EXAMPLE_QUESTIONS.get(i));

        match question {
            Some(question) => Ok(CommandResult::Submit(question.to_string())),
            None => {
                ctx.output.write(OutputEvent::Warning(format!(
                    "Usage: /examples <1-{}>",
                    EXAMPLE_QUESTIONS.len()
                )));
                Ok(CommandResult::Ok)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples_metadata() {
        let cmd = ExamplesCommand;
        assert_eq!(cmd.name(), "examples");
        assert!(cmd.aliases().contains(&"ex"));
    }

    #[test]
    fn test_format_examples_is_numbered() {
        let text = format_examples();
        assert!(text.contains("  1. DADA2のパラメータの決め方は？\n"));
        assert!(text.contains("  6. 分類器の作り方を教えて\n"));
    }
}

//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished discussion
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    Answer,
    /// Every message of the discussion plus the final notepad
    Discussion,
    /// JSON of the session snapshot
    Json,
}

impl From<OutputFormat> for duet_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => duet_domain::OutputFormat::Answer,
            OutputFormat::Discussion => duet_domain::OutputFormat::Discussion,
            OutputFormat::Json => duet_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for duet
#[derive(Parser, Debug)]
#[command(name = "duet")]
#[command(author, version, about = "Two AI agents discuss your question before answering")]
#[command(long_about = r#"
Duet lets a logical agent and a creative agent discuss your question before
the logical agent answers it. Both agents share a notepad they can rewrite
while they talk.

Every question runs the same schedule:
1. Opening: the logical agent opens the discussion
2. Exchanges: the creative and logical agents reply to each other
3. Synthesis: the logical agent writes the final answer for you

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./duet.toml         Project-level config
3. ~/.config/duet/config.toml   Global config

The API key is read from GEMINI_API_KEY unless [gemini] api_key_env says otherwise.

Example:
  duet "Why is the sky blue?"
  duet --image chart.png "What trend does this chart show?"
  duet --output discussion --exchanges 3 "Design a board game about rivers"
  duet --chat --model pro
"#)]
pub struct Cli {
    /// The question to discuss (not required in chat mode)
    pub question: Option<String>,

    /// Image to attach to the question
    #[arg(short, long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Model id or API name (see --list-models)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Number of creative/logical reply pairs before the final answer
    #[arg(short, long, value_name = "N")]
    pub exchanges: Option<usize>,

    /// Turn off the extended-reasoning budget (only for models that support it)
    #[arg(long)]
    pub no_thinking_budget: bool,

    /// Ask both agents to respond in this language
    #[arg(long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Output format [default: answer]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// List the available models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write every prompt and reply to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_with_flags() {
        let cli = Cli::try_parse_from([
            "duet",
            "-vv",
            "--model",
            "pro",
            "--exchanges",
            "3",
            "--output",
            "discussion",
            "--image",
            "chart.png",
            "What is 2+2?",
        ])
        .unwrap();

        assert_eq!(cli.question.as_deref(), Some("What is 2+2?"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.model.as_deref(), Some("pro"));
        assert_eq!(cli.exchanges, Some(3));
        assert_eq!(cli.output, Some(OutputFormat::Discussion));
        assert_eq!(cli.image, Some(PathBuf::from("chart.png")));
        assert!(!cli.chat);
        assert!(!cli.no_thinking_budget);
    }

    #[test]
    fn test_chat_mode_without_question() {
        let cli = Cli::try_parse_from(["duet", "--chat", "--no-thinking-budget"]).unwrap();
        assert!(cli.chat);
        assert!(cli.no_thinking_budget);
        assert!(cli.question.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_rejects_unknown_output_format() {
        assert!(Cli::try_parse_from(["duet", "--output", "full", "q"]).is_err());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            duet_domain::OutputFormat::from(OutputFormat::Json),
            duet_domain::OutputFormat::Json
        );
    }
}

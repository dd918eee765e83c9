//! CLI entrypoint for duet
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use duet_application::{
    ChatSession, ConversationLogger, DiscussionObserver, NoObserver, Submission,
};
use duet_domain::{DiscussionPhase, ModelRegistry, OutputFormat};
use duet_infrastructure::{
    ConfigLoader, FileConfig, GeminiInvoker, JsonlConversationLogger, LocalMediaStore,
};
use duet_presentation::{
    ChatRepl, Cli, ConsoleFormatter, ProgressReporter, ReplConfig, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    info!("Starting duet");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let registry = ModelRegistry::builtin();
    if cli.list_models {
        println!(
            "{}",
            ConsoleFormatter::format_models(&registry, &registry.default_model().id)
        );
        return Ok(());
    }

    // === Configuration ===
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut file_config, &cli);
    file_config.validate(&registry)?;

    ConsoleFormatter::set_color(file_config.output.color_enabled(cli.no_color));

    // === Dependency Injection ===
    let invoker = Arc::new(GeminiInvoker::from_config(&file_config.gemini)?);
    let media = Arc::new(LocalMediaStore::new());
    let discussion_config = file_config.to_discussion_config()?;

    let model_id = file_config
        .model
        .default
        .clone()
        .unwrap_or_else(|| registry.default_model().id.clone());
    let thinking_budget = file_config.model.thinking_budget && !cli.no_thinking_budget;

    let mut chat = ChatSession::new(invoker, media, discussion_config, registry)
        .with_settings(&model_id, thinking_budget)?;

    let log_path = cli
        .conversation_log
        .clone()
        .or_else(|| file_config.logging.conversation_log.clone());
    if let Some(path) = log_path
        && let Some(logger) = JsonlConversationLogger::new(&path)
    {
        info!("Conversation log: {}", logger.path().display());
        chat = chat.with_logger(Arc::new(logger) as Arc<dyn ConversationLogger>);
    }

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: file_config.repl.show_progress && !cli.quiet,
            history_file: file_config.repl.history_path(),
        };
        ChatRepl::new(chat).with_config(repl_config).run().await?;
        return Ok(());
    }

    // Single question mode - question or image is required
    if cli.question.is_none() && cli.image.is_none() {
        bail!("Question is required. Use --chat for interactive mode.");
    }

    let roster = chat.config().roster.clone();
    if !chat.snapshot().credentials_valid() {
        if let Some(message) = chat.snapshot().last_message() {
            eprintln!("{}", ConsoleFormatter::format_message(message, &roster));
        }
        bail!(
            "No API key found. Set {} and try again.",
            file_config.gemini.api_key_env
        );
    }

    let mut submission = Submission::text(cli.question.clone().unwrap_or_default());
    if let Some(path) = &cli.image {
        submission = submission.with_image(chat.attach(path)?);
    }

    let format = file_config
        .output
        .resolve_format(cli.output.map(OutputFormat::from));

    // Plain lines when stderr is piped; the spinner needs a terminal
    let observer: Box<dyn DiscussionObserver> = if cli.quiet || format == OutputFormat::Json {
        Box::new(NoObserver)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new(
            roster.clone(),
            DiscussionPhase::total_turns(chat.config().exchanges),
        ))
    } else {
        Box::new(SimpleProgress::new(roster.clone()))
    };

    let result = chat.submit(submission, observer.as_ref()).await;
    let state = chat.snapshot();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Discussion failed: {}", e);
            if format == OutputFormat::Json {
                println!("{}", ConsoleFormatter::format_json(&state));
            } else if let Some(message) = state.last_message() {
                eprintln!("{}", ConsoleFormatter::format_message(message, &roster));
            }
            return Err(e.into());
        }
    };

    let output = match format {
        OutputFormat::Answer => ConsoleFormatter::format_answer(&outcome),
        OutputFormat::Discussion => {
            ConsoleFormatter::format_discussion(&state, &roster, Some(&outcome))
        }
        OutputFormat::Json => ConsoleFormatter::format_json(&state),
    };
    println!("{}", output);

    Ok(())
}

/// Initialize logging based on verbosity level, optionally teeing into
/// daily log files.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "duet.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(console)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(EnvFilter::new(level))
                .with(console)
                .init();
            None
        }
    }
}

/// Command-line flags win over every configuration source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(exchanges) = cli.exchanges {
        config.discussion.exchanges = exchanges;
    }
    if let Some(language) = &cli.language {
        config.discussion.response_language = Some(language.clone());
    }
    if let Some(model) = &cli.model {
        config.model.default = Some(model.clone());
    }
}

//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use crate::config::ReplConfig;
use colored::Colorize;
use duet_application::{
    ChatSession, DiscussionError, ImageUpload, ModelInvoker, NoObserver, Submission,
};
use duet_domain::DiscussionPhase;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::Path;

/// What the loop does after a slash command
#[derive(Debug, PartialEq, Eq)]
enum ReplAction {
    Continue,
    Quit,
}

/// Interactive chat REPL
pub struct ChatRepl<G: ModelInvoker + 'static> {
    chat: ChatSession<G>,
    config: ReplConfig,
    pending_image: Option<ImageUpload>,
}

impl<G: ModelInvoker + 'static> ChatRepl<G> {
    pub fn new(chat: ChatSession<G>) -> Self {
        Self {
            chat,
            config: ReplConfig::default(),
            pending_image: None,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_banner();

        loop {
            let prompt = if self.pending_image.is_some() {
                "[img] >>> "
            } else {
                ">>> "
            };

            match rl.readline(prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !self.wants_submission(line) {
                        continue;
                    }

                    if !line.is_empty() {
                        let _ = rl.add_history_entry(line);
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) == ReplAction::Quit {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_banner(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Duet - Chat Mode               │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        // The session opens with a welcome or credential warning
        let state = self.chat.snapshot();
        let roster = &self.chat.config().roster;
        for message in state.messages() {
            println!("{}", ConsoleFormatter::format_message(message, roster));
        }
        println!();
        println!("Type /help for commands.");
        println!();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?      - Show this help");
        println!("  /models            - List available models");
        println!("  /model <id>        - Switch model");
        println!("  /budget            - Toggle the extended-reasoning budget");
        println!("  /image <path>      - Attach an image to the next question");
        println!("  /notepad           - Show the shared notepad");
        println!("  /clear             - Start a new conversation");
        println!("  /quit, /exit, /q   - Exit chat");
        println!();
    }

    /// Handle slash commands.
    fn handle_command(&mut self, line: &str) -> ReplAction {
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return ReplAction::Quit;
            }
            "/help" | "/h" | "/?" => Self::print_help(),
            "/models" => {
                let current = self.chat.settings().model.id;
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_models(self.chat.registry(), &current)
                );
                println!();
            }
            "/model" if arg.is_empty() => {
                let settings = self.chat.settings();
                println!(
                    "Current model: {} (thinking budget {})",
                    settings.model,
                    if settings.thinking_budget_enabled { "on" } else { "off" }
                );
            }
            "/model" => match self.chat.select_model(arg) {
                Ok(model) => println!("Switched to {}", model.to_string().bold()),
                Err(e) => println!("{} {}", "Error:".red(), e),
            },
            "/budget" => match self.chat.toggle_thinking_budget() {
                Ok(enabled) => println!(
                    "Extended-reasoning budget {}",
                    if enabled { "enabled" } else { "disabled" }
                ),
                Err(e) => println!("{} {}", "Error:".red(), e),
            },
            "/image" if arg.is_empty() => match self.pending_image.take() {
                Some(image) => println!("Detached {}", image.file_name),
                None => println!("Usage: /image <path>"),
            },
            "/image" => self.attach(Path::new(arg)),
            "/notepad" => {
                let state = self.chat.snapshot();
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_notepad(state.notepad(), &self.chat.config().roster)
                );
            }
            "/clear" => match self.chat.clear() {
                Ok(()) => {
                    self.pending_image = None;
                    if let Some(message) = self.chat.snapshot().last_message() {
                        println!(
                            "{}",
                            ConsoleFormatter::format_message(message, &self.chat.config().roster)
                        );
                    }
                }
                Err(e) => println!("{} {}", "Error:".red(), e),
            },
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        ReplAction::Continue
    }

    fn attach(&mut self, path: &Path) {
        if !path.is_file() {
            println!("{} no such file: {}", "Error:".red(), path.display());
            return;
        }
        match self.chat.attach(path) {
            Ok(upload) => {
                println!("Attached {} ({})", upload.file_name, upload.mime_type);
                self.pending_image = Some(upload);
            }
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }

    /// A blank line still submits when an image is attached
    fn wants_submission(&self, line: &str) -> bool {
        !line.is_empty() || self.pending_image.is_some()
    }

    async fn process_question(&mut self, question: &str) {
        println!();

        let mut submission = Submission::text(question);
        if let Some(image) = self.pending_image.take() {
            submission = submission.with_image(image);
        }

        let config = self.chat.config();
        let result = if self.config.show_progress {
            let progress = ProgressReporter::new(
                config.roster.clone(),
                DiscussionPhase::total_turns(config.exchanges),
            )
            .with_echo(true);
            self.chat.submit(submission, &progress).await
        } else {
            self.chat.submit(submission, &NoObserver).await
        };

        match result {
            Ok(outcome) if !self.config.show_progress => {
                println!("{}", ConsoleFormatter::format_answer(&outcome));
            }
            Ok(_) => {}
            // Turn and image failures are already in the transcript
            Err(DiscussionError::TurnFailed { .. } | DiscussionError::Media(_))
                if self.config.show_progress => {}
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use duet_application::{
        DiscussionConfig, GatewayError, Generation, InlineImage, InvocationRequest, MediaError,
        MediaPort,
    };
    use duet_domain::{ImageAttachment, ModelRegistry};
    use std::sync::Arc;
    use std::time::Duration;

    struct EchoInvoker;

    #[async_trait]
    impl ModelInvoker for EchoInvoker {
        async fn invoke(
            &self,
            _request: InvocationRequest<'_>,
        ) -> Result<Generation, GatewayError> {
            Ok(Generation::new("ok", Duration::from_millis(1)))
        }

        fn credentials_configured(&self) -> bool {
            true
        }
    }

    struct NoMedia;

    #[async_trait]
    impl MediaPort for NoMedia {
        fn describe(&self, path: &Path) -> Result<ImageUpload, MediaError> {
            Err(MediaError::UnsupportedType(path.display().to_string()))
        }

        fn open_display(&self, upload: &ImageUpload) -> ImageAttachment {
            ImageAttachment {
                display_url: String::new(),
                file_name: upload.file_name.clone(),
                mime_type: upload.mime_type.clone(),
            }
        }

        fn release_display(&self, _attachment: &ImageAttachment) {}

        async fn encode(&self, upload: &ImageUpload) -> Result<InlineImage, MediaError> {
            Err(MediaError::Empty(upload.path.clone()))
        }
    }

    fn repl() -> ChatRepl<EchoInvoker> {
        let chat = ChatSession::new(
            Arc::new(EchoInvoker),
            Arc::new(NoMedia),
            DiscussionConfig::default(),
            ModelRegistry::builtin(),
        );
        ChatRepl::new(chat).with_config(ReplConfig {
            show_progress: false,
            history_file: None,
        })
    }

    #[test]
    fn test_quit_commands() {
        let mut repl = repl();
        assert_eq!(repl.handle_command("/quit"), ReplAction::Quit);
        assert_eq!(repl.handle_command("/q"), ReplAction::Quit);
        assert_eq!(repl.handle_command("/help"), ReplAction::Continue);
    }

    #[test]
    fn test_model_and_budget_commands() {
        let mut repl = repl();
        repl.handle_command("/model pro");
        assert_eq!(repl.chat.settings().model.id, "pro");

        // Unknown ids leave the selection alone
        repl.handle_command("/model nope");
        assert_eq!(repl.chat.settings().model.id, "pro");

        repl.handle_command("/model flash");
        repl.handle_command("/budget");
        assert!(!repl.chat.settings().thinking_budget_enabled);
    }

    #[tokio::test]
    async fn test_question_then_clear() {
        let mut repl = repl();
        repl.process_question("What is 2+2?").await;
        assert!(repl.chat.snapshot().messages().len() > 1);

        repl.handle_command("/clear");
        assert_eq!(repl.chat.snapshot().messages().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_line_with_pending_image_is_submitted() {
        let mut repl = repl();
        assert!(!repl.wants_submission(""));

        repl.pending_image = Some(ImageUpload {
            path: "/tmp/cat.png".into(),
            file_name: "cat.png".to_string(),
            mime_type: "image/png".to_string(),
        });
        assert!(repl.wants_submission(""));

        repl.process_question("").await;
        assert!(repl.pending_image.is_none());
        let state = repl.chat.snapshot();
        let user = state
            .messages()
            .iter()
            .find(|m| m.sender() == duet_domain::Sender::User)
            .unwrap();
        assert_eq!(user.text(), "");
        assert_eq!(user.image().unwrap().file_name, "cat.png");
    }

    #[test]
    fn test_attach_missing_file_keeps_no_pending_image() {
        let mut repl = repl();
        repl.handle_command("/image /definitely/not/here.png");
        assert!(repl.pending_image.is_none());
    }
}

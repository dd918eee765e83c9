//! Console output formatter for discussions

use colored::{ColoredString, Colorize};
use duet_domain::{
    AgentRole, AgentRoster, DiscussionOutcome, Message, ModelRegistry, Notepad, NoticeKind,
    Sender, SessionState,
};

/// Formats messages, notepads and outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn colored output on or off for the whole process
    pub fn set_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Final answer only (concise output)
    pub fn format_answer(outcome: &DiscussionOutcome) -> String {
        format!(
            "{}\n\n{}\n",
            outcome.answer,
            Self::stats(outcome).dimmed()
        )
    }

    /// The whole session: every message in order, then the notepad
    pub fn format_discussion(
        state: &SessionState,
        roster: &AgentRoster,
        outcome: Option<&DiscussionOutcome>,
    ) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Duet Discussion"));
        output.push('\n');

        for message in state.messages() {
            output.push('\n');
            output.push_str(&Self::format_message(message, roster));
            output.push('\n');
        }

        output.push_str(&Self::section_header("Shared Notepad"));
        output.push_str(&Self::format_notepad(state.notepad(), roster));

        if let Some(outcome) = outcome {
            output.push_str(&format!("\n{}\n", Self::stats(outcome).dimmed()));
        }
        output.push_str(&Self::footer());

        output
    }

    /// Format the session snapshot as JSON
    pub fn format_json(state: &SessionState) -> String {
        serde_json::to_string_pretty(state).unwrap_or_else(|_| "{}".to_string())
    }

    /// One message with its speaker label
    pub fn format_message(message: &Message, roster: &AgentRoster) -> String {
        let mut label = match message.sender() {
            Sender::User => "You".green().bold().to_string(),
            Sender::System => return Self::format_notice(message),
            sender => {
                let role = sender.agent_role().unwrap_or(AgentRole::Logical);
                Self::agent_label(roster, role).to_string()
            }
        };

        if let Some(elapsed_ms) = message.elapsed_ms() {
            label.push_str(&format!(" {}", Self::seconds(elapsed_ms).dimmed()));
        }

        let mut output = format!("{}\n{}", label, message.text());
        if let Some(image) = message.image() {
            output.push_str(&format!(
                "\n{}",
                format!("[image: {}]", image.file_name).dimmed()
            ));
        }
        output
    }

    /// The notepad with its last writer
    pub fn format_notepad(notepad: &Notepad, roster: &AgentRoster) -> String {
        let attribution = match notepad.last_updated_by() {
            Some(role) => format!("last updated by {}", roster.name(role)),
            None => "not updated yet".to_string(),
        };
        format!(
            "{}\n{}\n",
            format!("({})", attribution).dimmed(),
            Self::indent(notepad.content(), "  │ ")
        )
    }

    /// Selectable models, marking the current one
    pub fn format_models(registry: &ModelRegistry, current: &str) -> String {
        registry
            .models()
            .iter()
            .map(|model| {
                let marker = if model.id == current { "*" } else { " " };
                let budget = if model.supports_thinking_budget {
                    " (thinking budget)".dimmed().to_string()
                } else {
                    String::new()
                };
                format!(
                    "{} {:<8} {} [{}]{}",
                    marker, model.id, model.name, model.api_name, budget
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_notice(message: &Message) -> String {
        let text = message.text();
        match message.notice() {
            Some(NoticeKind::Welcome) => text.green().to_string(),
            Some(NoticeKind::CredentialWarning) => text.yellow().bold().to_string(),
            Some(NoticeKind::Error) => text.red().to_string(),
            Some(NoticeKind::Advisory) | None => text.dimmed().italic().to_string(),
        }
    }

    fn agent_label(roster: &AgentRoster, role: AgentRole) -> ColoredString {
        let name = format!("{}:", roster.name(role));
        match role {
            AgentRole::Logical => name.blue().bold(),
            AgentRole::Creative => name.magenta().bold(),
        }
    }

    fn stats(outcome: &DiscussionOutcome) -> String {
        format!(
            "{} turns, {} notepad updates, {}",
            outcome.turns.len(),
            outcome.notepad_updates(),
            Self::seconds(outcome.total_elapsed_ms)
        )
    }

    fn seconds(ms: u64) -> String {
        format!("({:.1}s)", ms as f64 / 1000.0)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

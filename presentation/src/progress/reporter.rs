//! Progress reporting for a running discussion

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use duet_application::DiscussionObserver;
use duet_domain::{AgentRoster, DiscussionPhase, Message, Notepad, Sender};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner with a turn counter, optionally echoing each message as it lands
pub struct ProgressReporter {
    bar: ProgressBar,
    roster: AgentRoster,
    echo_messages: bool,
}

impl ProgressReporter {
    pub fn new(roster: AgentRoster, total_turns: usize) -> Self {
        let bar = ProgressBar::new(total_turns as u64);
        bar.set_style(Self::turn_style());
        bar.set_prefix("Discussing");
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            bar,
            roster,
            echo_messages: false,
        }
    }

    /// Print every agent and system message above the spinner
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_messages = echo;
        self
    }

    fn turn_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

// A submission rejected before its first turn never reaches
// `on_discussion_end`; clear the bar instead of leaving it on screen.
impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl DiscussionObserver for ProgressReporter {
    fn on_message(&self, message: &Message) {
        if message.sender().agent_role().is_some() {
            self.bar.inc(1);
        }
        if self.echo_messages && message.sender() != Sender::User {
            self.bar
                .println(format!("{}\n", ConsoleFormatter::format_message(message, &self.roster)));
        }
    }

    fn on_turn_start(&self, phase: &DiscussionPhase, speaker: &str) {
        self.bar.set_message(format!("{} ({})", speaker, phase));
    }

    fn on_notepad_updated(&self, notepad: &Notepad) {
        if self.echo_messages {
            self.bar.println(format!(
                "{}\n{}",
                "Notepad updated".cyan().bold(),
                ConsoleFormatter::format_notepad(notepad, &self.roster)
            ));
        }
    }

    fn on_discussion_end(&self, success: bool) {
        if success {
            self.bar.finish_and_clear();
        } else {
            self.bar.abandon_with_message("discussion failed".red().to_string());
        }
    }
}

/// Plain-line progress on stderr, for when no terminal is attached
pub struct SimpleProgress {
    roster: AgentRoster,
}

impl SimpleProgress {
    pub fn new(roster: AgentRoster) -> Self {
        Self { roster }
    }
}

impl DiscussionObserver for SimpleProgress {
    fn on_message(&self, message: &Message) {
        match message.sender() {
            Sender::User => {}
            Sender::System => eprintln!("{} {}", "->".cyan(), message.text().dimmed()),
            _ => {
                let preview = duet_domain::core::string::preview(message.text(), 72);
                let speaker = message
                    .sender()
                    .agent_role()
                    .map(|role| self.roster.name(role).to_string())
                    .unwrap_or_default();
                eprintln!("  {} {}: {}", "v".green(), speaker.bold(), preview);
            }
        }
    }

    fn on_notepad_updated(&self, notepad: &Notepad) {
        let by = notepad
            .last_updated_by()
            .map(|role| self.roster.name(role).to_string())
            .unwrap_or_default();
        eprintln!("  {} notepad rewritten by {}", "*".yellow(), by);
    }

    fn on_discussion_end(&self, success: bool) {
        if !success {
            eprintln!("  {} discussion failed", "x".red());
        }
        eprintln!();
    }
}

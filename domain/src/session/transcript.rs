//! Discussion transcript threaded into prompts

use serde::{Deserialize, Serialize};

/// One spoken turn in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub speaker: String,
    pub text: String,
}

/// Ordered `"{speaker}: {text}"` lines of the agent-to-agent exchange
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionTranscript {
    lines: Vec<TranscriptLine>,
}

impl DiscussionTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: impl Into<String>, text: impl Into<String>) {
        self.lines.push(TranscriptLine {
            speaker: speaker.into(),
            text: text.into(),
        });
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render as newline-separated `"{speaker}: {text}"` lines
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}: {}", l.speaker, l.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for DiscussionTranscript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let mut transcript = DiscussionTranscript::new();
        transcript.push("Cognito", "Start.");
        transcript.push("Muse", "Reply.");
        assert_eq!(transcript.render(), "Cognito: Start.\nMuse: Reply.");
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_empty_render() {
        assert_eq!(DiscussionTranscript::new().render(), "");
    }
}

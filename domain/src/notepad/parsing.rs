//! Notepad update extraction from raw agent responses.
//!
//! An agent replaces the notepad by ending its reply with
//!
//! ```text
//! <notepad_update>
//! new full content
//! </notepad_update>
//! ```
//!
//! The LAST occurrence of each marker is used, so an agent may quote the
//! syntax earlier in its reply without triggering an update.

/// Start marker of a notepad update
pub const NOTEPAD_UPDATE_START: &str = "<notepad_update>";

/// End marker of a notepad update
pub const NOTEPAD_UPDATE_END: &str = "</notepad_update>";

/// Spoken text used when an agent replied with nothing but a notepad update.
pub const SILENT_UPDATE_PLACEHOLDER: &str = "(The agent updated the notepad.)";

/// Spoken text used when an agent sent an empty update and nothing else.
pub const EMPTY_UPDATE_PLACEHOLDER: &str =
    "(The agent tried to update the notepad, but the update was empty.)";

/// An agent response split into its two parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    /// Text addressed to the other agent (or the user, for the final answer)
    pub spoken_text: String,
    /// Full replacement for the notepad. `Some("")` clears the notepad;
    /// `None` leaves it unchanged.
    pub notepad_update: Option<String>,
}

impl ParsedResponse {
    fn spoken_only(text: impl Into<String>) -> Self {
        Self {
            spoken_text: text.into(),
            notepad_update: None,
        }
    }

    pub fn has_update(&self) -> bool {
        self.notepad_update.is_some()
    }
}

/// Split a raw model response into spoken text and an optional notepad update.
///
/// # Examples
///
/// ```
/// use duet_domain::notepad::parsing::parse_response;
///
/// let parsed = parse_response("Agreed.\n<notepad_update>\n- point A\n</notepad_update>");
/// assert_eq!(parsed.spoken_text, "Agreed.");
/// assert_eq!(parsed.notepad_update.as_deref(), Some("- point A"));
///
/// let parsed = parse_response("  no markers here ");
/// assert_eq!(parsed.spoken_text, "no markers here");
/// assert!(parsed.notepad_update.is_none());
/// ```
pub fn parse_response(raw: &str) -> ParsedResponse {
    let (Some(start), Some(end)) = (
        raw.rfind(NOTEPAD_UPDATE_START),
        raw.rfind(NOTEPAD_UPDATE_END),
    ) else {
        return ParsedResponse::spoken_only(raw.trim());
    };

    let content_start = start + NOTEPAD_UPDATE_START.len();
    let Some(inner) = raw.get(content_start..end).filter(|_| end > start) else {
        return ParsedResponse::spoken_only(raw.trim());
    };

    let update = inner.trim();
    let spoken = raw[..start].trim();

    if spoken.is_empty() && !update.is_empty() {
        let bare = format!("{}{}{}", NOTEPAD_UPDATE_START, update, NOTEPAD_UPDATE_END);
        if raw.trim() == bare {
            return ParsedResponse {
                spoken_text: SILENT_UPDATE_PLACEHOLDER.to_string(),
                notepad_update: Some(update.to_string()),
            };
        }
    } else if spoken.is_empty() && update.is_empty() && raw.contains(NOTEPAD_UPDATE_START) {
        // Nothing said and nothing written: never apply an empty overwrite here
        let stripped = raw
            .replacen(NOTEPAD_UPDATE_START, "", 1)
            .replacen(NOTEPAD_UPDATE_END, "", 1);
        let stripped = stripped.trim();
        let spoken_text = if stripped.is_empty() {
            EMPTY_UPDATE_PLACEHOLDER
        } else {
            stripped
        };
        return ParsedResponse::spoken_only(spoken_text);
    }

    ParsedResponse {
        spoken_text: if spoken.is_empty() {
            SILENT_UPDATE_PLACEHOLDER.to_string()
        } else {
            spoken.to_string()
        },
        notepad_update: Some(update.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(content: &str) -> String {
        format!("{}{}{}", NOTEPAD_UPDATE_START, content, NOTEPAD_UPDATE_END)
    }

    #[test]
    fn test_spoken_text_and_update() {
        let raw = format!("Let's list the options.\n{}", wrap("\n1. A\n2. B\n"));
        let parsed = parse_response(&raw);
        assert_eq!(parsed.spoken_text, "Let's list the options.");
        assert_eq!(parsed.notepad_update.as_deref(), Some("1. A\n2. B"));
    }

    #[test]
    fn test_no_markers() {
        let parsed = parse_response("\n  Four.  \n");
        assert_eq!(parsed.spoken_text, "Four.");
        assert_eq!(parsed.notepad_update, None);
    }

    #[test]
    fn test_bare_update_gets_silent_placeholder() {
        let parsed = parse_response(&wrap("X"));
        assert_eq!(parsed.spoken_text, SILENT_UPDATE_PLACEHOLDER);
        assert_eq!(parsed.notepad_update.as_deref(), Some("X"));
    }

    #[test]
    fn test_bare_update_with_surrounding_whitespace() {
        let parsed = parse_response(&format!("  \n{}\n", wrap("X")));
        assert_eq!(parsed.spoken_text, SILENT_UPDATE_PLACEHOLDER);
        assert_eq!(parsed.notepad_update.as_deref(), Some("X"));
    }

    #[test]
    fn test_empty_update_without_text_is_not_applied() {
        let parsed = parse_response("<notepad_update></notepad_update>");
        assert_eq!(parsed.spoken_text, EMPTY_UPDATE_PLACEHOLDER);
        assert_eq!(parsed.notepad_update, None);
    }

    #[test]
    fn test_empty_update_with_trailing_text_keeps_the_text() {
        let parsed = parse_response("<notepad_update>  </notepad_update> trailing words");
        assert_eq!(parsed.spoken_text, "trailing words");
        assert_eq!(parsed.notepad_update, None);
    }

    #[test]
    fn test_empty_update_after_text_clears_notepad() {
        let parsed = parse_response(&format!("Clearing it out. {}", wrap("   ")));
        assert_eq!(parsed.spoken_text, "Clearing it out.");
        assert_eq!(parsed.notepad_update.as_deref(), Some(""));
    }

    #[test]
    fn test_update_with_trailing_content_and_no_text() {
        // Content after the end marker means it is not a bare update, but the
        // update is still applied and the placeholder stands in for speech.
        let parsed = parse_response(&format!("{} and more", wrap("notes")));
        assert_eq!(parsed.spoken_text, SILENT_UPDATE_PLACEHOLDER);
        assert_eq!(parsed.notepad_update.as_deref(), Some("notes"));
    }

    #[test]
    fn test_end_before_start_is_ignored() {
        let raw = "oops </notepad_update> then <notepad_update> unterminated";
        let parsed = parse_response(raw);
        assert_eq!(parsed.spoken_text, raw);
        assert_eq!(parsed.notepad_update, None);
    }

    #[test]
    fn test_missing_end_marker() {
        let parsed = parse_response("text <notepad_update> never closed");
        assert_eq!(parsed.spoken_text, "text <notepad_update> never closed");
        assert!(!parsed.has_update());
    }

    #[test]
    fn test_last_occurrence_wins() {
        let raw = format!(
            "Use the syntax {} to write. Done.\n{}",
            wrap("example"),
            wrap("real content")
        );
        let parsed = parse_response(&raw);
        assert_eq!(parsed.notepad_update.as_deref(), Some("real content"));
        assert!(parsed.spoken_text.starts_with("Use the syntax"));
        assert!(parsed.spoken_text.ends_with("Done."));
    }

    #[test]
    fn test_multibyte_content() {
        let parsed = parse_response(&format!("好的。{}", wrap("要点：一、二")));
        assert_eq!(parsed.spoken_text, "好的。");
        assert_eq!(parsed.notepad_update.as_deref(), Some("要点：一、二"));
    }
}

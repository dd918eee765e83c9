//! Prompt templates for each discussion turn

use crate::agent::AgentProfile;
use crate::notepad::{NOTEPAD_UPDATE_END, NOTEPAD_UPDATE_START};
use crate::orchestration::TurnKind;
use crate::session::DiscussionTranscript;

/// Everything a prompt is built from
///
/// `notepad` must be read from session state immediately before the prompt
/// is built, never from a snapshot taken earlier in the discussion.
#[derive(Debug, Clone, Copy)]
pub struct PromptRequest<'a> {
    pub kind: TurnKind,
    pub speaker: &'a AgentProfile,
    pub opponent: &'a AgentProfile,
    pub query: &'a str,
    pub has_image: bool,
    pub transcript: &'a DiscussionTranscript,
    /// What the opponent said in the previous turn
    pub last_utterance: Option<&'a str>,
    pub notepad: &'a str,
    /// Optional "Respond in ..." instruction
    pub language: Option<&'a str>,
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Build the exact prompt text for a turn.
    pub fn build(request: &PromptRequest<'_>) -> String {
        match request.kind {
            TurnKind::Opening => Self::opening(request),
            TurnKind::Reply => Self::reply(request),
            TurnKind::Synthesis => Self::synthesis(request),
        }
    }

    /// Note added when the user attached an image
    pub fn image_note() -> &'static str {
        "The user also provided an image. Consider both the image and the text query in your analysis and reply."
    }

    /// Instructions describing the notepad and its update syntax
    pub fn notepad_block(content: &str) -> String {
        format!(
            r#"
You also have access to a shared notepad.
Current Notepad Content:
---
{content}
---
Instructions for Notepad:
1. To update the notepad, include a section at the very end of your response, formatted exactly as:
   {start}
   [YOUR NEW FULL NOTEPAD CONTENT HERE. THIS WILL REPLACE THE ENTIRE CURRENT NOTEPAD CONTENT.]
   {end}
2. If you do not want to change the notepad, do NOT include the {start} section at all. The notepad then stays unchanged.
3. Your primary spoken response should come BEFORE any {start} section. Ensure you still provide a spoken response.
"#,
            content = content,
            start = NOTEPAD_UPDATE_START,
            end = NOTEPAD_UPDATE_END,
        )
    }

    fn preamble(request: &PromptRequest<'_>, query_label: &str) -> String {
        let mut prompt = format!(
            "{} {} \"{}\".",
            request.speaker.header, query_label, request.query
        );
        if request.has_image {
            prompt.push(' ');
            prompt.push_str(Self::image_note());
        }
        prompt
    }

    fn style(request: &PromptRequest<'_>) -> String {
        match request.language {
            Some(language) => format!(" Keep your reply concise and respond in {}.", language),
            None => " Keep your reply concise.".to_string(),
        }
    }

    fn opening(request: &PromptRequest<'_>) -> String {
        let opponent = request.opponent;
        format!(
            "{} Your task is to discuss this query with {} ({}). Formulate your opening statement or question to {} to start the discussion.{}\n{}",
            Self::preamble(request, "The user's query is:"),
            opponent.name,
            opponent.role.description(),
            opponent.name,
            Self::style(request),
            Self::notepad_block(request.notepad),
        )
    }

    fn reply(request: &PromptRequest<'_>) -> String {
        let opponent = request.opponent;
        let mut prompt = format!(
            "{} Current discussion:\n{}\n",
            Self::preamble(request, "The user's query is:"),
            request.transcript.render(),
        );
        if let Some(last) = request.last_utterance {
            prompt.push_str(&format!(
                "{} ({}) just said: \"{}\". ",
                opponent.name,
                opponent.role.description(),
                last
            ));
        }
        prompt.push_str(&format!(
            "Reply to {}. Continue the discussion.{}\n{}",
            opponent.name,
            Self::style(request),
            Self::notepad_block(request.notepad),
        ));
        prompt
    }

    fn synthesis(request: &PromptRequest<'_>) -> String {
        let opponent = request.opponent;
        let language = match request.language {
            Some(language) => format!(" Respond in {}.", language),
            None => String::new(),
        };
        format!(
            "{} You ({}) and {} had the following discussion:\n{}\nBased on the entire exchange and the final state of the shared notepad, synthesize all key points and formulate a comprehensive, helpful final answer for the user. Address the user directly, not {}. Make sure the answer is well structured and easy to understand.{} You may reference the notepad in your answer if relevant. If you consider it necessary, you may also update the notepad one last time using the standard notepad update instructions.\n{}",
            Self::preamble(request, "The user's original query was:"),
            request.speaker.name,
            opponent.name,
            request.transcript.render(),
            opponent.name,
            language,
            Self::notepad_block(request.notepad),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentRoster;

    fn request<'a>(
        kind: TurnKind,
        roster: &'a AgentRoster,
        transcript: &'a DiscussionTranscript,
        notepad: &'a str,
    ) -> PromptRequest<'a> {
        let (speaker, opponent) = match kind {
            TurnKind::Reply => (&roster.creative, &roster.logical),
            _ => (&roster.logical, &roster.creative),
        };
        PromptRequest {
            kind,
            speaker,
            opponent,
            query: "What is 2+2?",
            has_image: false,
            transcript,
            last_utterance: None,
            notepad,
            language: None,
        }
    }

    #[test]
    fn test_opening_prompt() {
        let roster = AgentRoster::default();
        let transcript = DiscussionTranscript::new();
        let prompt = PromptTemplate::build(&request(
            TurnKind::Opening,
            &roster,
            &transcript,
            "NOTES-1",
        ));

        assert!(prompt.starts_with("You are Cognito, a highly logical AI."));
        assert!(prompt.contains("\"What is 2+2?\""));
        assert!(prompt.contains("discuss this query with Muse (a creative AI)"));
        assert!(prompt.contains("---\nNOTES-1\n---"));
        assert!(prompt.contains(NOTEPAD_UPDATE_START));
        assert!(!prompt.contains(PromptTemplate::image_note()));
    }

    #[test]
    fn test_image_note_included_when_image_present() {
        let roster = AgentRoster::default();
        let transcript = DiscussionTranscript::new();
        let mut req = request(TurnKind::Opening, &roster, &transcript, "");
        req.has_image = true;
        assert!(PromptTemplate::build(&req).contains(PromptTemplate::image_note()));
    }

    #[test]
    fn test_reply_prompt_quotes_transcript_and_last_utterance() {
        let roster = AgentRoster::default();
        let mut transcript = DiscussionTranscript::new();
        transcript.push("Cognito", "It is four.");
        let mut req = request(TurnKind::Reply, &roster, &transcript, "fresh notes");
        req.last_utterance = Some("It is four.");

        let prompt = PromptTemplate::build(&req);
        assert!(prompt.starts_with("You are Muse"));
        assert!(prompt.contains("Current discussion:\nCognito: It is four.\n"));
        assert!(prompt.contains("Cognito (a logical AI) just said: \"It is four.\""));
        assert!(prompt.contains("Reply to Cognito. Continue the discussion."));
        assert!(prompt.contains("---\nfresh notes\n---"));
    }

    #[test]
    fn test_reply_prompt_without_last_utterance() {
        let roster = AgentRoster::default();
        let transcript = DiscussionTranscript::new();
        let prompt = PromptTemplate::build(&request(TurnKind::Reply, &roster, &transcript, ""));
        assert!(!prompt.contains("just said"));
        assert!(prompt.contains("Reply to Cognito."));
    }

    #[test]
    fn test_synthesis_prompt_addresses_user() {
        let roster = AgentRoster::default();
        let mut transcript = DiscussionTranscript::new();
        transcript.push("Cognito", "Four.");
        transcript.push("Muse", "Four apples.");
        let prompt = PromptTemplate::build(&request(
            TurnKind::Synthesis,
            &roster,
            &transcript,
            "final notes",
        ));

        assert!(prompt.contains("The user's original query was: \"What is 2+2?\""));
        assert!(prompt.contains("You (Cognito) and Muse had the following discussion:"));
        assert!(prompt.contains("Cognito: Four.\nMuse: Four apples."));
        assert!(prompt.contains("Address the user directly, not Muse."));
        assert!(prompt.contains("---\nfinal notes\n---"));
    }

    #[test]
    fn test_language_instruction() {
        let roster = AgentRoster::default();
        let transcript = DiscussionTranscript::new();
        let mut req = request(TurnKind::Opening, &roster, &transcript, "");
        req.language = Some("French");
        assert!(PromptTemplate::build(&req).contains("respond in French."));

        req.kind = TurnKind::Synthesis;
        assert!(PromptTemplate::build(&req).contains("Respond in French."));
    }

    #[test]
    fn test_notepad_block_mentions_unchanged_rule() {
        let block = PromptTemplate::notepad_block("abc");
        assert!(block.contains("stays unchanged"));
        assert!(block.contains(NOTEPAD_UPDATE_END));
    }
}

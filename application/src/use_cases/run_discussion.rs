//! Run Discussion use case
//!
//! Drives the fixed turn schedule: an opening statement by the logical
//! agent, alternating creative/logical replies, and a final synthesis.
//! Turns run strictly one after another; each one re-reads the notepad,
//! builds its prompt, invokes the model, parses the reply and updates the
//! session before the next turn starts.

use crate::config::DiscussionConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::media::MediaError;
use crate::ports::model_invoker::{GatewayError, InlineImage, InvocationRequest, ModelInvoker};
use crate::ports::observer::DiscussionObserver;
use crate::use_cases::shared::SharedSession;
use duet_domain::core::string::preview;
use duet_domain::{
    DiscussionOutcome, DiscussionPhase, DiscussionTranscript, Message, ModelDescriptor,
    NoticeKind, PromptRequest, PromptTemplate, TurnKind, TurnPlan, TurnRecord, parse_response,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end or prevent a discussion
#[derive(Error, Debug)]
pub enum DiscussionError {
    #[error("A discussion is already in progress")]
    Busy,

    #[error("API credentials are missing or invalid")]
    CredentialsUnavailable,

    #[error("Nothing to submit: enter a question or attach an image")]
    EmptySubmission,

    #[error("Image processing failed: {0}")]
    Media(#[from] MediaError),

    #[error("{speaker} failed during the {phase}: {source}")]
    TurnFailed {
        phase: DiscussionPhase,
        speaker: String,
        #[source]
        source: GatewayError,
    },
}

impl DiscussionError {
    /// Whether the failure invalidated the session's credentials
    pub fn is_credential_error(&self) -> bool {
        matches!(self, DiscussionError::TurnFailed { source, .. } if source.is_credential_error())
    }
}

/// Input for the RunDiscussion use case
#[derive(Debug, Clone)]
pub struct RunDiscussionInput {
    /// The user's query, verbatim
    pub query: String,
    pub model: ModelDescriptor,
    pub disable_extended_reasoning: bool,
    /// Image sent with every invocation, if the user attached one
    pub image: Option<InlineImage>,
}

impl RunDiscussionInput {
    pub fn new(query: impl Into<String>, model: ModelDescriptor) -> Self {
        Self {
            query: query.into(),
            model,
            disable_extended_reasoning: false,
            image: None,
        }
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_extended_reasoning_disabled(mut self, disabled: bool) -> Self {
        self.disable_extended_reasoning = disabled;
        self
    }
}

/// Turn state carried between iterations
struct TurnContext<'a> {
    input: &'a RunDiscussionInput,
    transcript: &'a DiscussionTranscript,
    last_utterance: Option<&'a str>,
}

/// Use case for running one discussion
pub struct RunDiscussionUseCase<G: ModelInvoker + 'static> {
    gateway: Arc<G>,
    config: DiscussionConfig,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: ModelInvoker + 'static> RunDiscussionUseCase<G> {
    pub fn new(gateway: Arc<G>, config: DiscussionConfig) -> Self {
        Self {
            gateway,
            config,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &DiscussionConfig {
        &self.config
    }

    /// Run every turn of the schedule against `session`.
    ///
    /// On an invocation error the remaining turns are skipped, a single
    /// System error message is appended, and (for credential errors) the
    /// session's credentials are marked invalid.
    pub async fn execute(
        &self,
        input: &RunDiscussionInput,
        session: &SharedSession,
        observer: &dyn DiscussionObserver,
    ) -> Result<DiscussionOutcome, DiscussionError> {
        let started = Instant::now();
        let exchanges = self.config.exchanges;

        info!(
            model = %input.model.api_name,
            exchanges,
            has_image = input.image.is_some(),
            "Starting discussion"
        );
        self.logger.log(ConversationEvent::new(
            ConversationEvent::DISCUSSION_STARTED,
            json!({
                "query": input.query,
                "model": input.model.api_name,
                "exchanges": exchanges,
                "has_image": input.image.is_some(),
                "disable_extended_reasoning": input.disable_extended_reasoning,
            }),
        ));

        let mut transcript = DiscussionTranscript::new();
        let mut last_utterance: Option<String> = None;
        let mut turns: Vec<TurnRecord> = Vec::new();
        let mut phase = DiscussionPhase::start();

        while let Some(plan) = phase.turn() {
            let ctx = TurnContext {
                input,
                transcript: &transcript,
                last_utterance: last_utterance.as_deref(),
            };

            let record = match self.run_turn(&phase, plan, &ctx, session, observer).await {
                Ok(record) => record,
                Err(source) => {
                    let failed_at = phase;
                    phase = phase.fail();
                    warn!(phase = %failed_at, state = %phase, "Discussion aborted: {}", source);
                    self.report_failure(&source, session, observer);
                    observer.on_discussion_end(false);
                    return Err(DiscussionError::TurnFailed {
                        phase: failed_at,
                        speaker: self.config.roster.name(plan.speaker).to_string(),
                        source,
                    });
                }
            };

            // Only agent-to-agent turns feed later prompts; the answer does not
            if plan.purpose.is_agent_to_agent() {
                transcript.push(self.config.roster.name(plan.speaker), &record.spoken_text);
                last_utterance = Some(record.spoken_text.clone());
            }
            turns.push(record);
            phase = phase.advance(exchanges);
        }

        let answer = turns
            .last()
            .map(|t| t.spoken_text.clone())
            .unwrap_or_default();
        let total_elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let outcome = DiscussionOutcome {
            answer,
            turns,
            notepad: session.notepad_content(),
            total_elapsed_ms,
        };

        info!(
            turns = outcome.turns.len(),
            notepad_updates = outcome.notepad_updates(),
            total_elapsed_ms,
            "Discussion complete"
        );
        self.logger.log(ConversationEvent::new(
            ConversationEvent::DISCUSSION_COMPLETED,
            json!({
                "answer": outcome.answer,
                "turns": outcome.turns.len(),
                "notepad": outcome.notepad,
                "total_elapsed_ms": total_elapsed_ms,
            }),
        ));
        observer.on_discussion_end(true);

        Ok(outcome)
    }

    /// Run a single turn: advisory, prompt, invoke, parse, apply.
    async fn run_turn(
        &self,
        phase: &DiscussionPhase,
        plan: TurnPlan,
        ctx: &TurnContext<'_>,
        session: &SharedSession,
        observer: &dyn DiscussionObserver,
    ) -> Result<TurnRecord, GatewayError> {
        let roster = &self.config.roster;
        let speaker = roster.profile(plan.speaker);
        let opponent = roster.profile(plan.speaker.opponent());

        let advisory = Message::system(
            NoticeKind::Advisory,
            self.advisory_text(plan, &ctx.input.model),
        );
        session.push(advisory.clone());
        observer.on_message(&advisory);
        observer.on_turn_start(phase, &speaker.name);

        // Read the notepad now: the previous turn may just have rewritten it
        let notepad = session.notepad_content();
        let prompt = PromptTemplate::build(&PromptRequest {
            kind: plan.kind,
            speaker,
            opponent,
            query: &ctx.input.query,
            has_image: ctx.input.image.is_some(),
            transcript: ctx.transcript,
            last_utterance: ctx.last_utterance,
            notepad: &notepad,
            language: self.config.response_language.as_deref(),
        });

        debug!(phase = %phase, speaker = %speaker.name, bytes = prompt.len(), "Invoking model");
        self.logger.log(ConversationEvent::new(
            ConversationEvent::PROMPT,
            json!({
                "phase": phase.to_string(),
                "speaker": speaker.name,
                "kind": plan.kind.as_str(),
                "prompt": prompt,
            }),
        ));

        let generation = self
            .gateway
            .invoke(InvocationRequest {
                prompt: &prompt,
                model: &ctx.input.model.api_name,
                role_header: &speaker.header,
                disable_extended_reasoning: ctx.input.disable_extended_reasoning,
                image: ctx.input.image.as_ref(),
            })
            .await?;

        let parsed = parse_response(&generation.text);
        let elapsed_ms = generation.elapsed_ms();
        let message = Message::agent(plan.speaker, plan.purpose, &parsed.spoken_text, elapsed_ms);

        let notepad_updated = session.update(|s| {
            s.push_message(message.clone());
            s.apply_notepad_update(parsed.notepad_update.as_deref(), plan.speaker)
        });
        observer.on_message(&message);

        debug!(
            speaker = %speaker.name,
            elapsed_ms,
            notepad_updated,
            "Turn complete: {}",
            preview(&parsed.spoken_text, 80)
        );

        if notepad_updated {
            let notepad = session.notepad();
            info!(by = %speaker.name, bytes = notepad.content().len(), "Notepad replaced");
            self.logger.log(ConversationEvent::new(
                ConversationEvent::NOTEPAD_UPDATED,
                json!({
                    "by": speaker.name,
                    "content": notepad.content(),
                }),
            ));
            observer.on_notepad_updated(&notepad);
        }

        self.logger.log(ConversationEvent::new(
            ConversationEvent::TURN_COMPLETED,
            json!({
                "phase": phase.to_string(),
                "speaker": speaker.name,
                "purpose": plan.purpose,
                "raw": generation.text,
                "spoken": parsed.spoken_text,
                "notepad_updated": notepad_updated,
                "elapsed_ms": elapsed_ms,
            }),
        ));

        Ok(TurnRecord {
            speaker: plan.speaker,
            spoken_text: parsed.spoken_text,
            notepad_updated,
            elapsed_ms,
        })
    }

    fn advisory_text(&self, plan: TurnPlan, model: &ModelDescriptor) -> String {
        let speaker = self.config.roster.name(plan.speaker);
        let opponent = self.config.roster.name(plan.speaker.opponent());
        match plan.kind {
            TurnKind::Opening => format!(
                "{} is preparing an opening point for {} (using {})...",
                speaker, opponent, model.name
            ),
            TurnKind::Reply => format!(
                "{} is responding to {} (using {})...",
                speaker, opponent, model.name
            ),
            TurnKind::Synthesis => format!(
                "{} is synthesizing the discussion into a final answer (using {})...",
                speaker, model.name
            ),
        }
    }

    /// Surface a failed turn as exactly one System error message.
    fn report_failure(
        &self,
        error: &GatewayError,
        session: &SharedSession,
        observer: &dyn DiscussionObserver,
    ) {
        let credential_error = error.is_credential_error();
        let text = if credential_error {
            format!(
                "Error: {}. Please check your API key configuration; chat is disabled until it is fixed.",
                error
            )
        } else {
            format!("Error: {}", error)
        };
        let message = Message::system(NoticeKind::Error, text);

        session.update(|s| {
            if credential_error {
                s.invalidate_credentials();
            }
            s.push_message(message.clone());
        });
        observer.on_message(&message);

        self.logger.log(ConversationEvent::new(
            ConversationEvent::DISCUSSION_FAILED,
            json!({
                "error": error.to_string(),
                "credentials_invalidated": credential_error,
            }),
        ));
    }
}

//! Chat session use case
//!
//! Owns one conversation: the shared session state, the selected model and
//! extended-reasoning setting, and the submission gate. Each accepted
//! submission runs one full discussion through [`RunDiscussionUseCase`].

use crate::config::DiscussionConfig;
use crate::ports::conversation_logger::ConversationLogger;
use crate::ports::media::{DisplayLease, ImageUpload, MediaError, MediaPort};
use crate::ports::model_invoker::ModelInvoker;
use crate::ports::observer::DiscussionObserver;
use crate::use_cases::run_discussion::{
    DiscussionError, RunDiscussionInput, RunDiscussionUseCase,
};
use crate::use_cases::shared::{BusyGuard, SharedSession};
use duet_domain::{
    DiscussionOutcome, DomainError, Message, ModelDescriptor, ModelRegistry, NoticeKind,
    SessionState,
};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from session-level commands (model selection, reset)
#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Cannot do that while a discussion is in progress")]
    Busy,
}

/// Model settings applied to the next submission
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub model: ModelDescriptor,
    pub thinking_budget_enabled: bool,
}

impl SessionSettings {
    pub fn disable_extended_reasoning(&self) -> bool {
        self.model
            .disables_extended_reasoning(self.thinking_budget_enabled)
    }
}

/// A user query, with an optional image
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub text: String,
    pub image: Option<ImageUpload>,
}

impl Submission {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.image.is_none()
    }
}

/// One interactive conversation
pub struct ChatSession<G: ModelInvoker + 'static> {
    discussion: RunDiscussionUseCase<G>,
    media: Arc<dyn MediaPort>,
    registry: ModelRegistry,
    settings: RwLock<SessionSettings>,
    session: SharedSession,
}

impl<G: ModelInvoker + 'static> ChatSession<G> {
    /// Start a session. Credentials are checked once here; the session
    /// opens with a welcome message, or a warning if none are configured.
    pub fn new(
        gateway: Arc<G>,
        media: Arc<dyn MediaPort>,
        config: DiscussionConfig,
        registry: ModelRegistry,
    ) -> Self {
        let credentials_valid = gateway.credentials_configured();
        let settings = SessionSettings {
            model: registry.default_model().clone(),
            thinking_budget_enabled: true,
        };
        let session = SharedSession::new(SessionState::new(
            config.initial_notepad.clone(),
            credentials_valid,
        ));

        let chat = Self {
            discussion: RunDiscussionUseCase::new(gateway, config),
            media,
            registry,
            settings: RwLock::new(settings),
            session,
        };
        chat.session.push(chat.greeting(credentials_valid));
        if !credentials_valid {
            warn!("No API credentials configured; submissions are disabled");
        }
        chat
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.discussion = self.discussion.with_logger(logger);
        self
    }

    /// Apply initial settings, typically from configuration or CLI flags.
    pub fn with_settings(
        self,
        model_id: &str,
        thinking_budget_enabled: bool,
    ) -> Result<Self, SessionError> {
        let model = self.registry.resolve(model_id)?.clone();
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = SessionSettings {
            model,
            thinking_budget_enabled,
        };
        // The greeting names the model, so re-issue it for the new selection
        self.restart()?;
        Ok(self)
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn snapshot(&self) -> SessionState {
        self.session.snapshot()
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DiscussionConfig {
        self.discussion.config()
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Prepare a local image for the next submission.
    pub fn attach(&self, path: &Path) -> Result<ImageUpload, MediaError> {
        self.media.describe(path)
    }

    /// Submit a query and run one discussion.
    ///
    /// Rejected submissions (busy, missing credentials, nothing to send)
    /// return an error without touching the session.
    pub async fn submit(
        &self,
        submission: Submission,
        observer: &dyn DiscussionObserver,
    ) -> Result<DiscussionOutcome, DiscussionError> {
        if !self.session.read(|s| s.credentials_valid()) {
            return Err(DiscussionError::CredentialsUnavailable);
        }
        if submission.is_empty() {
            return Err(DiscussionError::EmptySubmission);
        }
        let Some(_busy) = BusyGuard::acquire(&self.session) else {
            return Err(DiscussionError::Busy);
        };

        let settings = self.settings();
        let lease = submission
            .image
            .as_ref()
            .map(|upload| DisplayLease::open(self.media.as_ref(), upload));

        let user_message = Message::user(
            submission.text.clone(),
            lease.as_ref().map(|l| l.attachment().clone()),
        );
        self.session.push(user_message.clone());
        observer.on_message(&user_message);

        let image = match &submission.image {
            Some(upload) => match self.media.encode(upload).await {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!(path = %upload.path.display(), "Image encoding failed: {}", e);
                    let notice = Message::system(
                        NoticeKind::Error,
                        format!("Image processing failed, please try again: {}", e),
                    );
                    self.session.push(notice.clone());
                    observer.on_message(&notice);
                    observer.on_discussion_end(false);
                    return Err(e.into());
                }
            },
            None => None,
        };

        let mut input = RunDiscussionInput::new(submission.text, settings.model.clone())
            .with_extended_reasoning_disabled(settings.disable_extended_reasoning());
        if let Some(image) = image {
            input = input.with_image(image);
        }

        self.discussion.execute(&input, &self.session, observer).await
    }

    /// Clear the conversation and the notepad.
    ///
    /// The credential flag survives a reset.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.restart()?;
        info!("Session cleared");
        Ok(())
    }

    /// Reset the state and push a fresh greeting, all under one write lock
    /// so a submission cannot slip in between the busy check and the reset.
    fn restart(&self) -> Result<(), SessionError> {
        let initial = self.config().initial_notepad.clone();
        self.session.update(|s| {
            if s.is_busy() {
                return Err(SessionError::Busy);
            }
            s.reset(initial);
            s.push_message(self.greeting(s.credentials_valid()));
            Ok(())
        })
    }

    /// Select the model used for subsequent submissions.
    pub fn select_model(&self, id: &str) -> Result<ModelDescriptor, SessionError> {
        let model = self.registry.resolve(id)?.clone();
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .model = model.clone();
        info!(model = %model.api_name, "Model selected");
        Ok(model)
    }

    /// Flip the extended-reasoning budget. Only models that support the
    /// budget accept the toggle; returns the new setting.
    pub fn toggle_thinking_budget(&self) -> Result<bool, SessionError> {
        let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        if !settings.model.supports_thinking_budget {
            return Err(DomainError::ThinkingBudgetUnsupported(settings.model.id.clone()).into());
        }
        settings.thinking_budget_enabled = !settings.thinking_budget_enabled;
        Ok(settings.thinking_budget_enabled)
    }

    fn greeting(&self, credentials_valid: bool) -> Message {
        if credentials_valid {
            let roster = &self.config().roster;
            Message::system(
                NoticeKind::Welcome,
                format!(
                    "Welcome to Duet! Ask a question, optionally with an image. {} and {} will discuss it, possibly using the shared notepad, and then {} will give you the final answer. Current model: {}.",
                    roster.logical.name,
                    roster.creative.name,
                    roster.logical.name,
                    self.settings().model.name
                ),
            )
        } else {
            Message::system(
                NoticeKind::CredentialWarning,
                "Critical warning: no API key is configured. Set the API key environment variable so the discussion can run.",
            )
        }
    }
}

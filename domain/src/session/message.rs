//! Session messages

use crate::agent::AgentRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    LogicalAgent,
    CreativeAgent,
    System,
}

impl Sender {
    pub fn agent_role(&self) -> Option<AgentRole> {
        match self {
            Sender::LogicalAgent => Some(AgentRole::Logical),
            Sender::CreativeAgent => Some(AgentRole::Creative),
            Sender::User | Sender::System => None,
        }
    }
}

impl From<AgentRole> for Sender {
    fn from(role: AgentRole) -> Self {
        match role {
            AgentRole::Logical => Sender::LogicalAgent,
            AgentRole::Creative => Sender::CreativeAgent,
        }
    }
}

/// Why a message exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagePurpose {
    UserInput,
    /// Logical agent speaking to the creative agent
    LogicalToCreative,
    /// Creative agent speaking to the logical agent
    CreativeToLogical,
    /// The answer delivered to the user
    FinalResponse,
    SystemNotification,
}

impl MessagePurpose {
    /// The agent-to-agent purpose for a turn spoken by `role`
    pub fn spoken_by(role: AgentRole) -> Self {
        match role {
            AgentRole::Logical => MessagePurpose::LogicalToCreative,
            AgentRole::Creative => MessagePurpose::CreativeToLogical,
        }
    }

    /// Whether messages of this purpose belong to the discussion transcript
    pub fn is_agent_to_agent(&self) -> bool {
        matches!(
            self,
            MessagePurpose::LogicalToCreative | MessagePurpose::CreativeToLogical
        )
    }
}

/// Category of a system notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Greeting shown when a session starts or is cleared
    Welcome,
    /// Credentials are missing; submissions are blocked
    CredentialWarning,
    /// "Agent X is about to speak" status line
    Advisory,
    /// A discussion or its input failed
    Error,
}

/// Image attached to a user message, as shown to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Display reference handed out by the media store
    pub display_url: String,
    pub file_name: String,
    pub mime_type: String,
}

/// One immutable utterance in a session (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    text: String,
    sender: Sender,
    purpose: MessagePurpose,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<NoticeKind>,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<ImageAttachment>,
}

impl Message {
    fn new(text: impl Into<String>, sender: Sender, purpose: MessagePurpose) -> Self {
        let created_at = Utc::now();
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("{}{}", created_at.timestamp_millis(), &suffix[..9]),
            text: text.into(),
            sender,
            purpose,
            notice: None,
            created_at,
            elapsed_ms: None,
            image: None,
        }
    }

    /// The user's query, optionally with an attached image
    pub fn user(text: impl Into<String>, image: Option<ImageAttachment>) -> Self {
        let mut message = Self::new(text, Sender::User, MessagePurpose::UserInput);
        message.image = image;
        message
    }

    /// A turn spoken by one of the agents
    pub fn agent(
        role: AgentRole,
        purpose: MessagePurpose,
        text: impl Into<String>,
        elapsed_ms: u64,
    ) -> Self {
        let mut message = Self::new(text, role.into(), purpose);
        message.elapsed_ms = Some(elapsed_ms);
        message
    }

    pub fn system(kind: NoticeKind, text: impl Into<String>) -> Self {
        let mut message = Self::new(text, Sender::System, MessagePurpose::SystemNotification);
        message.notice = Some(kind);
        message
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn purpose(&self) -> MessagePurpose {
        self.purpose
    }

    pub fn notice(&self) -> Option<NoticeKind> {
        self.notice
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn elapsed_ms(&self) -> Option<u64> {
        self.elapsed_ms
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_message() {
        let message = Message::agent(
            AgentRole::Creative,
            MessagePurpose::CreativeToLogical,
            "What if...",
            1200,
        );
        assert_eq!(message.sender(), Sender::CreativeAgent);
        assert_eq!(message.sender().agent_role(), Some(AgentRole::Creative));
        assert_eq!(message.elapsed_ms(), Some(1200));
        assert!(message.purpose().is_agent_to_agent());
        assert!(message.notice().is_none());
    }

    #[test]
    fn test_system_message_carries_notice() {
        let message = Message::system(NoticeKind::Advisory, "Muse is replying...");
        assert_eq!(message.sender(), Sender::System);
        assert_eq!(message.purpose(), MessagePurpose::SystemNotification);
        assert_eq!(message.notice(), Some(NoticeKind::Advisory));
        assert!(!message.purpose().is_agent_to_agent());
    }

    #[test]
    fn test_user_message_with_image() {
        let image = ImageAttachment {
            display_url: "file:///tmp/cat.png".to_string(),
            file_name: "cat.png".to_string(),
            mime_type: "image/png".to_string(),
        };
        let message = Message::user("What is this?", Some(image.clone()));
        assert_eq!(message.purpose(), MessagePurpose::UserInput);
        assert_eq!(message.image(), Some(&image));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Message::user("a", None);
        let b = Message::user("a", None);
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with(&a.created_at().timestamp_millis().to_string()));
    }

    #[test]
    fn test_spoken_by() {
        assert_eq!(
            MessagePurpose::spoken_by(AgentRole::Logical),
            MessagePurpose::LogicalToCreative
        );
        assert_eq!(
            MessagePurpose::spoken_by(AgentRole::Creative),
            MessagePurpose::CreativeToLogical
        );
        assert!(!MessagePurpose::FinalResponse.is_agent_to_agent());
    }
}

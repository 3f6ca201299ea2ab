use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::ids::MessageId;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

/// Delivery state of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Pending,
    Sent,
    Error,
}

/// A single entry of the chat log.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    /// Text shown in the bubble.
    pub text: String,
    /// Translation shown under the text, if any.
    pub translated: Option<String>,
    pub status: Option<MessageStatus>,
    pub created_at: SystemTime,
}

impl Message {
    /// A message typed by the operator. There is no delivery acknowledgement,
    /// so it is `Sent` right away.
    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::User,
            text: text.into(),
            translated: None,
            status: Some(MessageStatus::Sent),
            created_at: SystemTime::now(),
        }
    }

    /// Placeholder agent reply waiting for the translation backend.
    pub fn pending_agent(id: MessageId, placeholder: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Agent,
            text: placeholder.into(),
            translated: None,
            status: Some(MessageStatus::Pending),
            created_at: SystemTime::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == Some(MessageStatus::Pending)
    }
}

/// Successful reply of the translation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated: String,
    pub lang: String,
    /// Explicit tag for a degraded (untranslated) reply.
    #[serde(default)]
    pub fallback: bool,
}

impl TranslateResponse {
    pub fn new(translated: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            translated: translated.into(),
            lang: lang.into(),
            fallback: false,
        }
    }

    /// True when the backend could not translate and echoed a fallback.
    pub fn is_fallback(&self, marker: &str) -> bool {
        self.fallback || (!marker.is_empty() && self.translated.starts_with(marker))
    }
}

//! Chat session core: identifiers, the message log, the translation backend
//! and the controller tying them together.

/// `config` holds the widget settings loaded from `config/agente.toml`.
pub mod config;

/// `host` models the configuration and capabilities the embedding host hands over.
pub mod host;

/// `ids` produces message and tunnel identifiers.
pub mod ids;

/// `manager` provides `ChatManager`, the chat state controller.
pub mod manager;

/// `message` defines chat messages and the translation reply.
pub mod message;

/// `providers` contains the translation backends.
pub mod providers;

/// `session` stores the ordered, id-keyed message log.
pub mod session;

pub use config::AgentSettings;
pub use host::{HostConfig, HostNotifier, NotifyOptions};
pub use ids::{MessageId, TunnelId};
pub use manager::{AgentEvent, ChatManager, Notice, NoticeLevel, Resolution};
pub use message::{Message, MessageStatus, Role, TranslateResponse};
pub use session::Conversation;

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::agent::config::AgentSettings;
use crate::agent::ids::{IdStrategy, MessageId, TunnelId};
use crate::agent::message::{Message, MessageStatus, TranslateResponse};
use crate::agent::providers::{TranslateError, Translator};
use crate::agent::session::Conversation;
use crate::i18n::Language;

/// Completions delivered from background tasks to the UI loop.
#[derive(Debug)]
pub enum AgentEvent {
    /// A translation request finished.
    Translated {
        message_id: MessageId,
        /// Text the operator sent, kept for the fallback display.
        original: String,
        outcome: Result<TranslateResponse, TranslateError>,
    },
    /// The deferred host notification was delivered.
    DelayedNotifyFired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// Banner shown under the input bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// How a send ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Sent,
    Fallback,
    Failed(String),
}

/// The chat state controller.
///
/// Owns the message log, the busy flag, the notice banner and the tunnel id.
/// At most one translation is in flight: `busy` is the only gate.
pub struct ChatManager {
    conversation: Conversation,
    busy: bool,
    notice: Option<Notice>,
    tunnel_id: TunnelId,
    translator: Arc<dyn Translator>,
    lang: Arc<dyn Language>,
    id_strategy: IdStrategy,
    clear_on_new_tunnel: bool,
    fallback_marker: String,
    events_tx: UnboundedSender<AgentEvent>,
    events_rx: UnboundedReceiver<AgentEvent>,
}

impl ChatManager {
    pub fn new(
        translator: Arc<dyn Translator>,
        lang: Arc<dyn Language>,
        settings: &AgentSettings,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tunnel_id = TunnelId::new(settings.id_strategy);
        info!("Chat session started on tunnel {}", tunnel_id);
        Self {
            conversation: Conversation::new(),
            busy: false,
            notice: None,
            tunnel_id,
            translator,
            lang,
            id_strategy: settings.id_strategy,
            clear_on_new_tunnel: settings.clear_on_new_tunnel,
            fallback_marker: settings.fallback_marker.clone(),
            events_tx: tx,
            events_rx: rx,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn tunnel_id(&self) -> &TunnelId {
        &self.tunnel_id
    }

    pub fn backend_name(&self) -> &str {
        self.translator.name()
    }

    /// Sender for other background work reporting to the UI loop.
    pub fn events_sender(&self) -> UnboundedSender<AgentEvent> {
        self.events_tx.clone()
    }

    /// Starts a send. Returns the id of the pending agent message, or `None`
    /// when the text is blank or a send is already in flight.
    pub fn send(&mut self, text: &str) -> Option<MessageId> {
        if text.trim().is_empty() {
            debug!("Ignoring blank message");
            return None;
        }
        if self.busy {
            debug!("Ignoring message while a translation is in flight");
            return None;
        }

        let user = Message::user(MessageId::new(self.id_strategy), text);
        let pending = Message::pending_agent(MessageId::new(self.id_strategy), self.lang.translating());
        let pending_id = pending.id.clone();
        self.conversation.push(user);
        self.conversation.push(pending);
        self.busy = true;
        self.notice = None;

        let translator = Arc::clone(&self.translator);
        let tx = self.events_tx.clone();
        let tunnel = self.tunnel_id.to_string();
        let original = text.to_string();
        let message_id = pending_id.clone();
        info!("Sending message on tunnel {}", tunnel);
        tokio::spawn(async move {
            let outcome = translator.translate(&original, &tunnel).await;
            let _ = tx.send(AgentEvent::Translated {
                message_id,
                original,
                outcome,
            });
        });

        Some(pending_id)
    }

    /// Sends the placeholder transcript standing in for voice input.
    pub fn send_voice_mock(&mut self) -> Option<MessageId> {
        if self.busy {
            return None;
        }
        let transcript = self.lang.voice_transcript();
        self.send(transcript)
    }

    /// Reconciles the pending agent message with the backend's answer.
    ///
    /// `busy` is cleared on every path, including a reply for a message that
    /// a tunnel reset already removed.
    pub fn resolve(
        &mut self,
        message_id: &MessageId,
        original: &str,
        outcome: Result<TranslateResponse, TranslateError>,
    ) -> Resolution {
        let resolution = match outcome {
            Ok(response) if response.is_fallback(&self.fallback_marker) => {
                warn!("Translation fell back to the original text");
                let original = original.to_string();
                self.conversation.update(message_id, |message| {
                    message.text = original.clone();
                    message.translated = Some(original);
                    message.status = Some(MessageStatus::Error);
                });
                self.notice = Some(Notice {
                    level: NoticeLevel::Warning,
                    text: self.lang.fallback_warning().to_string(),
                });
                Resolution::Fallback
            }
            Ok(response) => {
                let line = self.lang.translation_line(&response.lang, &response.translated);
                self.conversation.update(message_id, |message| {
                    message.text = line;
                    message.translated = Some(response.translated);
                    message.status = Some(MessageStatus::Sent);
                });
                Resolution::Sent
            }
            Err(err) => {
                let detail = err.to_string();
                warn!("Translation failed: {}", detail);
                let failed = self.lang.translation_failed();
                self.conversation.update(message_id, |message| {
                    message.text = failed.to_string();
                    message.status = Some(MessageStatus::Error);
                });
                self.notice = Some(Notice {
                    level: NoticeLevel::Error,
                    text: detail.clone(),
                });
                Resolution::Failed(detail)
            }
        };
        if self.conversation.get(message_id).is_none() {
            debug!("Reply for {} arrived after its log was reset", message_id);
        }
        self.busy = false;
        resolution
    }

    /// Starts a new tunnel, dropping the log when configured to.
    pub fn new_tunnel(&mut self) -> &TunnelId {
        self.tunnel_id = TunnelId::new(self.id_strategy);
        if self.clear_on_new_tunnel {
            self.conversation.clear();
        }
        info!("Switched to tunnel {}", self.tunnel_id);
        &self.tunnel_id
    }

    /// Non-blocking poll used by the tick loop.
    pub fn poll_event(&mut self) -> Option<AgentEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Waits for the next background completion.
    pub async fn next_event(&mut self) -> Option<AgentEvent> {
        self.events_rx.recv().await
    }
}

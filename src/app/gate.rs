use std::sync::Arc;

use log::{info, warn};

use super::App;
use crate::agent::host;
use crate::agent::providers::Translator;
use crate::agent::providers::http::HttpTranslator;
use crate::agent::ChatManager;

impl App {
    /// Runs the host gate against the current configuration.
    ///
    /// On rejection the chat controller is dropped and nothing talks to the
    /// network. On success the chat screen mounts.
    pub(crate) fn evaluate_gate(&mut self) {
        self.gate = host::validate(self.host_config.as_ref());
        match &self.gate {
            Ok(()) => self.mount_chat(),
            Err(reason) => {
                warn!("Host gate rejected configuration: {}", reason);
                self.chat = None;
                self.notifier = None;
                self.delay_pending = false;
                self.status_message = String::from(self.lang.gate_rejected());
            }
        }
    }

    fn mount_chat(&mut self) {
        let origin = self
            .host_config
            .as_ref()
            .and_then(|config| config.origin.clone());
        let translator: Arc<dyn Translator> = match self.translator_override.as_ref() {
            Some(translator) => Arc::clone(translator),
            None => {
                let api_base = self.settings.resolve_api_base(origin.as_deref());
                info!("Translation API base: {}", api_base);
                Arc::new(HttpTranslator::new(&api_base))
            }
        };
        self.notifier = self.host_config.as_ref().and_then(|config| config.notifier());
        let chat = ChatManager::new(translator, Arc::clone(&self.lang), &self.settings);
        info!(
            "Chat mounted for {} ({} backend)",
            self.user_name(),
            chat.backend_name()
        );
        self.chat = Some(chat);
        self.panel.reset();
        self.delay_pending = false;
        self.status_message = String::from(self.lang.status_ready());
    }

    /// Applies the token typed on the rejection screen as a new local config.
    pub(crate) fn apply_token(&mut self) {
        let token = self.token_input.take().trim().to_string();
        let base = self.host_config.clone().unwrap_or_default();
        self.host_config = Some(base.with_token(token));
        self.evaluate_gate();
    }

    pub fn is_chat_mounted(&self) -> bool {
        self.chat.is_some()
    }

    /// Display name of the operator, with a placeholder for anonymous hosts.
    pub fn user_name(&self) -> &str {
        self.host_config
            .as_ref()
            .and_then(|config| config.user_name())
            .unwrap_or(self.lang.anonymous_user())
    }
}

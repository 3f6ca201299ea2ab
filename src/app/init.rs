use std::sync::Arc;
use std::time::Instant;

use log::debug;

use super::{App, Composer};
use crate::agent::host::GateRejection;
use crate::agent::providers::Translator;
use crate::agent::{AgentSettings, HostConfig};
use crate::panels::chat::ChatPanel;

impl App {
    /// Creates the application state and runs the host gate once.
    ///
    /// The chat controller, and with it the HTTP translator, is only built if
    /// the gate accepts `host_config`.
    pub fn new(settings: AgentSettings, host_config: Option<HostConfig>) -> Self {
        Self::build(settings, host_config, None)
    }

    /// Like `new`, but every mounted chat uses `translator`.
    pub fn with_translator(
        settings: AgentSettings,
        host_config: Option<HostConfig>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self::build(settings, host_config, Some(translator))
    }

    fn build(
        settings: AgentSettings,
        host_config: Option<HostConfig>,
        translator_override: Option<Arc<dyn Translator>>,
    ) -> Self {
        debug!("Initializing App (language {:?})", settings.language);
        let lang = settings.language.strings();
        let tick_rate = settings.tick_rate();
        let mut app = Self {
            should_quit: false,
            status_message: String::from(lang.status_ready()),
            lang,
            settings,
            host_config,
            gate: Err(GateRejection::MissingConfig),
            chat: None,
            notifier: None,
            chat_input: Composer::new(),
            token_input: Composer::new(),
            panel: ChatPanel::new(),
            delay_pending: false,
            action_areas: Vec::new(),
            message_area: None,
            last_tick: Instant::now(),
            tick_rate,
            translator_override,
        };
        app.evaluate_gate();
        app
    }
}

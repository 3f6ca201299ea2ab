use std::time::Instant;

use super::App;
use crate::agent::{AgentEvent, Resolution};

impl App {
    /// Called on every tick of the UI loop: applies whatever the background
    /// tasks reported since the last one.
    pub(crate) fn on_tick(&mut self) {
        if self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = Instant::now();
        }

        let mut events = Vec::new();
        if let Some(chat) = self.chat.as_mut() {
            while let Some(event) = chat.poll_event() {
                events.push(event);
            }
        }
        for event in events {
            self.handle_agent_event(event);
        }
    }

    pub(crate) fn handle_agent_event(&mut self, event: AgentEvent) {
        match event {
            AgentEvent::Translated {
                message_id,
                original,
                outcome,
            } => {
                let Some(chat) = self.chat.as_mut() else {
                    return;
                };
                self.status_message = match chat.resolve(&message_id, &original, outcome) {
                    Resolution::Sent => String::from(self.lang.status_translated()),
                    Resolution::Fallback => String::from(self.lang.status_fallback()),
                    Resolution::Failed(detail) => {
                        format!("{}: {}", self.lang.status_failed(), detail)
                    }
                };
            }
            AgentEvent::DelayedNotifyFired => {
                self.delay_pending = false;
                self.status_message = String::from(self.lang.status_host_notified());
            }
        }
    }
}

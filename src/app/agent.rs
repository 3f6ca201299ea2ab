use std::sync::Arc;

use log::{debug, info};

use super::App;
use crate::agent::{AgentEvent, NotifyOptions};

/// Target tag the host uses to route notifications from this widget.
const NOTIFY_TARGET: &str = "agente";

impl App {
    /// Sends the trimmed input bar content.
    ///
    /// Ignored while a translation is in flight; the input is only cleared
    /// when the controller accepted the message.
    pub(crate) fn submit_prompt(&mut self) {
        let Some(chat) = self.chat.as_mut() else {
            return;
        };
        let text = self.chat_input.buffer().trim().to_string();
        if text.is_empty() || chat.is_busy() {
            debug!("Send ignored (empty input or busy)");
            return;
        }
        if chat.send(&text).is_some() {
            self.chat_input.take();
            self.status_message = String::from(self.lang.sending());
        }
    }

    pub(crate) fn send_voice_mock(&mut self) {
        let Some(chat) = self.chat.as_mut() else {
            return;
        };
        if chat.send_voice_mock().is_some() {
            self.status_message = String::from(self.lang.sending());
        }
    }

    pub(crate) fn start_new_tunnel(&mut self) {
        let Some(chat) = self.chat.as_mut() else {
            return;
        };
        let tunnel = chat.new_tunnel().to_string();
        self.status_message = format!("{}: {}", self.lang.status_new_tunnel(), tunnel);
    }

    /// Invokes the host's notify capability right away.
    pub(crate) fn alert_host(&mut self) {
        let Some(notifier) = self.notifier.as_ref() else {
            return;
        };
        notifier.notify(self.lang.notify_body(), None);
        info!("Host alerted");
        self.status_message = String::from(self.lang.status_host_notified());
    }

    /// Schedules one host notification after the configured delay.
    ///
    /// The action stays disabled until the notification fired. There is no
    /// cancellation: the task keeps its own handle on the notifier.
    pub(crate) fn schedule_delayed_notify(&mut self) {
        if self.delay_pending {
            return;
        }
        let (Some(notifier), Some(chat)) = (self.notifier.as_ref(), self.chat.as_ref()) else {
            return;
        };
        let notifier = Arc::clone(notifier);
        let tx = chat.events_sender();
        let delay = self.settings.notify_delay();
        let message = self.lang.delayed_notify_body();
        let options = NotifyOptions {
            title: Some(self.lang.delayed_notify_title().to_string()),
            target: Some(NOTIFY_TARGET.to_string()),
        };
        self.delay_pending = true;
        self.status_message = String::from(self.lang.status_delay_scheduled());
        info!("Host notification scheduled in {:?}", delay);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notifier.notify(message, Some(options));
            let _ = tx.send(AgentEvent::DelayedNotifyFired);
        });
    }
}

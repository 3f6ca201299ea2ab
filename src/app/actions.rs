use log::debug;

use super::{App, CommandAction};

impl App {
    /// The single source of truth for executing a `CommandAction`.
    pub(crate) fn execute_action(&mut self, action: CommandAction) {
        debug!("Executing action {:?}", action);
        match action {
            CommandAction::Send => self.submit_prompt(),
            CommandAction::VoiceMock => self.send_voice_mock(),
            CommandAction::NewTunnel => self.start_new_tunnel(),
            CommandAction::DelayedNotify => self.schedule_delayed_notify(),
            CommandAction::AlertHost => self.alert_host(),
            CommandAction::ApplyToken => self.apply_token(),
            CommandAction::Quit => self.should_quit = true,
        }
    }

    /// Whether the action can currently be triggered; disabled buttons
    /// render dimmed.
    pub fn action_enabled(&self, action: CommandAction) -> bool {
        let busy = self.chat.as_ref().is_some_and(|chat| chat.is_busy());
        match action {
            CommandAction::Send | CommandAction::VoiceMock => self.chat.is_some() && !busy,
            CommandAction::NewTunnel => self.chat.is_some(),
            CommandAction::DelayedNotify => {
                self.chat.is_some() && self.notifier.is_some() && !self.delay_pending
            }
            CommandAction::AlertHost => self.chat.is_some() && self.notifier.is_some(),
            CommandAction::ApplyToken => self.chat.is_none(),
            CommandAction::Quit => true,
        }
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, CommandAction, Composer};

/// Lines moved by PageUp and PageDown.
const PAGE_SCROLL: i32 = 5;

impl App {
    /// The main entry point for handling keyboard events.
    ///
    /// Global shortcuts win; everything else goes to the chat screen or, while
    /// the gate is closed, to the token field of the rejection screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.handle_global_shortcuts(key) {
            return;
        }

        if self.chat.is_some() {
            self.handle_chat_key(key);
        } else {
            self.handle_gate_key(key);
        }
    }

    /// Returns `true` if the key was handled.
    fn handle_global_shortcuts(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.execute_action(CommandAction::Quit);
            return true;
        }
        false
    }

    fn handle_gate_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.execute_action(CommandAction::ApplyToken),
            KeyCode::Esc => self.token_input.clear(),
            _ => {
                edit_composer(&mut self.token_input, key);
            }
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::F(2) => self.execute_action(CommandAction::VoiceMock),
            KeyCode::F(3) => self.execute_action(CommandAction::NewTunnel),
            KeyCode::F(4) => self.execute_action(CommandAction::DelayedNotify),
            KeyCode::F(5) => self.execute_action(CommandAction::AlertHost),
            KeyCode::Enter => self.execute_action(CommandAction::Send),
            KeyCode::PageUp => self.panel.scroll(-PAGE_SCROLL),
            KeyCode::PageDown => self.panel.scroll(PAGE_SCROLL),
            KeyCode::Up => {
                self.chat_input.history_previous();
            }
            KeyCode::Down => {
                self.chat_input.history_next();
            }
            KeyCode::Esc => self.chat_input.clear(),
            _ => {
                edit_composer(&mut self.chat_input, key);
            }
        }
    }
}

/// Applies a plain editing key to `composer`. Returns `true` if it was one.
fn edit_composer(composer: &mut Composer, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            composer.insert_char(ch)
        }
        KeyCode::Backspace => composer.backspace(),
        KeyCode::Delete => composer.delete(),
        KeyCode::Left => composer.move_left(),
        KeyCode::Right => composer.move_right(),
        KeyCode::Home => composer.move_home(),
        KeyCode::End => composer.move_end(),
        _ => return false,
    }
    true
}

//! Defines the core state structures for the application.
//!
//! `App` holds everything the UI needs: the host configuration and gate
//! result, the chat controller once the gate lets it mount, both text
//! composers and the view-only panel state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::agent::host::GateRejection;
use crate::agent::providers::Translator;
use crate::agent::{AgentSettings, ChatManager, HostConfig, HostNotifier};
use crate::i18n::Language;
use crate::panels::chat::ChatPanel;

/// The main application state.
pub struct App {
    // --- Core State ---
    /// Flag to indicate if the application should quit.
    pub should_quit: bool,
    /// Settings resolved at startup.
    pub settings: AgentSettings,
    /// Operator-facing strings.
    pub lang: Arc<dyn Language>,
    /// Host configuration currently in effect.
    pub host_config: Option<HostConfig>,
    /// Outcome of the last gate evaluation.
    pub gate: Result<(), GateRejection>,
    /// The chat controller. Only exists while the gate is open.
    pub chat: Option<ChatManager>,
    /// The host's notify capability, if it offers one.
    pub notifier: Option<Arc<dyn HostNotifier>>,

    // --- Input ---
    /// Composer of the chat input bar.
    pub chat_input: Composer,
    /// Composer of the token field on the rejection screen.
    pub token_input: Composer,

    // --- UI ---
    /// The message currently displayed in the status bar.
    pub status_message: String,
    /// Scroll state of the message list.
    pub panel: ChatPanel,
    /// True while a deferred host notification is scheduled.
    pub delay_pending: bool,
    /// Clickable action buttons, refreshed on every render.
    pub(crate) action_areas: Vec<(Rect, CommandAction)>,
    /// Area of the message list, refreshed on every render.
    pub(crate) message_area: Option<Rect>,

    // --- Internal State ---
    pub(crate) last_tick: Instant,
    pub(crate) tick_rate: Duration,
    /// Replaces the HTTP translator when set.
    pub(crate) translator_override: Option<Arc<dyn Translator>>,
}

/// Operations the operator can trigger from keys or buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Send,
    VoiceMock,
    NewTunnel,
    DelayedNotify,
    AlertHost,
    ApplyToken,
    Quit,
}

/// Single-line text composer with history.
#[derive(Clone, Default)]
pub struct Composer {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    history_index: Option<usize>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Inserts a character at the current cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.reset_history_navigation();
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.drain(idx..self.cursor);
            self.cursor = idx;
            self.reset_history_navigation();
        }
    }

    /// Deletes the character at the cursor (delete).
    pub fn delete(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            let end = self.cursor + ch.len_utf8();
            self.buffer.drain(self.cursor..end);
            self.reset_history_navigation();
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.reset_history_navigation();
    }

    /// Replaces the whole buffer, keeping the cursor at the end.
    pub fn set(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
        self.cursor = self.buffer.len();
        self.reset_history_navigation();
    }

    /// Takes the content of the buffer, adds it to history, and clears the buffer.
    pub fn take(&mut self) -> String {
        let content = std::mem::take(&mut self.buffer);
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.cursor = 0;
        self.reset_history_navigation();
        content
    }

    /// Navigates to the previous entry in the history.
    pub fn history_previous(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        let target = match self.history_index {
            Some(idx) => idx.saturating_sub(1),
            None => self.history.len() - 1,
        };
        self.load_history(target)
    }

    /// Navigates to the next entry in the history, or back to an empty buffer.
    pub fn history_next(&mut self) -> bool {
        match self.history_index {
            Some(idx) if idx + 1 < self.history.len() => self.load_history(idx + 1),
            Some(_) => {
                self.history_index = None;
                self.buffer.clear();
                self.cursor = 0;
                true
            }
            None => false,
        }
    }

    fn load_history(&mut self, index: usize) -> bool {
        match self.history.get(index).cloned() {
            Some(entry) => {
                self.buffer = entry;
                self.cursor = self.buffer.len();
                self.history_index = Some(index);
                true
            }
            None => false,
        }
    }

    fn reset_history_navigation(&mut self) {
        self.history_index = None;
    }

    /// Display column of the cursor.
    pub fn cursor_column(&self) -> u16 {
        let width: usize = self.buffer[..self.cursor]
            .chars()
            .map(|ch| unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1))
            .sum();
        width.min(u16::MAX as usize) as u16
    }
}

/// Scroll state of the message list.
///
/// The list follows the newest message: whenever the conversation revision
/// changes, the offset jumps to the bottom. Manual scrolling holds until the
/// next change.
#[derive(Debug, Default)]
pub struct ChatPanel {
    offset: u16,
    max_offset: u16,
    seen_revision: Option<u64>,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the offset with the current content and returns it.
    pub fn sync(&mut self, revision: u64, content_height: u16, viewport_height: u16) -> u16 {
        self.max_offset = content_height.saturating_sub(viewport_height);
        if self.seen_revision != Some(revision) {
            self.seen_revision = Some(revision);
            self.offset = self.max_offset;
        }
        self.offset = self.offset.min(self.max_offset);
        self.offset
    }

    /// Scrolls by `delta` lines; negative moves towards older messages.
    pub fn scroll(&mut self, delta: i32) {
        let next = (self.offset as i32 + delta).clamp(0, self.max_offset as i32);
        self.offset = next as u16;
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset >= self.max_offset
    }

    /// Forgets the followed revision, e.g. when a new chat mounts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_bottom_on_every_change() {
        let mut panel = ChatPanel::new();
        assert_eq!(panel.sync(1, 30, 10), 20);
        assert!(panel.is_at_bottom());
        assert_eq!(panel.sync(2, 45, 10), 35);
    }

    #[test]
    fn manual_scroll_holds_until_next_change() {
        let mut panel = ChatPanel::new();
        panel.sync(1, 30, 10);
        panel.scroll(-5);
        assert_eq!(panel.sync(1, 30, 10), 15);
        assert!(!panel.is_at_bottom());
        panel.scroll(-100);
        assert_eq!(panel.offset(), 0);
        assert_eq!(panel.sync(2, 32, 10), 22);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut panel = ChatPanel::new();
        assert_eq!(panel.sync(1, 3, 10), 0);
        panel.scroll(4);
        assert_eq!(panel.offset(), 0);
    }
}

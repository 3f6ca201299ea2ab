use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::{App, CommandAction};

/// Lines moved per wheel notch.
const WHEEL_SCROLL: i32 = 3;

impl App {
    /// The main entry point for handling mouse events.
    ///
    /// Left clicks trigger the action button under the pointer; the wheel
    /// scrolls the message list while the pointer is over it.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(action) = self.hit_test_action(event.column, event.row)
                    && self.action_enabled(action)
                {
                    self.execute_action(action);
                }
            }
            MouseEventKind::ScrollUp => self.handle_mouse_scroll(event, -WHEEL_SCROLL),
            MouseEventKind::ScrollDown => self.handle_mouse_scroll(event, WHEEL_SCROLL),
            _ => {}
        }
    }

    fn handle_mouse_scroll(&mut self, event: MouseEvent, delta: i32) {
        if let Some(area) = self.message_area
            && contains(area, event.column, event.row)
        {
            self.panel.scroll(delta);
        }
    }

    fn hit_test_action(&self, column: u16, row: u16) -> Option<CommandAction> {
        self.action_areas
            .iter()
            .find(|(area, _)| contains(*area, column, row))
            .map(|(_, action)| *action)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

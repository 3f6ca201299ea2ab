use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};

use super::header::ACCENT_COLOR;
use crate::app::App;

pub fn render_status_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let backend = app
        .chat
        .as_ref()
        .map(|chat| chat.backend_name().to_string())
        .unwrap_or_else(|| "-".to_string());

    let footer_text = format!(
        " {} | {}: {} | {} ",
        app.status_message,
        app.lang.backend_label(),
        backend,
        app.lang.quit_hint()
    );
    let footer =
        Paragraph::new(footer_text).style(Style::default().bg(ACCENT_COLOR).fg(Color::White));
    f.render_widget(footer, area);
}

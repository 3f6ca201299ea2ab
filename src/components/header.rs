use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, CommandAction};

pub const TEXT_COLOR: Color = Color::Rgb(220, 220, 220);
pub const ACCENT_COLOR: Color = Color::Rgb(0, 122, 204);
pub const BAR_BG_COLOR: Color = Color::Rgb(37, 37, 38);

/// Renders the two-line widget header: title on top, session details and
/// badges below. The alert-host hint is clickable and only shown when the
/// host offers a notify capability.
pub fn render_header(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let tunnel = app
        .chat
        .as_ref()
        .map(|chat| chat.tunnel_id().to_string())
        .unwrap_or_default();

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", app.lang.microfront_label()),
            Style::default().bg(ACCENT_COLOR).fg(Color::White),
        ),
        Span::raw(" "),
        Span::styled(
            app.lang.header_title(),
            Style::default().fg(TEXT_COLOR).add_modifier(Modifier::BOLD),
        ),
    ]);

    let details = format!(
        " {}: {} · {}: {}  [{}: agente] [{}: App] ",
        app.lang.session_label(),
        app.user_name(),
        app.lang.tunnel_label(),
        tunnel,
        app.lang.remote_label(),
        app.lang.module_label(),
    );
    let mut second = vec![Span::styled(details.clone(), Style::default().fg(TEXT_COLOR))];

    if app.notifier.is_some() && area.height > 1 {
        let label = format!("[F5 {}]", app.lang.notify_cta());
        let x = area.x.saturating_add(super::cell_width(&details));
        let width = super::cell_width(&label).min(area.right().saturating_sub(x));
        if width > 0 {
            app.action_areas.push((
                Rect {
                    x,
                    y: area.y + 1,
                    width,
                    height: 1,
                },
                CommandAction::AlertHost,
            ));
        }
        second.push(Span::styled(
            label,
            Style::default().fg(Color::White).bg(ACCENT_COLOR),
        ));
    }

    let header = Paragraph::new(vec![title, Line::from(second)])
        .style(Style::default().bg(BAR_BG_COLOR).fg(TEXT_COLOR));
    f.render_widget(header, area);
}

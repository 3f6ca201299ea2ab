use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::agent::{Message, MessageStatus, NoticeLevel, Role};
use crate::app::{App, CommandAction, Composer};
use crate::components::cell_width;
use crate::components::header::render_header;
use crate::components::status_bar::render_status_bar;

mod theme;
use theme::*;

pub fn render(f: &mut Frame<'_>, app: &mut App) {
    let size = f.size();
    let base = Block::default().style(Style::default().bg(BG_PRIMARY));
    f.render_widget(base, size);

    app.action_areas.clear();
    app.message_area = None;

    if app.chat.is_some() {
        render_chat_screen(f, app, size);
    } else {
        render_gate_screen(f, app, size);
    }
}

fn render_gate_screen(f: &mut Frame<'_>, app: &mut App, size: Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(1)])
        .split(size);
    let area = centered_rect(70, 60, vertical[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(NOTICE_ERROR))
        .title(Span::styled(
            app.lang.gate_title(),
            Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(3)])
        .split(inner);

    let reason = match &app.gate {
        Err(reason) => reason.to_string(),
        Ok(()) => String::new(),
    };
    let text = vec![
        Line::from(Span::styled(
            app.lang.gate_rejected(),
            Style::default().fg(NOTICE_ERROR).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(reason, Style::default().fg(FG_DIM))),
    ];
    f.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(BG_PANEL)),
        rows[0],
    );

    render_composer(
        f,
        &app.token_input,
        app.lang.gate_token_prompt(),
        "",
        rows[1],
        true,
    );
    render_status_bar(app, f, vertical[1]);
}

fn render_chat_screen(f: &mut Frame<'_>, app: &mut App, size: Rect) {
    let has_notice = app.chat.as_ref().is_some_and(|chat| chat.notice().is_some());
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(if has_notice { 1 } else { 0 }),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(app, f, vertical[0]);
    render_chat_header(f, app, vertical[1]);
    render_action_bar(f, app, vertical[2]);
    render_messages(f, app, vertical[3]);
    render_input_bar(f, app, vertical[4]);
    if has_notice {
        render_notice(f, app, vertical[5]);
    }
    render_status_bar(app, f, vertical[6]);
}

fn render_chat_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.lang.chat_section()),
            Style::default().fg(FG_DIM),
        ),
        Span::styled(
            app.lang.chat_title(),
            Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}: {}", app.lang.session_prefix(), app.user_name()),
            Style::default().fg(FG_DIM),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(BG_PANEL)),
        area,
    );
}

fn render_action_bar(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let mut buttons = vec![
        (
            CommandAction::VoiceMock,
            format!("[F2 {}]", app.lang.voice()),
        ),
        (
            CommandAction::NewTunnel,
            format!("[F3 {}]", app.lang.new_tunnel()),
        ),
    ];
    if app.notifier.is_some() {
        let label = if app.delay_pending {
            app.lang.delay_sending()
        } else {
            app.lang.delay_notify()
        };
        buttons.push((CommandAction::DelayedNotify, format!("[F4 {}]", label)));
    }

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    let mut cursor = area.x.saturating_add(1);
    let area_end = area.right();

    for (action, label) in buttons {
        if cursor >= area_end {
            break;
        }
        let width = cell_width(&label).min(area_end.saturating_sub(cursor));
        let style = if app.action_enabled(action) {
            Style::default().fg(BUTTON_TEXT).bg(BUTTON_BG)
        } else {
            Style::default().fg(BUTTON_DISABLED_TEXT).bg(BG_PANEL)
        };
        app.action_areas.push((
            Rect {
                x: cursor,
                y: area.y,
                width,
                height: 1,
            },
            action,
        ));
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
        cursor = cursor.saturating_add(width).saturating_add(1);
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(BG_PANEL)),
        area,
    );
}

fn render_messages(f: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER_IDLE))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);
    app.message_area = Some(inner);
    let wrap_width = inner.width.max(1) as usize;

    let Some(chat) = app.chat.as_ref() else {
        return;
    };
    let conversation = chat.conversation();

    let mut lines: Vec<Line> = Vec::new();
    if conversation.is_empty() {
        push_wrapped_line(
            &mut lines,
            app.lang.empty(),
            Style::default().fg(FG_DIM),
            wrap_width,
            Alignment::Center,
        );
    } else {
        for message in conversation.iter() {
            push_message(&mut lines, app, message, wrap_width);
            lines.push(Line::default());
        }
    }

    let content_height = lines.len().min(u16::MAX as usize) as u16;
    let offset = app
        .panel
        .sync(conversation.revision(), content_height, inner.height);

    let block = if app.panel.is_at_bottom() {
        block
    } else {
        block.title(Span::styled(" ▼ PgDn ", Style::default().fg(FG_DIM)))
    };
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(BG_PANEL))
        .scroll((offset, 0));
    f.render_widget(paragraph, area);
}

fn push_message(lines: &mut Vec<Line>, app: &App, message: &Message, wrap_width: usize) {
    let (author, color, alignment) = match message.role {
        Role::User => (app.user_name().to_string(), USER_FG, Alignment::Right),
        Role::Agent => (
            app.lang.agent_label().to_string(),
            AGENT_FG,
            Alignment::Left,
        ),
    };

    let mut header = vec![Span::styled(
        author,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if let Some(status) = message.status {
        let (label, status_color) = match status {
            MessageStatus::Pending => (app.lang.status_pending(), STATUS_PENDING_FG),
            MessageStatus::Sent => (app.lang.status_ok(), STATUS_OK_FG),
            MessageStatus::Error => (app.lang.status_error(), NOTICE_ERROR),
        };
        header.push(Span::raw(" · "));
        header.push(Span::styled(label, Style::default().fg(status_color)));
    }
    lines.push(Line::from(header).alignment(alignment));

    let text_style = if message.is_pending() {
        Style::default().fg(FG_DIM).add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(color)
    };
    for line in message.text.lines() {
        push_wrapped_line(lines, line, text_style, wrap_width, alignment);
    }
    if let Some(translated) = message.translated.as_ref() {
        push_wrapped_line(
            lines,
            &format!("{}: {}", app.lang.translation_label(), translated),
            Style::default().fg(FG_DIM),
            wrap_width,
            alignment,
        );
    }
}

fn render_input_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let busy = app.chat.as_ref().is_some_and(|chat| chat.is_busy());
    let title = if busy {
        app.lang.sending().to_string()
    } else {
        format!("{} (Enter)", app.lang.send())
    };
    render_composer(
        f,
        &app.chat_input,
        &title,
        app.lang.placeholder(),
        area,
        !busy,
    );
}

fn render_notice(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(notice) = app.chat.as_ref().and_then(|chat| chat.notice()) else {
        return;
    };
    let color = match notice.level {
        NoticeLevel::Error => NOTICE_ERROR,
        NoticeLevel::Warning => NOTICE_WARNING,
    };
    let paragraph = Paragraph::new(format!(" {} ", notice.text))
        .style(Style::default().fg(Color::Black).bg(color));
    f.render_widget(paragraph, area);
}

fn render_composer(
    f: &mut Frame<'_>,
    composer: &Composer,
    title: &str,
    placeholder: &str,
    area: Rect,
    active: bool,
) {
    let border = if active { BORDER_FOCUS } else { BORDER_IDLE };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(title.to_string(), Style::default().fg(FG_PRIMARY)))
        .style(Style::default().bg(BG_PANEL));
    let inner = block.inner(area);

    let line = if composer.is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(FG_DIM)))
    } else {
        Line::from(Span::styled(
            composer.buffer().to_string(),
            Style::default().fg(FG_PRIMARY),
        ))
    };

    let cursor_col = composer.cursor_column();
    let scroll_x = cursor_col.saturating_sub(inner.width.saturating_sub(1));
    let paragraph = Paragraph::new(line)
        .block(block)
        .style(Style::default().bg(BG_PANEL))
        .scroll((0, scroll_x));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);

    if active && inner.width > 0 && inner.height > 0 {
        f.set_cursor(
            inner.x.saturating_add(cursor_col - scroll_x),
            inner.y,
        );
    }
}

fn push_wrapped_line(
    lines: &mut Vec<Line>,
    text: &str,
    style: Style,
    width: usize,
    alignment: Alignment,
) {
    for segment in wrap_to_width(text, width) {
        lines.push(Line::from(Span::styled(segment, style)).alignment(alignment));
    }
}

fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    if text.is_empty() {
        return vec![String::new()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
        if current_width + ch_width > width && !current.is_empty() {
            result.push(current);
            current = String::new();
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    result.push(current);
    result
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

//! Status bar — session state and per-page key hints.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, Page};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let (state_str, state_color) = if app.busy {
        ("thinking", Color::Green)
    } else {
        ("idle", Color::DarkGray)
    };

    let hints = match app.page {
        Page::Dashboard => "c chat · i identities",
        Page::Identities => "↑/↓ select",
        Page::Accounts => "↑/↓ select · f filter",
        Page::Chat => "Enter send · F1-F4 suggestions · PgUp/PgDn scroll",
    };

    let spans = vec![
        Span::styled(
            format!(" {} ", state_str),
            Style::default().fg(Color::Black).bg(state_color),
        ),
        Span::raw(format!(" messages: {} ", app.messages.len())),
        Span::styled(format!(" {} ", hints), Style::default().fg(Color::DarkGray)),
        Span::styled(" Tab switch page · Ctrl+C quit ", Style::default().fg(Color::DarkGray)),
    ];

    let status = Paragraph::new(Line::from(spans));
    frame.render_widget(status, area);
}

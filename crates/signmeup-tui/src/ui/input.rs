//! Text input bar. Disabled while a reply is pending.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let enabled = app.input_enabled();
    let border_color = if enabled { Color::Cyan } else { Color::DarkGray };
    let title = if app.can_send() {
        " Message (Enter to send) "
    } else if enabled {
        " Type your message... "
    } else {
        " Waiting for reply... "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fg = if enabled { Color::White } else { Color::DarkGray };
    let input = Paragraph::new(app.input.as_str()).style(Style::default().fg(fg));
    frame.render_widget(input, inner);

    // Show cursor
    if enabled {
        let width = app.input.chars().count().min(u16::MAX as usize) as u16;
        frame.set_cursor_position(Position::new(inner.x.saturating_add(width), inner.y));
    }
}

//! Scrollable chat feed — transcript, thinking indicator, suggestions.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use signmeup_core::suggest::SUGGESTIONS;
use signmeup_core::types::Sender;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Chat Assistant ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // demo notice
            Constraint::Min(3),    // feed
            Constraint::Length(2), // suggestions
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(super::demo_notice(
            "Responses are simulated. No automation system is connected.",
        )),
        layout[0],
    );

    draw_feed(frame, app, layout[1]);
    draw_suggestions(frame, app, layout[2]);
}

fn draw_feed(frame: &mut Frame, app: &App, area: Rect) {
    // Build display lines from messages (bottom-up with scroll offset)
    let visible_height = area.height as usize;
    let total = app.messages.len();
    let end = total.saturating_sub(app.scroll_offset);
    let start = end.saturating_sub(visible_height * 2); // overshoot for wrapping

    let mut lines: Vec<Line> = Vec::new();
    for msg in &app.messages[start..end] {
        let (fg, prefix) = match msg.sender {
            Sender::Assistant => (Color::Green, "> "),
            Sender::User => (Color::Yellow, "< "),
        };
        for line in msg.text.lines() {
            lines.push(Line::styled(format!("{}{}", prefix, line), Style::default().fg(fg)));
        }
        lines.push(Line::raw(""));
    }

    if app.busy && app.scroll_offset == 0 {
        lines.push(Line::styled(
            "> Thinking...",
            Style::default().fg(Color::Green).italic(),
        ));
    }

    // Keep the newest lines in view
    let overflow = lines.len().saturating_sub(visible_height);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((overflow.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}

fn draw_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let mut prompts: Vec<Span> = Vec::new();
    for (i, s) in SUGGESTIONS.iter().enumerate() {
        prompts.push(Span::styled(format!("F{}", i + 1), Style::default().fg(Color::Cyan)));
        prompts.push(Span::raw(format!(" {}  ", s)));
    }

    let mut follow_up: Vec<Span> = Vec::new();
    if let Some(meta) = &app.last_reply {
        if let Some(signup) = &meta.signup {
            follow_up.push(Span::styled(
                format!("target: {}  ", signup.website_url),
                Style::default().fg(Color::Magenta),
            ));
        }
        if !meta.suggestions.is_empty() {
            follow_up.push(Span::styled(
                format!("try: {}", meta.suggestions.join(" · ")),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let paragraph = Paragraph::new(vec![Line::from(prompts), Line::from(follow_up)]);
    frame.render_widget(paragraph, area);
}

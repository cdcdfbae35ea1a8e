//! TUI layout compositing — assembles the page and its chrome.

mod accounts;
mod chat;
mod dashboard;
mod identities;
mod input;
mod status;
mod switcher;

use ratatui::prelude::*;

use crate::app::{App, Page};

/// Render the full TUI layout.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // ┌──────────────────────────────────┐
    // │ Tabs (switcher)                  │
    // ├──────────────────────────────────┤
    // │ Page content                     │
    // ├──────────────────────────────────┤
    // │ Status bar                       │
    // ├──────────────────────────────────┤
    // │ Input (chat page only)           │
    // └──────────────────────────────────┘

    let input_height = if app.page == Page::Chat { 3 } else { 0 };
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // tabs
            Constraint::Min(10),              // content
            Constraint::Length(1),            // status
            Constraint::Length(input_height), // input
        ])
        .split(area);

    switcher::draw(frame, app, main_layout[0]);

    match app.page {
        Page::Dashboard => dashboard::draw(frame, main_layout[1]),
        Page::Identities => identities::draw(frame, app, main_layout[1]),
        Page::Accounts => accounts::draw(frame, app, main_layout[1]),
        Page::Chat => {
            chat::draw(frame, app, main_layout[1]);
            input::draw(frame, app, main_layout[3]);
        }
    }

    status::draw(frame, app, main_layout[2]);
}

/// Shared demo-mode notice shown on every page.
pub(crate) fn demo_notice(text: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled(" Demo Mode ", Style::default().fg(Color::Black).bg(Color::Blue)),
        Span::styled(format!(" {}", text), Style::default().fg(Color::Blue)),
    ])
}

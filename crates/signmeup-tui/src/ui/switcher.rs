//! Page tab switcher.

use ratatui::prelude::*;
use ratatui::widgets::Tabs;

use crate::app::{App, Page};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = Page::ALL
        .iter()
        .map(|page| {
            // Pending reply marker on the chat tab
            let indicator = if *page == Page::Chat && app.busy { "*" } else { " " };
            format!(" {}{} ", page.title(), indicator)
        })
        .collect();

    let selected = Page::ALL.iter().position(|p| *p == app.page).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .divider("|");

    frame.render_widget(tabs, area);
}

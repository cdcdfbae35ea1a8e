//! Identities page — identity list and the selected identity's details.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use signmeup_core::fixtures::IDENTITIES;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(area);

    frame.render_widget(
        Paragraph::new(super::demo_notice(
            "In the full version, all identity data would be encrypted with your master key.",
        )),
        outer[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer[1]);

    let items: Vec<ListItem> = IDENTITIES
        .iter()
        .map(|identity| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(identity.name, Style::default().bold()),
                    Span::styled(
                        format!("  {} accounts", identity.accounts_count),
                        Style::default().fg(Color::Green),
                    ),
                ]),
                Line::styled(identity.description, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Digital Identities ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().fg(Color::Cyan))
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(Some(app.selected_identity));
    frame.render_stateful_widget(list, columns[0], &mut state);

    let detail_block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(identity) = IDENTITIES.get(app.selected_identity) else {
        frame.render_widget(detail_block, columns[1]);
        return;
    };

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<12}", label), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    };
    let detail = Paragraph::new(vec![
        field("Name", format!("{} {}", identity.first_name, identity.last_name)),
        field("Email", identity.email.to_string()),
        field("Profession", identity.profession.to_string()),
        field("Location", identity.location.to_string()),
        field("Created", identity.created_at.to_string()),
        field("Accounts", identity.accounts_count.to_string()),
    ])
    .wrap(Wrap { trim: true })
    .block(detail_block);
    frame.render_widget(detail, columns[1]);
}

//! Accounts page — stats row, filterable account list, detail pane.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use signmeup_core::fixtures::{account_stats, account_status, Account, ACCOUNTS};

use crate::app::App;

fn status_color(account: &Account) -> Color {
    match account_status(account) {
        "Active" => Color::Green,
        "Pending" => Color::Yellow,
        _ => Color::Red,
    }
}

fn stats_line() -> Line<'static> {
    let stats = account_stats(ACCOUNTS);
    let label = Style::default().fg(Color::DarkGray);
    Line::from(vec![
        Span::styled(" Total ", label),
        Span::styled(stats.total.to_string(), Style::default().fg(Color::Cyan).bold()),
        Span::styled("   Completed ", label),
        Span::styled(stats.completed.to_string(), Style::default().fg(Color::Green).bold()),
        Span::styled("   Pending ", label),
        Span::styled(stats.pending.to_string(), Style::default().fg(Color::Yellow).bold()),
        Span::styled("   Auto success ", label),
        Span::styled(
            format!("{}%", stats.success_rate_percent),
            Style::default().fg(Color::Blue).bold(),
        ),
    ])
}

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let accounts = app.visible_accounts();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    frame.render_widget(Paragraph::new(stats_line()), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let items: Vec<ListItem> = accounts
        .iter()
        .map(|account| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", account.website_name), Style::default().bold()),
                Span::styled(
                    format!("{:<9}", account_status(account)),
                    Style::default().fg(status_color(account)),
                ),
                Span::styled(account.identity_used, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Accounts ({}) · filter: {} ", accounts.len(), app.account_filter))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().fg(Color::Cyan))
        .highlight_symbol("▶ ");
    let selected = (!accounts.is_empty()).then_some(app.selected_account);
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, columns[0], &mut state);

    let detail_block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(account) = accounts.get(app.selected_account) else {
        let empty = Paragraph::new("No accounts match this filter.")
            .style(Style::default().fg(Color::DarkGray))
            .block(detail_block);
        frame.render_widget(empty, columns[1]);
        return;
    };

    let yes_no = |b: bool| if b { "yes" } else { "no" };
    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<14}", label), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    };
    let detail = Paragraph::new(vec![
        field("Website", account.website_url.to_string()),
        field("Identity", account.identity_used.to_string()),
        field("Status", account_status(account).to_string()),
        field("Signup done", yes_no(account.signup_completed).to_string()),
        field("Automation", yes_no(account.automation_success).to_string()),
        field("Created", account.created_at.to_string()),
        field("Last login", account.last_login.to_string()),
        field("Notes", account.notes.to_string()),
    ])
    .wrap(Wrap { trim: true })
    .block(detail_block);
    frame.render_widget(detail, columns[1]);
}

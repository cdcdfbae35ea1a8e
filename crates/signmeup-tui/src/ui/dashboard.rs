//! Dashboard — quick stats and feature blurbs.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use signmeup_core::fixtures::DASHBOARD_STATS;

pub fn draw(frame: &mut Frame, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // heading
            Constraint::Length(4), // stats
            Constraint::Min(4),    // features
            Constraint::Length(6), // demo notice
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::styled("Welcome to SignMeUp", Style::default().fg(Color::Cyan).bold()),
        Line::styled(
            "Your intelligent identity and account management system",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(heading, layout[0]);

    let stats = [
        ("Identities", DASHBOARD_STATS.identities.to_string(), "Digital identities ready to use"),
        ("Accounts", DASHBOARD_STATS.accounts.to_string(), "Automated accounts created"),
        (
            "Success Rate",
            format!("{}%", DASHBOARD_STATS.success_rate_percent),
            "Automation success rate",
        ),
    ];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(layout[1]);
    for ((title, value, caption), cell) in stats.into_iter().zip(cells.iter()) {
        let card = Paragraph::new(vec![
            Line::styled(value, Style::default().fg(Color::Green).bold()),
            Line::styled(caption, Style::default().fg(Color::DarkGray)),
        ])
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(card, *cell);
    }

    let features = Paragraph::new(vec![
        Line::styled("AI-Powered Automation", Style::default().bold()),
        Line::raw("Our intelligent system learns website signup processes and creates reusable automation scripts. (c) Try Chat Assistant"),
        Line::raw(""),
        Line::styled("Secure Identity Management", Style::default().bold()),
        Line::raw("Create and manage multiple digital identities with end-to-end encryption for all sensitive data. (i) Manage Identities"),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(features, layout[2]);

    let notice = Paragraph::new(vec![
        super::demo_notice("In the full version, you would:"),
        Line::raw("  • Set up secure authentication with master key encryption"),
        Line::raw("  • Create real automation scripts for website signups"),
        Line::raw("  • Store encrypted account credentials and API keys"),
        Line::raw("  • Use AI-powered web scraping for signup analysis"),
    ]);
    frame.render_widget(notice, layout[3]);
}

pub mod check;
pub mod help;
pub mod overview;
pub mod rules;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::tui::app::{Alert, AlertKind, ConnectionStatus};

pub fn render_tab_bar(
    f: &mut Frame,
    area: Rect,
    selected: usize,
    connection_status: &ConnectionStatus,
) {
    let titles = vec!["Overview", "Rules", "Check Input", "Help"];

    // Create title with connection status
    let title = match connection_status {
        ConnectionStatus::Connected => Line::from(vec![
            Span::raw("WAF Console "),
            Span::styled("● Connected", Style::default().fg(Color::Green)),
        ]),
        ConnectionStatus::Connecting => Line::from(vec![
            Span::raw("WAF Console "),
            Span::styled("● Connecting...", Style::default().fg(Color::Yellow)),
        ]),
        ConnectionStatus::Disconnected(_) => Line::from(vec![
            Span::raw("WAF Console "),
            Span::styled("● Disconnected", Style::default().fg(Color::Red)),
        ]),
    };

    let tabs = Tabs::new(
        titles
            .iter()
            .map(|t| Line::from(vec![Span::raw(*t)]))
            .collect::<Vec<_>>(),
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .select(selected)
    .style(Style::default().fg(Color::White))
    .highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    f.render_widget(tabs, area);
}

pub fn render_alert(f: &mut Frame, area: Rect, alert: &Alert) {
    let color = match alert.kind {
        AlertKind::Info => Color::Green,
        AlertKind::Error => Color::Red,
    };

    let widget = Paragraph::new(alert.text.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title("Alert"),
        )
        .style(Style::default().fg(color));

    f.render_widget(widget, area);
}

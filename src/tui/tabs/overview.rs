use crate::tui::app::{App, ConnectionStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    render_status(f, chunks[0], app);
    render_summary(f, chunks[1], app);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let message = app
        .home_message
        .as_deref()
        .unwrap_or("Welcome to WAF Dashboard");

    let connection = match app.connection_status {
        ConnectionStatus::Connected => {
            Span::styled("Backend reachable", Style::default().fg(Color::Green))
        }
        ConnectionStatus::Connecting => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        }
        ConnectionStatus::Disconnected(ref reason) => Span::styled(
            format!("Backend unreachable: {}", reason),
            Style::default().fg(Color::Red),
        ),
    };

    let refreshed = match app.last_refreshed {
        Some(at) => format!("Last refreshed: {}", at.format("%H:%M:%S")),
        None => "Not refreshed yet".to_string(),
    };

    let content = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Monitor and control web security threats in real time."),
        Line::from(""),
        Line::from(vec![
            connection,
            Span::raw("  ·  "),
            Span::styled(refreshed, Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let widget = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title("Firewall Status"));

    f.render_widget(widget, area);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let (total, enabled) = match app.registry.try_read() {
        Ok(registry) => {
            let enabled = registry.rules().iter().filter(|r| r.enabled).count();
            (registry.len(), enabled)
        }
        Err(_) => (0, 0),
    };

    let content = vec![
        Line::from(vec![
            Span::styled("Protection rules: ", Style::default().fg(Color::Gray)),
            Span::styled(total.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Enabled: ", Style::default().fg(Color::Gray)),
            Span::styled(enabled.to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Disabled: ", Style::default().fg(Color::Gray)),
            Span::styled(
                (total - enabled).to_string(),
                if total == enabled {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Yellow)
                },
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Switch to the Rules tab to toggle protections, or Check Input to probe the firewall.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title("Summary"));

    f.render_widget(widget, area);
}

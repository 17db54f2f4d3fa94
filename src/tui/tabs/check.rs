use crate::tui::app::App;
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
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_input(f, chunks[0], app);
    render_result(f, chunks[1], app);
    render_hint(f, chunks[2], app);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let in_flight = app.check_in_flight;

    let (title, border) = if in_flight {
        ("Input (submitting...)", Style::default().fg(Color::Yellow))
    } else {
        ("Input", Style::default().fg(Color::White))
    };

    let text = if app.input_buffer.is_empty() && !in_flight {
        Span::styled("Enter your input...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.input_buffer.as_str())
    };

    let widget = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );

    f.render_widget(widget, area);
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.check_result.as_ref() {
        Some(result) => {
            let color = if result.ok { Color::Green } else { Color::Red };
            Line::from(Span::styled(
                result.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(Span::styled(
            "No checks submitted yet.",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let widget =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Result"));

    f.render_widget(widget, area);
}

fn render_hint(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from("Type a string and press Enter to ask the firewall whether it would block it."),
        Line::from(""),
        Line::from(Span::styled(
            "Examples: ' OR 1=1 --   <script>alert(1)</script>   ../../etc/passwd",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter submit · Esc clear · Tab switch tabs",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if app.check_in_flight {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Editing is disabled while a check is in flight.",
            Style::default().fg(Color::Yellow),
        )));
    }

    let widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Check Input"));

    f.render_widget(widget, area);
}

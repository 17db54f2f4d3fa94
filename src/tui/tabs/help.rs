use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Tab / Shift+Tab   Switch tabs"),
        Line::from("  q                 Quit (outside the input field)"),
        Line::from("  r                 Refresh status and rules"),
        Line::from(""),
        Line::from(Span::styled("Rules tab", Style::default().fg(Color::Gray))),
        Line::from("  ↑ / ↓             Select rule"),
        Line::from("  Space / Enter     Toggle selected rule"),
        Line::from(""),
        Line::from(Span::styled("Check Input tab", Style::default().fg(Color::Gray))),
        Line::from("  Enter             Submit input to the firewall"),
        Line::from("  Esc               Clear the input field"),
        Line::from(""),
        Line::from(Span::styled("Notes", Style::default().fg(Color::Gray))),
        Line::from("  Rule toggles apply immediately on screen and roll back if the"),
        Line::from("  backend rejects the change. A rule being updated ignores further"),
        Line::from("  toggles until its request settles."),
    ];

    let widget =
        Paragraph::new(content).block(Block::default().borders(Borders::ALL).title("Help"));

    f.render_widget(widget, area);
}

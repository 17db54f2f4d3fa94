use crate::tui::app::{App, RulesView};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Display glyph per rule category. Unknown names fall back to the shield;
/// this is purely presentational and carries no data invariant.
pub fn category_icon(name: &str) -> &'static str {
    match name {
        "SQLi" => "🗄",
        "XSS" => "📜",
        "Command Injection" => "⌨",
        "Path Traversal" => "📁",
        "Rate Limiting" => "⏱",
        _ => "🛡",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Protection Rules");

    match app.rules_view {
        RulesView::Loading => {
            let widget = Paragraph::new("Loading rules...")
                .block(block)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(widget, area);
        }
        RulesView::FetchFailed(ref message) => {
            // Persistent inline error replacing the list.
            let widget = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    message.as_str(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Press 'r' to retry."),
            ])
            .block(block);
            f.render_widget(widget, area);
        }
        RulesView::Loaded => {
            // The event loop never renders while a write lock is held, so
            // this non-blocking read always succeeds.
            let registry = match app.registry.try_read() {
                Ok(registry) => registry,
                Err(_) => return,
            };

            if registry.is_empty() {
                let widget = Paragraph::new("No protection rules configured.")
                    .block(block)
                    .style(Style::default().fg(Color::Gray));
                f.render_widget(widget, area);
                return;
            }

            let mut lines = Vec::new();
            for (index, rule) in registry.rules().iter().enumerate() {
                let busy = app.coordinator.is_busy(&rule.id);

                let marker = if index == app.selected_rule { "▶ " } else { "  " };
                let state = if busy {
                    Span::styled("● updating", Style::default().fg(Color::Yellow))
                } else if rule.enabled {
                    Span::styled("● enabled ", Style::default().fg(Color::Green))
                } else {
                    Span::styled("○ disabled", Style::default().fg(Color::DarkGray))
                };

                let name_style = if index == app.selected_rule {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::raw(format!("{} ", category_icon(&rule.name))),
                    Span::styled(format!("{:<20}", rule.name), name_style),
                    state,
                ]));
                lines.push(Line::from(Span::styled(
                    format!("      {}", rule.description),
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::from(""));
            }

            lines.push(Line::from(Span::styled(
                "↑/↓ select · Space toggle · r refresh",
                Style::default().fg(Color::DarkGray),
            )));

            let widget = Paragraph::new(lines).block(block);
            f.render_widget(widget, area);
        }
    }
}

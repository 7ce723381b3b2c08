use crate::constants::CATEGORIES;
use crate::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_settings(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)].as_ref())
        .split(area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(
                "Select the topics for your feed ({} selected)",
                app.settings.selected.len()
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for (idx, category) in CATEGORIES.iter().enumerate() {
        let mark = if app.settings.is_selected(category) {
            "[x]"
        } else {
            "[ ]"
        };
        let mut style = if app.settings.is_selected(category) {
            Style::default().fg(Color::LightGreen)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if idx == app.settings.cursor {
            style = style.add_modifier(Modifier::BOLD);
            "▌ "
        } else {
            "  "
        };
        lines.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{} {}", mark, category), style),
        ]));
    }

    let list = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Preferences"));
    f.render_widget(list, chunks[0]);

    let status = if app.settings.saved_recently() {
        Span::styled("✓ Saved!", Style::default().fg(Color::Green))
    } else {
        Span::styled(
            "Press 's' to save preferences",
            Style::default().fg(Color::DarkGray),
        )
    };
    f.render_widget(Paragraph::new(Line::from(status)), chunks[1]);
}

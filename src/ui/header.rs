use crate::{App, AppState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TABS: [(&str, AppState); 6] = [
    ("1 Feed", AppState::Feed),
    ("2 Search", AppState::Search),
    ("3 Trends", AppState::Trends),
    ("4 Videos", AppState::Videos),
    ("5 Digest", AppState::Digest),
    ("6 Settings", AppState::Settings),
];

pub fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Min(1)].as_ref())
        .split(area);

    let title = Paragraph::new("▶ NewsFlow")
        .style(
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left);
    f.render_widget(title, chunks[0]);

    let mut spans = Vec::new();
    for (label, state) in TABS {
        let style = if app.state == state {
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }
    let tabs = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    f.render_widget(tabs, chunks[1]);
}

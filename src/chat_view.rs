use crate::constants::CHAT_ERROR_FALLBACK;
use crate::ui::overlay_rect;
use crate::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use textwrap::wrap;
use tokio::sync::Mutex;
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame, app: &mut App) {
    let area = overlay_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("News Assistant")
        .style(Style::default().fg(Color::White));
    f.render_widget(block, area);

    let inner = area.inner(ratatui::layout::Margin {
        horizontal: 1,
        vertical: 1,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    draw_messages(f, app, chunks[0]);
    draw_sources(f, app, chunks[1]);
    draw_input(f, app, chunks[2]);
}

fn draw_messages(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let wrap_width = (area.width as usize).saturating_sub(2).max(16);
    let mut lines: Vec<Line> = Vec::new();

    for message in &app.chat.messages {
        let (prefix, style) = if message.is_user() {
            ("You ", Style::default().fg(Color::Rgb(255, 223, 128)))
        } else {
            ("AI  ", Style::default().fg(Color::Rgb(144, 238, 144)))
        };
        let mut first = true;
        for wrapped in wrap(&message.content, wrap_width) {
            let lead = if first {
                Span::styled(prefix, style.add_modifier(Modifier::BOLD))
            } else {
                Span::raw("    ")
            };
            lines.push(Line::from(vec![
                lead,
                Span::styled(wrapped.to_string(), style),
            ]));
            first = false;
        }
        lines.push(Line::from(""));
    }

    if app.chat.waiting {
        lines.push(Line::from(Span::styled(
            "AI is typing...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let total = lines.len() as u16;
    let max_scroll = total.saturating_sub(area.height);
    let from_bottom = app.chat.scroll.min(max_scroll);
    let scroll = max_scroll - from_bottom;

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para.scroll((scroll, 0)), area);
}

fn draw_sources(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    if app.chat.sources.is_empty() {
        return;
    }
    let line = Line::from(vec![
        Span::styled("Sources: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.chat.sources.join("  "),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn draw_input(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let input = Line::from(vec![
        Span::styled("→ ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.chat.input.as_str(), Style::default().fg(Color::White)),
    ]);
    f.render_widget(Paragraph::new(input), area);
    let cursor_x = area.x + 2 + app.chat.input.width() as u16;
    f.set_cursor_position((cursor_x, area.y));
}

/// Sends one chat message. The user entry is already appended by the caller
/// via `ChatPanel::begin_send`; this resolves the backend reply.
pub async fn send_chat(
    app: Arc<Mutex<App>>,
    message: String,
    history: Vec<crate::models::ChatMessage>,
) {
    let api = {
        let guard = app.lock().await;
        guard.api.clone()
    };

    let result = api.chat(&message, &history).await;

    let mut guard = app.lock().await;
    match result {
        Ok(reply) => {
            guard.logs.add("Chat reply received".to_string());
            guard.chat.complete(Ok(reply));
        }
        Err(e) => {
            log::warn!("chat request failed: {}", e);
            guard.logs.add(format!("Chat error: {}", e));
            // The panel always falls back to the fixed message; the error
            // text itself only goes to the logs.
            guard
                .chat
                .complete(Err(e.user_message(CHAT_ERROR_FALLBACK)));
        }
    }
}

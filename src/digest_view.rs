use crate::constants::DIGEST_ERROR;
use crate::fetch::FetchState;
use crate::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn draw_digest(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Daily Digest");

    let mut lines: Vec<Line> = Vec::new();
    match app.digest.state() {
        FetchState::Idle => lines.push(Line::from(Span::styled(
            "Press 'r' to generate a digest for your categories.",
            Style::default().fg(Color::DarkGray),
        ))),
        FetchState::Loading => lines.push(Line::from(Span::styled(
            "Generating digest...",
            Style::default().fg(Color::DarkGray),
        ))),
        FetchState::Failed(message) => lines.push(Line::from(vec![
            Span::styled("✗ ", Style::default().fg(Color::Red)),
            Span::styled(message.as_str(), Style::default().fg(Color::Red)),
        ])),
        FetchState::Ready(digest) => {
            lines.push(Line::from(Span::styled(
                format!("Generated at {}", digest.generated_at),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            for text_line in digest.digest.lines() {
                lines.push(Line::from(text_line.to_string()));
            }
            if !digest.headlines.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Headlines",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for headline in &digest.headlines {
                    lines.push(Line::from(vec![
                        Span::styled("• ", Style::default().fg(Color::Cyan)),
                        Span::raw(headline.as_str()),
                    ]));
                }
            }
        }
    }

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.digest_scroll, 0));
    f.render_widget(para, area);
}

/// Generates a digest for the saved category selection.
pub async fn load_digest(app: Arc<Mutex<App>>) {
    let (api, categories, token) = {
        let mut guard = app.lock().await;
        let token = guard.digest.begin();
        guard.logs.add("Requesting daily digest...".to_string());
        (guard.api.clone(), guard.prefs.load(), token)
    };

    let result = api.get_digest(Some(&categories)).await;

    let mut guard = app.lock().await;
    match result {
        Ok(digest) => {
            guard
                .logs
                .add(format!("Digest ready ({} headlines)", digest.headlines.len()));
            guard.digest.complete(token, Ok(digest));
        }
        Err(e) => {
            log::warn!("digest request failed: {}", e);
            guard.logs.add(format!("Digest error: {}", e));
            guard
                .digest
                .complete(token, Err(e.user_message(DIGEST_ERROR)));
        }
    }
}

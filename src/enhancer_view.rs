use crate::constants::{SPEAK_ERROR, TRANSLATE_ERROR};
use crate::enhancer::{EnhancerTab, TaskState};
use crate::ui::overlay_rect;
use crate::App;
use copypasta::{ClipboardContext, ClipboardProvider};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn draw_enhancer(f: &mut Frame, app: &mut App) {
    let area = overlay_rect(70, 80, f.area());
    f.render_widget(Clear, area);

    let kind = match app.enhancer.kind {
        crate::enhancer::EnhancerKind::Article => "Article Enhancer",
        crate::enhancer::EnhancerKind::Video => "Video Enhancer",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(kind)
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
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(inner);

    let title = Paragraph::new(Span::styled(
        app.enhancer.title.as_str(),
        Style::default().fg(Color::Gray),
    ))
    .wrap(Wrap { trim: true });
    f.render_widget(title, chunks[0]);

    draw_tabs(f, app, chunks[1]);
    draw_tab_body(f, app, chunks[2]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        ("Summarize", EnhancerTab::Summarize),
        ("Translate", EnhancerTab::Translate),
        ("Speak", EnhancerTab::Speak),
    ];
    let mut spans = Vec::new();
    for (label, tab) in tabs {
        let style = if app.enhancer.tab == tab {
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn state_line(state: &TaskState, loading_text: &str) -> Option<Line<'static>> {
    match state {
        TaskState::Loading => Some(Line::from(Span::styled(
            loading_text.to_string(),
            Style::default().fg(Color::DarkGray),
        ))),
        TaskState::Failed(message) => Some(Line::from(vec![
            Span::styled("✗ ", Style::default().fg(Color::Red)),
            Span::styled(message.clone(), Style::default().fg(Color::Red)),
        ])),
        _ => None,
    }
}

fn draw_tab_body(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    match app.enhancer.tab {
        EnhancerTab::Summarize => {
            lines.push(Line::from(Span::styled(
                "Generate a concise AI summary of the item. Enter to run.",
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(""));
            if let Some(state) = state_line(app.enhancer.active_state(), "Summarizing...") {
                lines.push(state);
            }
            if let Some(summary) = &app.enhancer.summary {
                lines.push(Line::from(Span::styled(
                    "Summary",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for text_line in summary.lines() {
                    lines.push(Line::from(text_line.to_string()));
                }
            }
        }
        EnhancerTab::Translate => {
            lines.push(Line::from(vec![
                Span::styled("Target language: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    app.enhancer.target_language.label(),
                    Style::default().fg(Color::LightGreen),
                ),
                Span::styled(
                    "  (l to switch, Enter to run)",
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::from(""));
            if let Some(state) = state_line(app.enhancer.active_state(), "Translating...") {
                lines.push(state);
            }
            if let Some(translated) = &app.enhancer.translated {
                lines.push(Line::from(Span::styled(
                    "Translated Text",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for text_line in translated.lines() {
                    lines.push(Line::from(text_line.to_string()));
                }
            }
        }
        EnhancerTab::Speak => {
            lines.push(Line::from(vec![
                Span::styled("Speech language: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    app.enhancer.speak_language.label(),
                    Style::default().fg(Color::LightGreen),
                ),
                Span::styled(
                    "  (l to switch, Enter to run)",
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::from(""));
            match app.enhancer.speak_text() {
                Some(text) => {
                    lines.push(Line::from(Span::styled(
                        "Text to speak",
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                    for text_line in text.lines() {
                        lines.push(Line::from(text_line.to_string()));
                    }
                }
                None => lines.push(Line::from(Span::styled(
                    "No text yet — summarize or translate first.",
                    Style::default().fg(Color::DarkGray),
                ))),
            }
            lines.push(Line::from(""));
            if app.speech.is_playing() {
                lines.push(Line::from(Span::styled(
                    "♪ Playing...",
                    Style::default().fg(Color::LightGreen),
                )));
            }
            if let Some(state) = state_line(app.enhancer.active_state(), "Generating speech...") {
                lines.push(state);
            }
        }
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

pub async fn run_summarize(app: Arc<Mutex<App>>) {
    let (api, url, fallback) = {
        let mut guard = app.lock().await;
        if guard.enhancer.summarize_state.is_loading() {
            return;
        }
        guard.enhancer.begin_summarize();
        guard.logs.add("Summarizing...".to_string());
        (
            guard.api.clone(),
            guard.enhancer.url.clone(),
            guard.enhancer.summarize_fallback(),
        )
    };

    let result = api.summarize(&url).await;

    let mut guard = app.lock().await;
    match result {
        Ok(response) => {
            guard.logs.add("Summary ready".to_string());
            guard.enhancer.complete_summarize(Ok(response.summary));
        }
        Err(e) => {
            log::warn!("summarize request failed: {}", e);
            guard.logs.add(format!("Summarize error: {}", e));
            guard
                .enhancer
                .complete_summarize(Err(e.user_message(fallback)));
        }
    }
}

pub async fn run_translate(app: Arc<Mutex<App>>) {
    let (api, text, language) = {
        let mut guard = app.lock().await;
        if guard.enhancer.translate_state.is_loading() {
            return;
        }
        let Some(text) = guard.enhancer.begin_translate() else {
            return;
        };
        guard.logs.add("Translating...".to_string());
        (
            guard.api.clone(),
            text,
            guard.enhancer.target_language.code(),
        )
    };

    let result = api.translate_text(&text, language).await;

    let mut guard = app.lock().await;
    match result {
        Ok(response) => {
            guard.logs.add("Translation ready".to_string());
            guard
                .enhancer
                .complete_translate(Ok(response.translated_text));
        }
        Err(e) => {
            log::warn!("translate request failed: {}", e);
            guard.logs.add(format!("Translate error: {}", e));
            guard
                .enhancer
                .complete_translate(Err(e.user_message(TRANSLATE_ERROR)));
        }
    }
}

/// Requests speech audio and starts playback. The sink is released when
/// playback ends or when the enhancer closes.
pub async fn run_speak(app: Arc<Mutex<App>>) {
    let (api, text, language) = {
        let mut guard = app.lock().await;
        if guard.enhancer.speak_state.is_loading() || guard.speech.is_playing() {
            return;
        }
        let Some(text) = guard.enhancer.begin_speak() else {
            return;
        };
        guard.logs.add("Generating speech...".to_string());
        (guard.api.clone(), text, guard.enhancer.speak_language.code())
    };

    let result = api.speak_text(&text, language).await;

    let mut guard = app.lock().await;
    match result {
        Ok(bytes) => {
            guard
                .logs
                .add(format!("Speech ready ({} bytes)", bytes.len()));
            match guard.speech.play(bytes) {
                Ok(()) => guard.enhancer.complete_speak(Ok(())),
                Err(e) => {
                    log::warn!("speech playback failed to start: {}", e);
                    guard
                        .enhancer
                        .complete_speak(Err(SPEAK_ERROR.to_string()));
                }
            }
        }
        Err(e) => {
            log::warn!("speak request failed: {}", e);
            guard.logs.add(format!("Speak error: {}", e));
            guard
                .enhancer
                .complete_speak(Err(e.user_message(SPEAK_ERROR)));
        }
    }
}

/// Copies the active tab's result to the system clipboard.
pub fn copy_active_result(app: &mut App) {
    let Some(text) = app.enhancer.active_result().map(str::to_string) else {
        return;
    };
    match ClipboardContext::new() {
        Ok(mut ctx) => {
            if ctx.set_contents(text).is_ok() {
                app.logs.add("Copied to clipboard".to_string());
            } else {
                app.logs.add("Clipboard copy failed".to_string());
            }
        }
        Err(e) => {
            log::warn!("clipboard unavailable: {}", e);
            app.logs.add("Clipboard unavailable".to_string());
        }
    }
}

use crate::{App, AppState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the footer with instructions for the active screen or overlay.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let instructions = if app.enhancer.open {
        "Tab: switch mode, Enter: run, l: language, y: copy result, Esc: close."
    } else if app.chat.open {
        "Type your message and press Enter to send. Esc closes the chat."
    } else {
        match app.state {
            AppState::Feed => {
                "Up/Down: select, Enter: enhance, o: open in browser, r: refresh, /: search, c: chat, L: activity, q: quit."
            }
            AppState::Search => "Type a query and press Enter. Up/Down: select, Enter: enhance, Esc: back.",
            AppState::Trends => "Left/Right: category, r: refresh, Up/Down: select, Enter: enhance.",
            AppState::Videos => "m: mode, Left/Right: category, r: refresh, Enter: enhance.",
            AppState::Digest => "r: regenerate, Up/Down: scroll.",
            AppState::Settings => "Up/Down: move, Space: toggle category, s: save.",
            AppState::QuitConfirm => "Press 'y' to confirm quit or 'n' to cancel.",
            AppState::Quit => "",
        }
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}

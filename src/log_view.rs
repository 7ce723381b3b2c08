use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Bounded in-app activity log, rendered in a side pane on request.
#[derive(Debug)]
pub struct LogView {
    pub entries: Vec<String>,
    pub visible: bool,
}

const MAX_ENTRIES: usize = 200;

impl LogView {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            visible: false,
        }
    }

    pub fn add(&mut self, entry: String) {
        self.entries.push(entry);
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .entries
            .iter()
            .rev()
            .take(area.height.saturating_sub(2) as usize)
            .rev()
            .map(|entry| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.as_str()),
                ])
            })
            .collect();

        let para = Paragraph::new(lines)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::LEFT).title("Activity"))
            .wrap(Wrap { trim: true });
        f.render_widget(para, area);
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_bounded() {
        let mut log = LogView::new();
        for i in 0..250 {
            log.add(format!("entry {}", i));
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries[0], "entry 50");
    }
}

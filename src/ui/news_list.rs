use crate::fetch::{Fetch, FetchToken};
use crate::models::NewsItem;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use textwrap::wrap;

/// A scrollable card list over one fetch lifecycle. Shared by the feed,
/// search, trends and videos screens.
#[derive(Debug)]
pub struct NewsList {
    pub fetch: Fetch<Vec<NewsItem>>,
    pub list_state: ListState,
}

impl NewsList {
    pub fn new() -> Self {
        Self {
            fetch: Fetch::new(),
            list_state: ListState::default(),
        }
    }

    pub fn begin(&mut self) -> FetchToken {
        self.fetch.begin()
    }

    /// Applies a completed fetch; a fresh list resets the selection to the
    /// top and a stale completion is dropped.
    pub fn complete(&mut self, token: FetchToken, result: Result<Vec<NewsItem>, String>) -> bool {
        let applied = self.fetch.complete(token, result);
        if applied {
            match self.fetch.value() {
                Some(items) if !items.is_empty() => self.list_state.select(Some(0)),
                _ => self.list_state.select(None),
            }
        }
        applied
    }

    pub fn items(&self) -> &[NewsItem] {
        self.fetch.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_item(&self) -> Option<&NewsItem> {
        self.list_state
            .selected()
            .and_then(|idx| self.items().get(idx))
    }

    pub fn select_next(&mut self) {
        let len = self.items().len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(idx) if idx + 1 < len => idx + 1,
            Some(idx) => idx,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.items().is_empty() {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(idx) => idx.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(prev));
    }
}

impl Default for NewsList {
    fn default() -> Self {
        Self::new()
    }
}

fn sentiment_span(item: &NewsItem) -> Option<Span<'static>> {
    let sentiment = item.sentiment.as_deref()?;
    let (glyph, color) = match sentiment {
        "positive" => ("▲", Color::Green),
        "negative" => ("▼", Color::Red),
        _ => ("◆", Color::DarkGray),
    };
    let label = match item.sentiment_score {
        Some(score) => format!("{} {:.2}", glyph, score),
        None => glyph.to_string(),
    };
    Some(Span::styled(label, Style::default().fg(color)))
}

fn card_lines(item: &NewsItem, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        item.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    // At most two wrapped summary lines per card.
    let wrap_width = width.saturating_sub(4).max(16);
    for summary_line in wrap(&item.summary, wrap_width).into_iter().take(2) {
        lines.push(Line::from(Span::styled(
            summary_line.to_string(),
            Style::default().fg(Color::Gray),
        )));
    }

    let mut meta = vec![
        Span::styled(item.source.clone(), Style::default().fg(Color::Cyan)),
        Span::styled(" • ", Style::default().fg(Color::DarkGray)),
        Span::styled(item.category.clone(), Style::default().fg(Color::Magenta)),
        Span::styled(" • ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            item.published_at.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(sentiment) = sentiment_span(item) {
        meta.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        meta.push(sentiment);
    }
    lines.push(Line::from(meta));
    lines.push(Line::from(""));

    lines
}

/// Renders the list with its loading/error/empty states.
pub fn draw_news_list(f: &mut Frame, area: Rect, list: &mut NewsList, title: &str) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());

    if let Some(message) = list.fetch.error() {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled("✗ ", Style::default().fg(Color::Red)),
            Span::styled(message.to_string(), Style::default().fg(Color::Red)),
            Span::styled(
                "  (r: try again, x: dismiss)",
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(block)
        .wrap(Wrap { trim: true });
        f.render_widget(banner, area);
        return;
    }

    if list.fetch.is_loading() && list.items().is_empty() {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    if list.items().is_empty() {
        let empty = Paragraph::new("No items.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let width = area.width as usize;
    let items: Vec<ListItem> = list
        .items()
        .iter()
        .map(|item| ListItem::new(card_lines(item, width)))
        .collect();

    let widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 40, 60))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌ ");

    f.render_stateful_widget(widget, area, &mut list.list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> NewsItem {
        NewsItem {
            id: id.to_string(),
            title: title.to_string(),
            summary: "Summary.".to_string(),
            source: "Wire".to_string(),
            url: format!("https://example.com/{}", id),
            image_url: None,
            category: "World".to_string(),
            published_at: "2025-06-01T00:00:00Z".to_string(),
            sentiment: None,
            sentiment_score: None,
        }
    }

    #[test]
    fn fresh_list_selects_the_top_item() {
        let mut list = NewsList::new();
        let token = list.begin();
        list.complete(token, Ok(vec![item("a", "A"), item("b", "B")]));
        assert_eq!(list.selected_item().unwrap().id, "a");
    }

    #[test]
    fn replacement_resets_selection_and_drops_old_items() {
        let mut list = NewsList::new();
        let token = list.begin();
        list.complete(token, Ok(vec![item("a", "A"), item("b", "B"), item("c", "C")]));
        list.select_next();
        list.select_next();
        assert_eq!(list.selected_item().unwrap().id, "c");

        let token = list.begin();
        list.complete(token, Ok(vec![item("z", "Z")]));
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.selected_item().unwrap().id, "z");
    }

    #[test]
    fn stale_completion_leaves_list_untouched() {
        let mut list = NewsList::new();
        let old = list.begin();
        let new = list.begin();
        assert!(list.complete(new, Ok(vec![item("new", "New")])));
        assert!(!list.complete(old, Ok(vec![item("old", "Old")])));
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].id, "new");
    }

    #[test]
    fn selection_is_clamped_to_bounds() {
        let mut list = NewsList::new();
        let token = list.begin();
        list.complete(token, Ok(vec![item("a", "A"), item("b", "B")]));
        for _ in 0..10 {
            list.select_next();
        }
        assert_eq!(list.selected_item().unwrap().id, "b");
        for _ in 0..10 {
            list.select_prev();
        }
        assert_eq!(list.selected_item().unwrap().id, "a");
    }

    #[test]
    fn failure_replaces_nothing_but_reports_error() {
        let mut list = NewsList::new();
        let token = list.begin();
        list.complete(token, Err("backend down".to_string()));
        assert!(list.items().is_empty());
        assert_eq!(list.fetch.error(), Some("backend down"));
    }
}

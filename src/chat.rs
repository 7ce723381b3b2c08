//! State for the chat overlay: an append-only conversation log seeded with a
//! fixed greeting.

use crate::constants::{CHAT_ERROR_FALLBACK, CHAT_GREETING};
use crate::models::{ChatMessage, ChatResponse};

#[derive(Debug)]
pub struct ChatPanel {
    pub open: bool,
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub waiting: bool,
    pub sources: Vec<String>,
    /// Scroll offset in lines from the bottom; 0 follows new messages.
    pub scroll: u16,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self {
            open: false,
            messages: vec![ChatMessage::assistant(CHAT_GREETING)],
            input: String::new(),
            waiting: false,
            sources: Vec::new(),
            scroll: 0,
        }
    }

    /// Appends the user message optimistically and returns the history to
    /// send — the log as it stood before this message, matching the backend
    /// contract.
    pub fn begin_send(&mut self, text: &str) -> Vec<ChatMessage> {
        let history = self.messages.clone();
        self.messages.push(ChatMessage::user(text));
        self.input.clear();
        self.waiting = true;
        self.scroll = 0;
        history
    }

    /// Appends the assistant reply, or the fixed fallback on failure. Either
    /// way a send contributes exactly one more entry after the user message.
    pub fn complete(&mut self, result: Result<ChatResponse, String>) {
        match result {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(reply.response));
                self.sources = reply.sources.unwrap_or_default();
            }
            Err(message) => {
                log::warn!("chat request failed: {}", message);
                self.messages.push(ChatMessage::assistant(CHAT_ERROR_FALLBACK));
            }
        }
        self.waiting = false;
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_starts_with_greeting() {
        let panel = ChatPanel::new();
        assert_eq!(panel.messages.len(), 1);
        assert_eq!(panel.messages[0].role, "assistant");
        assert_eq!(panel.messages[0].content, CHAT_GREETING);
    }

    #[test]
    fn send_appends_exactly_two_entries_on_success() {
        let mut panel = ChatPanel::new();
        let before = panel.messages.len();

        let history = panel.begin_send("any fusion news?");
        assert_eq!(history.len(), before);
        assert!(panel.waiting);

        panel.complete(Ok(ChatResponse {
            response: "Yes, a tokamak milestone.".to_string(),
            sources: Some(vec!["https://example.com/tokamak".to_string()]),
        }));

        assert_eq!(panel.messages.len(), before + 2);
        assert!(panel.messages[before].is_user());
        assert_eq!(panel.messages[before + 1].content, "Yes, a tokamak milestone.");
        assert_eq!(panel.sources.len(), 1);
        assert!(!panel.waiting);
    }

    #[test]
    fn send_appends_exactly_two_entries_on_failure() {
        let mut panel = ChatPanel::new();
        let before = panel.messages.len();

        panel.begin_send("hello?");
        panel.complete(Err("connection refused".to_string()));

        assert_eq!(panel.messages.len(), before + 2);
        assert_eq!(panel.messages[before + 1].content, CHAT_ERROR_FALLBACK);
        assert!(!panel.waiting);
    }

    #[test]
    fn history_excludes_the_optimistic_user_message() {
        let mut panel = ChatPanel::new();
        panel.begin_send("first");
        panel.complete(Ok(ChatResponse {
            response: "reply".to_string(),
            sources: None,
        }));

        let history = panel.begin_send("second");
        // Greeting, user "first", reply — but not "second" itself.
        assert_eq!(history.len(), 3);
        assert_eq!(history.last().unwrap().content, "reply");
    }
}

use crate::constants::{AVATAR, USER_INDENT};
use chrono::{DateTime, Local};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Who wrote a message. The display name rides along with the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    User { name: String },
    Remote { name: String },
}

impl Sender {
    pub fn name(&self) -> &str {
        match self {
            Sender::User { name } | Sender::Remote { name } => name,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Sender::User { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn from_user(name: &str, content: impl Into<String>) -> Self {
        Self::new(
            Sender::User {
                name: name.to_string(),
            },
            content,
        )
    }

    pub fn from_remote(name: &str, content: impl Into<String>) -> Self {
        Self::new(
            Sender::Remote {
                name: name.to_string(),
            },
            content,
        )
    }

    /// Renders the entry for a pane `width` columns wide.
    pub fn render(&self, width: u16) -> Vec<Line<'static>> {
        let style = self.base_style();
        let content = sanitize(&self.content);
        match &self.sender {
            Sender::User { name } => self.render_user(name, &content, width, style),
            Sender::Remote { name } => self.render_remote(name, &content, width, style),
        }
    }

    fn base_style(&self) -> Style {
        Style::default().fg(if self.sender.is_user() {
            Color::Rgb(255, 223, 128)
        } else {
            Color::Rgb(144, 238, 144)
        })
    }

    // User entries sit indented toward the right of the pane, without an avatar.
    fn render_user(&self, name: &str, content: &str, width: u16, style: Style) -> Vec<Line<'static>> {
        let mut lines = vec![self.header(USER_INDENT, name, style)];
        push_content(&mut lines, USER_INDENT, content, width, style);
        lines.push(footer(USER_INDENT, style));
        lines
    }

    fn render_remote(&self, name: &str, content: &str, width: u16, style: Style) -> Vec<Line<'static>> {
        let avatar = format!("{} ", AVATAR);
        let gutter = " ".repeat(avatar.width());
        let mut lines = vec![self.header(&avatar, name, style)];
        push_content(&mut lines, &gutter, content, width, style);
        lines.push(footer(&gutter, style));
        lines
    }

    fn header(&self, lead: &str, name: &str, style: Style) -> Line<'static> {
        Line::from(vec![
            Span::styled(lead.to_string(), style),
            Span::styled("┌─ ".to_string(), style),
            Span::styled(sanitize(name), style.add_modifier(Modifier::BOLD)),
            Span::styled(" ".to_string(), style),
            Span::styled(
                self.timestamp.format("%H:%M").to_string(),
                style.add_modifier(Modifier::DIM),
            ),
        ])
    }
}

fn push_content(lines: &mut Vec<Line<'static>>, lead: &str, content: &str, width: u16, style: Style) {
    let wrap_width = (width as usize)
        .saturating_sub(lead.width() + 2)
        .max(1);

    for wrapped in wrap(content, wrap_width) {
        lines.push(Line::from(vec![
            Span::styled(lead.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(wrapped.into_owned(), style),
        ]));
    }
}

fn footer(lead: &str, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(lead.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ])
}

/// Makes `content` safe to paint: tabs become spaces and every other control
/// character (escape sequences included) is dropped. Newlines survive.
pub fn sanitize(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// The scrolling message log.
#[derive(Debug, Default)]
pub struct ChatLog {
    entries: Vec<ChatMessage>,
    scroll: u16,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the message and jumps to the newest entry.
    pub fn append(&mut self, message: ChatMessage) {
        self.entries.push(message);
        self.scroll_to_bottom();
    }

    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry, separated by a blank line.
    pub fn render(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for message in &self.entries {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.extend(message.render(width));
        }
        lines
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_add(amount);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = u16::MAX;
    }

    /// Clamps the scroll offset to what `total_lines` in `height` rows allows
    /// and returns it.
    pub fn clamp_scroll(&mut self, total_lines: usize, height: u16) -> u16 {
        let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
        let max_scroll = total.saturating_sub(height);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_user_template_has_name_and_content_without_avatar() {
        let message = ChatMessage::from_user("You", "what is in chapter 2?");
        let lines: Vec<String> = message.render(80).iter().map(text).collect();

        assert!(lines[0].contains("┌─ You"));
        assert!(!lines[0].contains(AVATAR));
        assert!(lines[1].ends_with("│ what is in chapter 2?"));
        assert!(lines[1].starts_with(USER_INDENT));
    }

    #[test]
    fn test_remote_template_has_avatar_and_sender_name() {
        let message = ChatMessage::from_remote("Archivist", "Chapter 2 covers indexing.");
        let lines: Vec<String> = message.render(80).iter().map(text).collect();

        assert!(lines[0].starts_with(AVATAR));
        assert!(lines[0].contains("┌─ Archivist"));
        assert!(lines[1].ends_with("│ Chapter 2 covers indexing."));
    }

    #[test]
    fn test_long_content_wraps_to_width() {
        let message = ChatMessage::from_remote("Milo", "word ".repeat(40));
        let lines = message.render(30);

        assert!(lines.len() > 3);
        for line in &lines {
            assert!(text(line).width() <= 30);
        }
    }

    #[test]
    fn test_content_is_rendered_as_plain_text() {
        let message = ChatMessage::from_remote("Milo", "\x1b[2J<b>bold</b>\x07");
        let rendered: String = message.render(80).iter().map(text).collect();

        assert!(!rendered.contains('\x1b'));
        assert!(!rendered.contains('\x07'));
        assert!(rendered.contains("[2J<b>bold</b>"));
    }

    #[test]
    fn test_sanitize_keeps_newlines_and_expands_tabs() {
        assert_eq!(sanitize("a\tb\r\nc"), "a    b\nc");
    }

    #[test]
    fn test_same_message_twice_gives_two_identical_entries() {
        let mut log = ChatLog::new();
        let message = ChatMessage::from_remote("Milo", "hello");
        log.append(message.clone());
        log.append(message);

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0], log.entries()[1]);

        let first: Vec<String> = log.entries()[0].render(40).iter().map(text).collect();
        let second: Vec<String> = log.entries()[1].render(40).iter().map(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_log_render_separates_entries() {
        let mut log = ChatLog::new();
        log.append(ChatMessage::from_user("You", "hi"));
        log.append(ChatMessage::from_remote("Milo", "hello"));

        let lines = log.render(40);
        // header + content + footer per entry, one blank separator
        assert_eq!(lines.len(), 7);
        assert_eq!(text(&lines[3]), "");
    }

    #[test]
    fn test_append_scrolls_to_bottom() {
        let mut log = ChatLog::new();
        for i in 0..10 {
            log.append(ChatMessage::from_user("You", format!("message {}", i)));
        }
        log.scroll_up(u16::MAX);
        assert_eq!(log.clamp_scroll(40, 10), 0);

        log.append(ChatMessage::from_remote("Milo", "newest"));
        assert_eq!(log.clamp_scroll(44, 10), 34);
    }

    #[test]
    fn test_clamp_scroll_when_content_fits() {
        let mut log = ChatLog::new();
        log.scroll_down(5);
        assert_eq!(log.clamp_scroll(3, 10), 0);
    }
}

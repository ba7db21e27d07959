use crate::chat_log::ChatLog;
use crate::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, app: &App, log: &mut ChatLog) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),    // Messages
                Constraint::Length(1), // Status
                Constraint::Length(3), // Input
            ]
            .as_ref(),
        )
        .split(area);

    draw_messages(f, chunks[0], log);
    app.status_indicator.render(f, chunks[1]);
    draw_input(f, chunks[2], app);
}

fn draw_messages(f: &mut Frame<'_>, area: Rect, log: &mut ChatLog) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Chat")
        .style(Style::default().fg(Color::LightYellow));
    let inner = block.inner(area);

    let lines = log.render(inner.width);
    let scroll = log.clamp_scroll(lines.len(), inner.height);

    f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let prompt = "→ ";
    let prompt_width = u16::try_from(prompt.width()).unwrap_or(u16::MAX);
    let visible_width = area.width.saturating_sub(2).saturating_sub(prompt_width);
    // Paragraph scroll offsets are u16, so very long input pins to the limit.
    let text_width = u16::try_from(app.input.width()).unwrap_or(u16::MAX);
    let scroll_offset = text_width.saturating_sub(visible_width);

    let input = Line::from(vec![
        Span::styled(prompt, Style::default().fg(Color::DarkGray)),
        Span::styled(app.input.as_str(), Style::default().fg(Color::White)),
    ]);

    f.render_widget(
        Paragraph::new(input)
            .block(Block::default().borders(Borders::ALL).title("Message"))
            .scroll((0, scroll_offset)),
        area,
    );

    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(prompt_width)
        .saturating_add(text_width.min(visible_width));
    f.set_cursor_position((cursor_x, area.y + 1));
}

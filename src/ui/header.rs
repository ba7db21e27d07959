use crate::constants::{AVATAR, HEADER_TITLE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub fn draw_header(f: &mut Frame<'_>, area: Rect, base_url: &str) {
    let title = Paragraph::new(format!("{} {}  ·  {}", AVATAR, HEADER_TITLE, base_url))
        .style(
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);

    f.render_widget(title, area);
}

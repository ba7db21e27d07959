use crate::constants::SPINNER_FRAMES;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Default)]
pub struct StatusIndicator {
    pending: usize,
    status_text: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pending(&mut self, pending: usize) {
        self.pending = pending;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
    }

    pub fn clear_status(&mut self) {
        self.status_text.clear();
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    /// The text shown next to the spinner.
    pub fn text(&self) -> String {
        match self.pending {
            0 => self.status_text.clone(),
            1 => "Waiting for a reply...".to_string(),
            n => format!("Waiting for {} replies...", n),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner = if self.pending > 0 {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            " "
        };

        let status_color = if self.pending > 0 {
            Color::DarkGray
        } else {
            Color::Yellow
        };

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(self.text(), Style::default().fg(status_color)),
        ]);

        frame.render_widget(Paragraph::new(status).alignment(Alignment::Left), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_requests_override_status_text() {
        let mut indicator = StatusIndicator::new();
        indicator.set_status("PDF: report.pdf");
        assert_eq!(indicator.text(), "PDF: report.pdf");

        indicator.set_pending(1);
        assert_eq!(indicator.text(), "Waiting for a reply...");

        indicator.set_pending(3);
        assert_eq!(indicator.text(), "Waiting for 3 replies...");

        indicator.set_pending(0);
        indicator.clear_status();
        assert_eq!(indicator.text(), "");
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::Component;

/// Top bar showing the app version, the backend in use, and whether a
/// fetch round is in flight.
pub struct StatusBar<'a> {
    base_url: &'a str,
    loading: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(base_url: &'a str, loading: bool) -> Self {
        Self { base_url, loading }
    }
}

impl Component for StatusBar<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let version = env!("CARGO_PKG_VERSION");
        let left_text = Span::styled(
            format!(" Propman v{version}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let loading_marker = if self.loading { "~ syncing " } else { "" };
        let right_text = format!("{loading_marker}{} ", self.base_url);
        let left_width = u16::try_from(left_text.width()).unwrap_or(u16::MAX);
        let right_width = u16::try_from(right_text.len()).unwrap_or(u16::MAX);
        let padding = area
            .width
            .saturating_sub(left_width.saturating_add(right_width));
        let status_bar = Paragraph::new(Line::from(vec![
            left_text,
            Span::raw(" ".repeat(padding as usize)),
            Span::styled(right_text, Style::default().fg(Color::Gray)),
        ]))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        f.render_widget(status_bar, area);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn test_status_bar_shows_backend_and_sync_marker() {
        // Arrange
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let bar = StatusBar::new("http://127.0.0.1:8992/", true);

        // Act
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area);
            })
            .expect("failed to draw");

        // Assert
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains("Propman v"));
        assert!(text.contains("syncing"));
        assert!(text.contains("http://127.0.0.1:8992/"));
    }
}

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::Component;

const OVERLAY_HEIGHT: u16 = 3;
const OVERLAY_WIDTH: u16 = 48;

/// Centered single-line input popup for create and rename prompts.
pub struct PromptOverlay<'a> {
    title: &'a str,
    input: &'a str,
}

impl<'a> PromptOverlay<'a> {
    pub fn new(title: &'a str, input: &'a str) -> Self {
        Self { title, input }
    }
}

impl Component for PromptOverlay<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let width = OVERLAY_WIDTH.min(area.width);
        let height = OVERLAY_HEIGHT.min(area.height);
        let popup_area = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        // Keep the tail of long input visible next to the cursor.
        let visible_width = usize::from(popup_area.width.saturating_sub(3));
        let input_chars = self.input.chars().count();
        let visible: String = self
            .input
            .chars()
            .skip(input_chars.saturating_sub(visible_width))
            .collect();

        let paragraph = Paragraph::new(Line::from(Span::raw(format!(" {visible}"))))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(Span::styled(
                        format!(" {} ", self.title),
                        Style::default().fg(Color::Cyan),
                    )),
            );

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);

        let cursor_x = popup_area.x
            + 2
            + u16::try_from(visible.chars().count().min(visible_width)).unwrap_or(0);
        f.set_cursor_position(Position::new(cursor_x, popup_area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn test_prompt_overlay_renders_title_and_input() {
        // Arrange
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let overlay = PromptOverlay::new("New branch name", "feature/login");

        // Act
        terminal
            .draw(|f| {
                let area = f.area();
                overlay.render(f, area);
            })
            .expect("failed to draw");

        // Assert
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains("New branch name"));
        assert!(text.contains("feature/login"));
    }
}

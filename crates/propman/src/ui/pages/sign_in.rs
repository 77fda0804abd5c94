use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::Page;
use crate::ui::state::app_mode::{SignInField, SignInState};

const FORM_WIDTH: u16 = 52;
const FORM_HEIGHT: u16 = 9;
const PASSWORD_MASK: char = '*';

/// Credential form shown while no session token is present.
pub struct SignInPage<'a> {
    state: &'a SignInState,
}

impl<'a> SignInPage<'a> {
    pub fn new(state: &'a SignInState) -> Self {
        Self { state }
    }

    fn field_line(&self, label: &str, value: String, focused: bool) -> Line<'static> {
        let marker = if focused { "> " } else { "  " };
        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        Line::from(vec![
            Span::styled(
                format!("{marker}{label:<10}"),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(value, value_style),
        ])
    }
}

impl Page for SignInPage<'_> {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let width = FORM_WIDTH.min(area.width);
        let height = FORM_HEIGHT.min(area.height);
        let form_area = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        let title = if self.state.registering {
            " Register "
        } else {
            " Sign in "
        };
        let masked: String =
            std::iter::repeat_n(PASSWORD_MASK, self.state.password.chars().count()).collect();

        let mut lines = vec![
            Line::from(""),
            self.field_line(
                "Email:",
                self.state.email.clone(),
                self.state.focus == SignInField::Email,
            ),
            Line::from(""),
            self.field_line("Password:", masked, self.state.focus == SignInField::Password),
            Line::from(""),
        ];
        if self.state.pending {
            lines.push(Line::from(Span::styled(
                "authenticating...",
                Style::default().fg(Color::Yellow),
            )));
        } else if let Some(error) = &self.state.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let form = Paragraph::new(lines).alignment(Alignment::Left).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(form, form_area);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn test_sign_in_page_masks_password() {
        // Arrange
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let state = SignInState {
            email: "dev@example.com".to_string(),
            password: "secret".to_string(),
            focus: SignInField::Password,
            ..SignInState::default()
        };
        let mut page = SignInPage::new(&state);

        // Act
        terminal
            .draw(|f| {
                let area = f.area();
                page.render(f, area);
            })
            .expect("failed to draw");

        // Assert
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains("dev@example.com"));
        assert!(text.contains("******"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn test_sign_in_page_shows_error_line() {
        // Arrange
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let state = SignInState {
            error: Some("server error (401): bad credentials".to_string()),
            ..SignInState::default()
        };
        let mut page = SignInPage::new(&state);

        // Act
        terminal
            .draw(|f| {
                let area = f.area();
                page.render(f, area);
            })
            .expect("failed to draw");

        // Assert
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(ratatui::buffer::Cell::symbol).collect();
        assert!(text.contains("bad credentials"));
        assert!(text.contains("Sign in"));
    }
}

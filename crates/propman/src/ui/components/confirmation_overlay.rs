use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::Component;
use crate::ui::util::truncate_with_ellipsis;

const OVERLAY_HEIGHT: u16 = 5;
const MIN_OVERLAY_WIDTH: u16 = 36;

/// Centered Yes/No popup shown before a delete mutation is dispatched.
pub struct ConfirmationOverlay<'a> {
    title: &'a str,
    message: &'a str,
    selected_yes: bool,
}

impl<'a> ConfirmationOverlay<'a> {
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            selected_yes: false,
        }
    }

    /// Sets whether the "Yes" option is currently selected.
    #[must_use]
    pub fn selected_yes(mut self, yes: bool) -> Self {
        self.selected_yes = yes;
        self
    }
}

impl Component for ConfirmationOverlay<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let width = u16::try_from(self.message.chars().count() + 4)
            .unwrap_or(u16::MAX)
            .max(MIN_OVERLAY_WIDTH)
            .min(area.width);
        let height = OVERLAY_HEIGHT.min(area.height);
        let popup_area = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );
        let message = truncate_with_ellipsis(
            self.message,
            usize::from(popup_area.width.saturating_sub(4)),
        );

        let selected_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let unselected_style = Style::default().fg(Color::White);
        let (yes_style, no_style) = if self.selected_yes {
            (selected_style, unselected_style)
        } else {
            (unselected_style, selected_style)
        };

        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(message, Style::default().fg(Color::White))),
            Line::from(""),
            Line::from(vec![
                Span::styled(" Yes ", yes_style),
                Span::raw("   "),
                Span::styled(" No ", no_style),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    format!(" {} ", self.title),
                    Style::default().fg(Color::Yellow),
                )),
        );

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);
    }
}

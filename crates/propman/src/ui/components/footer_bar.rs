use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::Component;
use crate::ui::state::app_mode::AppMode;

/// Bottom bar listing the key bindings of the current input mode.
pub struct FooterBar<'a> {
    mode: &'a AppMode,
}

impl<'a> FooterBar<'a> {
    pub fn new(mode: &'a AppMode) -> Self {
        Self { mode }
    }

    fn hints(&self) -> &'static str {
        match self.mode {
            AppMode::Explorer => {
                " j/k move · enter open · n project · a add child · r rename · d delete · R refresh · o sign out · q quit"
            }
            AppMode::Editor => {
                " type to edit · ctrl-s save · ctrl-d export · esc back"
            }
            AppMode::Prompt { .. } => " enter submit · esc cancel",
            AppMode::ConfirmDelete { .. } => " h/l choose · enter confirm · esc cancel",
            AppMode::SignIn(state) => {
                if state.registering {
                    " tab switch field · enter register · ctrl-r sign in instead · esc quit"
                } else {
                    " tab switch field · enter sign in · ctrl-r register instead · esc quit"
                }
            }
        }
    }
}

impl Component for FooterBar<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let footer = Paragraph::new(Line::from(Span::styled(
            self.hints(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::DIM),
        )))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        f.render_widget(footer, area);
    }
}

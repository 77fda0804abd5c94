use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::ui::Page;
use crate::ui::state::explorer_view::{RowKind, TreeRow};

const STATUS_LINE_HEIGHT: u16 = 1;
const FILE_GLYPH: &str = "└ ";
const COLLAPSED_GLYPH: &str = "▸ ";
const EXPANDED_GLYPH: &str = "▾ ";

/// Left panel: the flattened configuration tree plus a one-line status
/// area for fetch errors and mutation outcomes.
pub struct ExplorerPage<'a> {
    rows: &'a [TreeRow],
    cursor_index: Option<usize>,
    load_error: Option<&'a str>,
    mutation_notice: Option<&'a str>,
    mutation_error: Option<&'a str>,
    loading: bool,
    focused: bool,
}

impl<'a> ExplorerPage<'a> {
    pub fn new(
        rows: &'a [TreeRow],
        cursor_index: Option<usize>,
        load_error: Option<&'a str>,
        mutation_notice: Option<&'a str>,
        mutation_error: Option<&'a str>,
        loading: bool,
        focused: bool,
    ) -> Self {
        Self {
            rows,
            cursor_index,
            load_error,
            mutation_notice,
            mutation_error,
            loading,
            focused,
        }
    }

    fn status_line(&self) -> Option<(String, Color)> {
        if let Some(error) = self.load_error {
            return Some((format!(" {error}"), Color::Red));
        }
        if let Some(error) = self.mutation_error {
            return Some((format!(" {error}"), Color::Red));
        }
        self.mutation_notice
            .map(|notice| (format!(" {notice}"), Color::Green))
    }

    fn render_tree(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem<'_>> = if self.rows.is_empty() {
            let placeholder = if self.loading {
                "Loading collections..."
            } else {
                "No projects yet. Press 'n' to create one."
            };
            vec![ListItem::new(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.rows
                .iter()
                .map(|row| {
                    let glyph = match row.kind {
                        RowKind::File => FILE_GLYPH,
                        _ if row.expanded => EXPANDED_GLYPH,
                        _ => COLLAPSED_GLYPH,
                    };
                    let color = match row.kind {
                        RowKind::Project => Color::Yellow,
                        RowKind::Branch => Color::Cyan,
                        RowKind::File => Color::White,
                    };
                    let indent = "  ".repeat(row.depth);

                    ListItem::new(Span::styled(
                        format!("{indent}{glyph}{}", row.name),
                        Style::default().fg(color),
                    ))
                })
                .collect()
        };

        let mut list_state = ListState::default();
        if !self.rows.is_empty() {
            list_state.select(self.cursor_index);
        }

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).border_style(border_style).title(
                Span::styled(" Projects ", Style::default().fg(Color::Cyan)),
            ))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, area, &mut list_state);
    }
}

impl Page for ExplorerPage<'_> {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let Some((text, color)) = self.status_line() else {
            self.render_tree(f, area);
            return;
        };

        let chunks = Layout::default()
            .constraints([Constraint::Min(0), Constraint::Length(STATUS_LINE_HEIGHT)])
            .split(area);
        self.render_tree(f, chunks[0]);
        f.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(color))),
            chunks[1],
        );
    }
}

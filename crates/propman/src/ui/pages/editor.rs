use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::EditorManager;
use crate::ui::Page;

const NOTICE_LINE_HEIGHT: u16 = 1;

/// Right panel: the buffer of the open property file, or a placeholder
/// when nothing is selected.
pub struct EditorPage<'a> {
    editor: &'a EditorManager,
    focused: bool,
}

impl<'a> EditorPage<'a> {
    pub fn new(editor: &'a EditorManager, focused: bool) -> Self {
        Self { editor, focused }
    }

    fn title(&self) -> String {
        let Some(name) = self.editor.file_name() else {
            return " Editor ".to_string();
        };
        let type_label = self
            .editor
            .file_type()
            .map(|file_type| file_type.label())
            .unwrap_or_default();
        let dirty_marker = if self.editor.is_dirty() { "*" } else { "" };
        let saving_marker = if self.editor.is_saving() {
            " [saving]"
        } else {
            ""
        };

        format!(" {name}{dirty_marker} ({type_label}){saving_marker} ")
    }

    fn render_buffer(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                self.title(),
                Style::default().fg(Color::Yellow),
            ));

        if !self.editor.is_open() {
            let placeholder = Paragraph::new(Span::styled(
                "Select a property file to edit",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            f.render_widget(placeholder, area);
            return;
        }

        let (cursor_line, cursor_col) = self.editor.cursor();
        let visible_height = usize::from(area.height.saturating_sub(2));
        let scroll_y = (cursor_line + 1).saturating_sub(visible_height);
        let lines: Vec<Line<'_>> = self
            .editor
            .lines()
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((u16::try_from(scroll_y).unwrap_or(u16::MAX), 0));
        f.render_widget(paragraph, area);

        if self.focused {
            let cursor_x = area.x + 1 + u16::try_from(cursor_col).unwrap_or(0);
            let cursor_y =
                area.y + 1 + u16::try_from(cursor_line.saturating_sub(scroll_y)).unwrap_or(0);
            f.set_cursor_position(Position::new(
                cursor_x.min(area.x + area.width.saturating_sub(2)),
                cursor_y.min(area.y + area.height.saturating_sub(2)),
            ));
        }
    }
}

impl Page for EditorPage<'_> {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let Some((notice, is_error)) = self.editor.notice() else {
            self.render_buffer(f, area);
            return;
        };

        let chunks = Layout::default()
            .constraints([Constraint::Min(0), Constraint::Length(NOTICE_LINE_HEIGHT)])
            .split(area);
        self.render_buffer(f, chunks[0]);
        let color = if is_error { Color::Red } else { Color::Green };
        f.render_widget(
            Paragraph::new(Span::styled(
                format!(" {notice}"),
                Style::default().fg(color),
            )),
            chunks[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::domain::tree::PropertyFileNode;

    use super::*;

    fn open_editor(name: &str, content: &str) -> EditorManager {
        let mut editor = EditorManager::default();
        editor.open(&PropertyFileNode {
            id: "100".to_string(),
            name: name.to_string(),
            content: content.to_string(),
        });

        editor
    }

    #[test]
    fn test_editor_page_renders_placeholder_without_selection() {
        // Arrange
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let editor = EditorManager::default();
        let mut page = EditorPage::new(&editor, false);

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
        assert!(text.contains("Select a property file"));
    }

    #[test]
    fn test_editor_page_renders_buffer_and_type_in_title() {
        // Arrange
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let mut editor = open_editor("app.properties", "debug=false");
        editor.insert_char('#');
        let mut page = EditorPage::new(&editor, true);

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
        assert!(text.contains("app.properties* (.properties)"));
        assert!(text.contains("#debug=false"));
    }

    #[test]
    fn test_editor_page_renders_save_error_notice() {
        // Arrange
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).expect("failed to create terminal");
        let mut editor = open_editor("a.yml", "x: 1");
        let _ = editor.begin_save();
        editor.finish_save(Err("server error (500): boom".to_string()));
        let mut page = EditorPage::new(&editor, true);

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
        assert!(text.contains("server error (500): boom"));
    }
}

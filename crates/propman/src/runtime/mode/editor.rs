use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::runtime::EventResult;
use crate::ui::state::app_mode::AppMode;

/// Handles key input while the editor buffer has focus.
pub(crate) fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => app.save_open_file(),
            KeyCode::Char('d') => app.export_open_file(),
            _ => {}
        }

        return EventResult::Continue;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Tab => app.mode = AppMode::Explorer,
        KeyCode::Char(character) => app.editor.insert_char(character),
        KeyCode::Enter => app.editor.insert_newline(),
        KeyCode::Backspace => app.editor.backspace(),
        KeyCode::Left => app.editor.move_left(),
        KeyCode::Right => app.editor.move_right(),
        KeyCode::Up => app.editor.move_up(),
        KeyCode::Down => app.editor.move_down(),
        _ => {}
    }

    EventResult::Continue
}

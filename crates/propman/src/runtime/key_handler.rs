use crossterm::event::KeyEvent;

use crate::app::App;
use crate::runtime::{EventResult, mode};
use crate::ui::state::app_mode::AppMode;

pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    match &app.mode {
        AppMode::Explorer => mode::explorer::handle(app, key),
        AppMode::Editor => mode::editor::handle(app, key),
        AppMode::Prompt { .. } => mode::prompt::handle(app, key),
        AppMode::ConfirmDelete { .. } => mode::confirmation::handle(app, key),
        AppMode::SignIn(_) => mode::sign_in::handle(app, key),
    }
}

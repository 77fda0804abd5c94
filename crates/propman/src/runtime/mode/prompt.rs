use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::runtime::EventResult;
use crate::ui::state::app_mode::AppMode;

/// Handles key input while a create/rename prompt is visible.
pub(crate) fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => app.mode = AppMode::Explorer,
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Backspace => {
            if let AppMode::Prompt { input, .. } = &mut app.mode {
                input.pop();
            }
        }
        KeyCode::Char(character) => {
            if let AppMode::Prompt { input, .. } = &mut app.mode {
                input.push(character);
            }
        }
        _ => {}
    }

    EventResult::Continue
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;
    use tempfile::tempdir;

    use crate::infra::api::MockConfigApi;
    use crate::infra::session::SessionContext;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn prompting_app(home: &std::path::Path) -> App {
        let mut app = App::new(
            Arc::new(MockConfigApi::new()),
            SessionContext::load(home),
            home.to_path_buf(),
            "http://127.0.0.1:8992/".to_string(),
        );
        app.mode = AppMode::Explorer;
        app.prompt_create_project();

        app
    }

    #[test]
    fn test_typing_and_backspace_edit_the_input() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = prompting_app(home.path());

        // Act
        for character in "abc".chars() {
            handle(&mut app, key(KeyCode::Char(character)));
        }
        handle(&mut app, key(KeyCode::Backspace));

        // Assert
        let AppMode::Prompt { input, .. } = &app.mode else {
            panic!("expected prompt mode");
        };
        assert_eq!(input, "ab");
    }

    #[test]
    fn test_escape_cancels_without_dispatching() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = prompting_app(home.path());
        handle(&mut app, key(KeyCode::Char('x')));

        // Act
        handle(&mut app, key(KeyCode::Esc));

        // Assert (mock verifies no create call on drop)
        assert!(matches!(app.mode, AppMode::Explorer));
    }

    #[test]
    fn test_submitting_empty_input_just_closes_the_prompt() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = prompting_app(home.path());

        // Act
        handle(&mut app, key(KeyCode::Enter));

        // Assert (mock verifies no create call on drop)
        assert!(matches!(app.mode, AppMode::Explorer));
    }
}

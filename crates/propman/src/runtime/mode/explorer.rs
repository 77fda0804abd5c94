use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::runtime::EventResult;
use crate::ui::state::app_mode::AppMode;

/// Handles key input while the tree has focus.
pub(crate) fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => return EventResult::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_cursor_row(),
        KeyCode::Char('n') => app.prompt_create_project(),
        KeyCode::Char('a') => app.prompt_create_child(),
        KeyCode::Char('r') => app.prompt_rename(),
        KeyCode::Char('d') => app.confirm_delete_cursor_row(),
        KeyCode::Char('R') => app.refresh(),
        KeyCode::Char('o') => app.sign_out(),
        KeyCode::Tab => {
            if app.editor.is_open() {
                app.mode = AppMode::Editor;
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

    use crate::domain::entity::{Audit, Branch, BranchRef, Project, ProjectRef, Property};
    use crate::infra::api::MockConfigApi;
    use crate::infra::session::SessionContext;
    use crate::ui::state::app_mode::{DeleteTarget, EntityKind, PromptAction};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app(home: &std::path::Path) -> App {
        let mut app = App::new(
            Arc::new(MockConfigApi::new()),
            SessionContext::load(home),
            home.to_path_buf(),
            "http://127.0.0.1:8992/".to_string(),
        );
        app.mode = AppMode::Explorer;
        app.explorer.apply_collections_loaded(
            vec![Project {
                id: 1,
                name: "p1".to_string(),
                audit: Audit::default(),
            }],
            vec![Branch {
                id: 10,
                name: "b1".to_string(),
                project: ProjectRef { id: 1 },
                audit: Audit::default(),
            }],
            vec![Property {
                id: 100,
                file_name: "a.yml".to_string(),
                content: Some("x: 1".to_string()),
                branch: BranchRef { id: 10 },
                audit: Audit::default(),
            }],
        );
        app.view.seed_open_projects(app.explorer.tree());
        app.view.set_cursor("1");

        app
    }

    #[test]
    fn test_q_quits() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = loaded_app(home.path());

        // Act & Assert
        assert!(matches!(
            handle(&mut app, key(KeyCode::Char('q'))),
            EventResult::Quit
        ));
    }

    #[test]
    fn test_enter_toggles_folder_and_opens_file() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = loaded_app(home.path());
        app.view.set_cursor("10");

        // Act (expand the branch, then walk onto the file and open it)
        handle(&mut app, key(KeyCode::Enter));
        assert!(app.view.is_open("10"));
        handle(&mut app, key(KeyCode::Char('j')));
        handle(&mut app, key(KeyCode::Enter));

        // Assert
        assert!(matches!(app.mode, AppMode::Editor));
        assert_eq!(app.editor.file_name(), Some("a.yml"));
        assert_eq!(app.editor.content(), "x: 1");
    }

    #[test]
    fn test_rename_on_branch_row_opens_prefilled_prompt() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = loaded_app(home.path());
        app.view.set_cursor("10");

        // Act
        handle(&mut app, key(KeyCode::Char('r')));

        // Assert
        let AppMode::Prompt { action, input } = &app.mode else {
            panic!("expected prompt mode");
        };
        assert_eq!(*action, PromptAction::RenameBranch { branch_id: 10 });
        assert_eq!(input, "b1");
    }

    #[test]
    fn test_add_child_on_project_row_targets_branch_creation() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = loaded_app(home.path());

        // Act
        handle(&mut app, key(KeyCode::Char('a')));

        // Assert
        let AppMode::Prompt { action, .. } = &app.mode else {
            panic!("expected prompt mode");
        };
        assert_eq!(*action, PromptAction::CreateBranch { project_id: 1 });
    }

    #[test]
    fn test_delete_opens_confirmation_with_target() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = loaded_app(home.path());

        // Act
        handle(&mut app, key(KeyCode::Char('d')));

        // Assert
        let AppMode::ConfirmDelete { target, .. } = &app.mode else {
            panic!("expected confirmation mode");
        };
        assert_eq!(
            *target,
            DeleteTarget {
                kind: EntityKind::Project,
                id: 1,
                name: "p1".to_string(),
            }
        );
    }

    #[test]
    fn test_tab_focuses_editor_only_when_a_file_is_open() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = loaded_app(home.path());

        // Act & Assert (no file open: stays in the explorer)
        handle(&mut app, key(KeyCode::Tab));
        assert!(matches!(app.mode, AppMode::Explorer));
    }
}

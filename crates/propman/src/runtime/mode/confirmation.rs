use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::runtime::EventResult;
use crate::ui::state::app_mode::AppMode;

pub(crate) const YES_OPTION_INDEX: usize = 0;
pub(crate) const NO_OPTION_INDEX: usize = 1;

/// Handles key input while the delete confirmation is visible.
pub(crate) fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter => {
            let yes_selected = matches!(
                &app.mode,
                AppMode::ConfirmDelete {
                    selected_confirmation_index,
                    ..
                } if *selected_confirmation_index == YES_OPTION_INDEX
            );
            if yes_selected {
                app.execute_confirmed_delete();
            } else {
                app.mode = AppMode::Explorer;
            }
        }
        KeyCode::Char('y') => app.execute_confirmed_delete(),
        KeyCode::Esc | KeyCode::Char('n' | 'q') => app.mode = AppMode::Explorer,
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h' | 'l') => {
            if let AppMode::ConfirmDelete {
                selected_confirmation_index,
                ..
            } = &mut app.mode
            {
                *selected_confirmation_index = if *selected_confirmation_index == YES_OPTION_INDEX {
                    NO_OPTION_INDEX
                } else {
                    YES_OPTION_INDEX
                };
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

    use crate::domain::entity::ResponseMessage;
    use crate::infra::api::MockConfigApi;
    use crate::infra::session::SessionContext;
    use crate::ui::state::app_mode::{DeleteTarget, EntityKind};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn confirming_app(api: MockConfigApi, home: &std::path::Path) -> App {
        let mut app = App::new(
            Arc::new(api),
            SessionContext::load(home),
            home.to_path_buf(),
            "http://127.0.0.1:8992/".to_string(),
        );
        app.mode = AppMode::ConfirmDelete {
            target: DeleteTarget {
                kind: EntityKind::Branch,
                id: 10,
                name: "b1".to_string(),
            },
            selected_confirmation_index: YES_OPTION_INDEX,
        };

        app
    }

    #[tokio::test]
    async fn test_y_dispatches_the_delete() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut api = MockConfigApi::new();
        api.expect_delete_branch()
            .times(1)
            .withf(|branch_id| *branch_id == 10)
            .returning(|_| {
                Box::pin(async {
                    Ok(ResponseMessage {
                        message: "Branch deleted".to_string(),
                    })
                })
            });
        let mut app = confirming_app(api, home.path());

        // Act
        handle(&mut app, key(KeyCode::Char('y')));
        let event = app.next_app_event().await.expect("mutation completes");

        // Assert
        assert!(matches!(app.mode, AppMode::Explorer));
        assert_eq!(
            event,
            crate::app::AppEvent::MutationSucceeded {
                message: "Branch deleted".to_string(),
            }
        );
    }

    #[test]
    fn test_toggling_selection_then_enter_cancels() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = confirming_app(MockConfigApi::new(), home.path());

        // Act
        handle(&mut app, key(KeyCode::Char('l')));
        handle(&mut app, key(KeyCode::Enter));

        // Assert (mock verifies no delete call on drop)
        assert!(matches!(app.mode, AppMode::Explorer));
    }

    #[test]
    fn test_escape_cancels() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = confirming_app(MockConfigApi::new(), home.path());

        // Act
        handle(&mut app, key(KeyCode::Esc));

        // Assert
        assert!(matches!(app.mode, AppMode::Explorer));
    }
}

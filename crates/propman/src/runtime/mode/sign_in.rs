use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::runtime::EventResult;
use crate::ui::state::app_mode::AppMode;

/// Handles key input while the credential form is visible.
pub(crate) fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('r')
            && let AppMode::SignIn(state) = &mut app.mode
            && !state.pending
        {
            state.registering = !state.registering;
            state.error = None;
        }

        return EventResult::Continue;
    }

    match key.code {
        KeyCode::Esc => return EventResult::Quit,
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            if let AppMode::SignIn(state) = &mut app.mode {
                state.toggle_focus();
            }
        }
        KeyCode::Enter => app.submit_sign_in(),
        KeyCode::Backspace => {
            if let AppMode::SignIn(state) = &mut app.mode {
                state.focused_value_mut().pop();
            }
        }
        KeyCode::Char(character) => {
            if let AppMode::SignIn(state) = &mut app.mode {
                state.focused_value_mut().push(character);
            }
        }
        _ => {}
    }

    EventResult::Continue
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::tempdir;

    use crate::infra::api::MockConfigApi;
    use crate::infra::session::{AuthResponse, SessionContext};
    use crate::ui::state::app_mode::SignInField;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sign_in_app(api: MockConfigApi, home: &std::path::Path) -> App {
        App::new(
            Arc::new(api),
            SessionContext::load(home),
            home.to_path_buf(),
            "http://127.0.0.1:8992/".to_string(),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for character in text.chars() {
            handle(app, key(KeyCode::Char(character)));
        }
    }

    #[test]
    fn test_tab_switches_focused_field() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = sign_in_app(MockConfigApi::new(), home.path());

        // Act
        type_text(&mut app, "dev@example.com");
        handle(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "secret");

        // Assert
        let AppMode::SignIn(state) = &app.mode else {
            panic!("expected sign-in mode");
        };
        assert_eq!(state.email, "dev@example.com");
        assert_eq!(state.password, "secret");
        assert_eq!(state.focus, SignInField::Password);
    }

    #[test]
    fn test_enter_with_empty_fields_shows_error_without_request() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = sign_in_app(MockConfigApi::new(), home.path());

        // Act
        handle(&mut app, key(KeyCode::Enter));

        // Assert (mock verifies no auth request on drop)
        let AppMode::SignIn(state) = &app.mode else {
            panic!("expected sign-in mode");
        };
        assert!(!state.pending);
        assert_eq!(
            state.error.as_deref(),
            Some("email and password are required")
        );
    }

    #[tokio::test]
    async fn test_enter_submits_credentials_and_signs_in() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut api = MockConfigApi::new();
        api.expect_sign_in()
            .times(1)
            .withf(|credentials| credentials.email == "dev@example.com")
            .returning(|_| {
                Box::pin(async {
                    Ok(AuthResponse {
                        token: "tok-123".to_string(),
                        expires_at: "2026-12-31T00:00:00Z".to_string(),
                    })
                })
            });
        api.expect_fetch_projects()
            .times(1)
            .returning(|| Box::pin(async { Ok(vec![]) }));
        api.expect_fetch_branches()
            .times(1)
            .returning(|| Box::pin(async { Ok(vec![]) }));
        api.expect_fetch_properties()
            .times(1)
            .returning(|| Box::pin(async { Ok(vec![]) }));
        let mut app = sign_in_app(api, home.path());
        type_text(&mut app, "dev@example.com");
        handle(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "secret");

        // Act
        handle(&mut app, key(KeyCode::Enter));
        let event = app.next_app_event().await.expect("auth completes");
        app.apply_app_events(event);
        let event = app.next_app_event().await.expect("initial fetch completes");
        app.apply_app_events(event);

        // Assert
        assert!(matches!(app.mode, AppMode::Explorer));
        assert!(
            crate::infra::session::SessionStore::new(home.path())
                .load()
                .is_some()
        );
    }

    #[test]
    fn test_ctrl_r_toggles_registration() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = sign_in_app(MockConfigApi::new(), home.path());

        // Act
        handle(
            &mut app,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );

        // Assert
        let AppMode::SignIn(state) = &app.mode else {
            panic!("expected sign-in mode");
        };
        assert!(state.registering);
    }
}

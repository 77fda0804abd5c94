use std::time::Duration;

use crossterm::event::Event;
use tokio::sync::mpsc;

use crate::app::App;
use crate::runtime::{EventResult, key_handler};
use crate::ui::state::app_mode::AppMode;

pub(crate) fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) {
    std::thread::spawn(move || {
        loop {
            match crossterm::event::poll(Duration::from_millis(250)) {
                Ok(true) => {
                    if let Ok(event) = crossterm::event::read()
                        && event_tx.send(event).is_err()
                    {
                        break;
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
}

pub(crate) async fn process_events(
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    tick: &mut tokio::time::Interval,
) -> EventResult {
    enum LoopSignal {
        Event(Option<Event>),
        Tick,
    }

    // Wait for either a terminal event or the next tick (for redraws).
    // This yields to tokio so spawned request tasks can make progress on
    // this worker thread.
    let signal = tokio::select! {
        biased;
        event = event_rx.recv() => LoopSignal::Event(event),
        _ = tick.tick() => LoopSignal::Tick,
    };
    let maybe_event = match signal {
        LoopSignal::Event(event) => event,
        LoopSignal::Tick => {
            app.process_pending_app_events();
            None
        }
    };

    if matches!(process_event(app, maybe_event), EventResult::Quit) {
        return EventResult::Quit;
    }

    // Drain remaining queued events before re-rendering so rapid key
    // presses are processed immediately instead of one-per-frame.
    while let Ok(event) = event_rx.try_recv() {
        if matches!(process_event(app, Some(event)), EventResult::Quit) {
            return EventResult::Quit;
        }
    }

    EventResult::Continue
}

fn process_event(app: &mut App, event: Option<Event>) -> EventResult {
    match event {
        Some(Event::Key(key)) => key_handler::handle_key_event(app, key),
        Some(Event::Paste(text)) => {
            apply_paste(app, &text);

            EventResult::Continue
        }
        _ => EventResult::Continue,
    }
}

/// Routes pasted text into whatever input currently has focus. Carriage
/// returns are dropped; newlines only survive in the editor buffer.
fn apply_paste(app: &mut App, text: &str) {
    match &mut app.mode {
        AppMode::Editor => {
            for character in text.chars() {
                match character {
                    '\r' => {}
                    '\n' => app.editor.insert_newline(),
                    _ => app.editor.insert_char(character),
                }
            }
        }
        AppMode::Prompt { input, .. } => {
            input.extend(text.chars().filter(|character| !character.is_control()));
        }
        AppMode::SignIn(state) => {
            state
                .focused_value_mut()
                .extend(text.chars().filter(|character| !character.is_control()));
        }
        AppMode::Explorer | AppMode::ConfirmDelete { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::tempdir;

    use crate::domain::tree::PropertyFileNode;
    use crate::infra::api::MockConfigApi;
    use crate::infra::session::SessionContext;

    use super::*;

    fn test_app(home: &std::path::Path) -> App {
        App::new(
            Arc::new(MockConfigApi::new()),
            SessionContext::load(home),
            home.to_path_buf(),
            "http://127.0.0.1:8992/".to_string(),
        )
    }

    #[test]
    fn test_paste_into_editor_keeps_newlines() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = test_app(home.path());
        app.editor.open(&PropertyFileNode {
            id: "100".to_string(),
            name: "a.yml".to_string(),
            content: String::new(),
        });
        app.mode = AppMode::Editor;

        // Act
        apply_paste(&mut app, "a: 1\r\nb: 2");

        // Assert
        assert_eq!(app.editor.content(), "a: 1\nb: 2");
    }

    #[test]
    fn test_paste_into_prompt_strips_newlines() {
        // Arrange
        let home = tempdir().expect("failed to create temp dir");
        let mut app = test_app(home.path());
        app.prompt_create_project();

        // Act
        apply_paste(&mut app, "multi\nline name");

        // Assert
        let AppMode::Prompt { input, .. } = &app.mode else {
            panic!("expected prompt mode");
        };
        assert_eq!(input, "multiline name");
    }
}

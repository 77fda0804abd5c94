pub mod components;
pub mod pages;
pub mod state;
pub mod util;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::App;
use crate::ui::state::app_mode::AppMode;

const TREE_PANEL_PERCENT: u16 = 40;
const EDITOR_PANEL_PERCENT: u16 = 60;

/// A trait for UI pages that enforces a standard rendering interface.
pub trait Page {
    fn render(&mut self, f: &mut Frame, area: Rect);
}

/// A trait for UI components that enforces a standard rendering interface.
pub trait Component {
    fn render(&self, f: &mut Frame, area: Rect);
}

/// Renders one frame from the current app state.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Three-section layout: top status bar, content area, footer bar
    let outer_chunks = Layout::default()
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    components::status_bar::StatusBar::new(app.base_url(), app.explorer.is_loading())
        .render(f, outer_chunks[0]);
    components::footer_bar::FooterBar::new(&app.mode).render(f, outer_chunks[2]);

    let content_area = outer_chunks[1];
    match &app.mode {
        AppMode::SignIn(state) => {
            pages::sign_in::SignInPage::new(state).render(f, content_area);
        }
        AppMode::Explorer | AppMode::Editor => {
            render_workspace(f, content_area, app);
        }
        AppMode::Prompt { action, input } => {
            render_workspace(f, content_area, app);
            components::prompt_overlay::PromptOverlay::new(action.title(), input)
                .render(f, content_area);
        }
        AppMode::ConfirmDelete {
            target,
            selected_confirmation_index,
        } => {
            render_workspace(f, content_area, app);
            let message = format!("Delete {} \"{}\"?", target.kind.label(), target.name);
            components::confirmation_overlay::ConfirmationOverlay::new("Confirm Delete", &message)
                .selected_yes(*selected_confirmation_index == 0)
                .render(f, content_area);
        }
    }
}

/// Renders the two-panel workspace: tree on the left, editor on the right.
fn render_workspace(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(TREE_PANEL_PERCENT),
            Constraint::Percentage(EDITOR_PANEL_PERCENT),
        ])
        .split(area);

    let rows = app.rows();
    let cursor_index = app.view.cursor_index(&rows);
    let explorer_focused = !matches!(app.mode, AppMode::Editor);
    pages::explorer::ExplorerPage::new(
        &rows,
        cursor_index,
        app.explorer.load_error(),
        app.explorer.mutation_notice(),
        app.explorer.mutation_error(),
        app.explorer.is_loading(),
        explorer_focused,
    )
    .render(f, chunks[0]);
    pages::editor::EditorPage::new(&app.editor, matches!(app.mode, AppMode::Editor))
        .render(f, chunks[1]);
}

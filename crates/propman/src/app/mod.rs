//! App composition root: managers, the internal event bus, and the single
//! reducer that applies completed background work to state.
//!
//! Background tasks never touch state directly. They post [`AppEvent`]s
//! onto an unbounded channel and the main loop drains the channel on every
//! tick, applying events in arrival order. Invalidation triggered by
//! multiple events in one drain is coalesced into a single refetch round.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::entity::{Branch, Project, Property};
use crate::domain::tree::find_file;
use crate::infra::api::ConfigApi;
use crate::infra::session::{AuthResponse, Credentials, SessionContext, SignUpRequest};
use crate::ui::state::app_mode::{AppMode, DeleteTarget, EntityKind, PromptAction, SignInState};
use crate::ui::state::explorer_view::{ExplorerViewState, RowKind, TreeRow, visible_rows};

pub mod editor;
pub mod explorer;
mod service;

pub use editor::EditorManager;
pub use explorer::ExplorerManager;
pub use service::AppServices;

/// Returns the propman home directory (`~/.propman`), used for the session
/// file and log file.
pub fn propman_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".propman")
}

/// Completion events posted by background tasks onto the app event bus.
#[derive(Debug, PartialEq)]
pub enum AppEvent {
    /// All three collection fetches of one round succeeded.
    CollectionsLoaded {
        projects: Vec<Project>,
        branches: Vec<Branch>,
        properties: Vec<Property>,
    },
    /// At least one fetch of a round failed; carries the first error.
    CollectionsLoadFailed { error: String },
    /// A create/rename/delete mutation succeeded.
    MutationSucceeded { message: String },
    /// A create/rename/delete mutation failed.
    MutationFailed { error: String },
    /// A file content save succeeded.
    SaveSucceeded { message: String },
    /// A file content save failed.
    SaveFailed { error: String },
    /// Sign-in or registration succeeded.
    SignedIn { session: AuthResponse },
    /// Sign-in or registration failed.
    SignInFailed { error: String },
}

/// Top-level app state: input mode, the two managers, view state, and the
/// receiving end of the event bus.
pub struct App {
    pub mode: AppMode,
    pub explorer: ExplorerManager,
    pub editor: EditorManager,
    pub view: ExplorerViewState,
    pub(crate) services: AppServices,
    session: SessionContext,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    base_url: String,
    initial_open_seeded: bool,
}

impl App {
    /// Creates the app, starting in the explorer with an initial fetch when
    /// a session token is present, otherwise on the sign-in page.
    pub fn new(
        api: Arc<dyn ConfigApi>,
        session: SessionContext,
        export_dir: PathBuf,
        base_url: String,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let services = AppServices::new(api, event_tx, export_dir);
        let mut explorer = ExplorerManager::default();
        let mode = if session.is_authenticated() {
            explorer.spawn_fetch_all(&services);
            AppMode::Explorer
        } else {
            AppMode::SignIn(SignInState::default())
        };

        Self {
            mode,
            explorer,
            editor: EditorManager::default(),
            view: ExplorerViewState::default(),
            services,
            session,
            event_rx,
            base_url,
            initial_open_seeded: false,
        }
    }

    /// Returns the backend base URL for the status bar.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Waits for the next app event. Intended for deterministic tests; the
    /// main loop uses [`Self::process_pending_app_events`] instead.
    pub async fn next_app_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    /// Drains and applies any events queued since the last tick.
    pub fn process_pending_app_events(&mut self) {
        if let Ok(event) = self.event_rx.try_recv() {
            self.apply_app_events(event);
        }
    }

    /// Applies `first_event` plus everything else already queued, in order.
    ///
    /// Invalidation requested by several events in one batch collapses into
    /// one refetch round.
    pub fn apply_app_events(&mut self, first_event: AppEvent) {
        let mut events = vec![first_event];
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }

        let mut needs_invalidate = false;
        for event in events {
            self.apply_event(event, &mut needs_invalidate);
        }
        if needs_invalidate {
            self.explorer.invalidate_all(&self.services);
        }
    }

    fn apply_event(&mut self, event: AppEvent, needs_invalidate: &mut bool) {
        match event {
            AppEvent::CollectionsLoaded {
                projects,
                branches,
                properties,
            } => {
                self.explorer
                    .apply_collections_loaded(projects, branches, properties);
                if !self.initial_open_seeded && !self.explorer.tree().is_empty() {
                    self.view.seed_open_projects(self.explorer.tree());
                    self.initial_open_seeded = true;
                }
                self.editor.sync_after_rebuild(self.explorer.tree());
                if !self.editor.is_open() && matches!(self.mode, AppMode::Editor) {
                    self.mode = AppMode::Explorer;
                }
                let rows = visible_rows(self.explorer.tree(), &self.view);
                self.view.ensure_cursor(&rows);
            }
            AppEvent::CollectionsLoadFailed { error } => {
                self.explorer.apply_load_failed(error);
            }
            AppEvent::MutationSucceeded { message } => {
                self.explorer.apply_mutation_succeeded(message);
                *needs_invalidate = true;
            }
            AppEvent::MutationFailed { error } => {
                self.explorer.apply_mutation_failed(error);
            }
            AppEvent::SaveSucceeded { message } => {
                self.editor.finish_save(Ok(message));
                *needs_invalidate = true;
            }
            AppEvent::SaveFailed { error } => {
                self.editor.finish_save(Err(error));
            }
            AppEvent::SignedIn { session } => {
                if let Err(error) = self.session.establish(&session) {
                    warn!(%error, "failed to persist session");
                }
                self.mode = AppMode::Explorer;
                self.explorer.spawn_fetch_all(&self.services);
            }
            AppEvent::SignInFailed { error } => {
                if let AppMode::SignIn(state) = &mut self.mode {
                    state.pending = false;
                    state.error = Some(error);
                }
            }
        }
    }

    /// Manually refetches all three collections.
    pub fn refresh(&mut self) {
        self.explorer.invalidate_all(&self.services);
    }

    /// Returns the flattened rows currently visible in the explorer.
    pub fn rows(&self) -> Vec<TreeRow> {
        visible_rows(self.explorer.tree(), &self.view)
    }

    /// Moves the explorer cursor one row down.
    pub fn cursor_down(&mut self) {
        let rows = self.rows();
        self.view.move_down(&rows);
    }

    /// Moves the explorer cursor one row up.
    pub fn cursor_up(&mut self) {
        let rows = self.rows();
        self.view.move_up(&rows);
    }

    /// Activates the row under the cursor: folders toggle expansion, files
    /// open in the editor.
    pub fn activate_cursor_row(&mut self) {
        let rows = self.rows();
        let Some(row) = self.view.cursor_index(&rows).map(|index| &rows[index]) else {
            self.view.ensure_cursor(&rows);
            return;
        };
        if row.kind.is_folder() {
            self.view.toggle(&row.id);
        } else if let Some(file) = find_file(self.explorer.tree(), &row.id) {
            self.editor.open(file);
            self.mode = AppMode::Editor;
        }
    }

    /// Opens the new-project prompt.
    pub fn prompt_create_project(&mut self) {
        self.mode = AppMode::Prompt {
            action: PromptAction::CreateProject,
            input: String::new(),
        };
    }

    /// Opens the create-child prompt for the cursor row: a branch under a
    /// project, a file under a branch. File rows have no children.
    pub fn prompt_create_child(&mut self) {
        let Some((row, id)) = self.cursor_row_with_id() else {
            return;
        };
        let action = match row.kind {
            RowKind::Project => PromptAction::CreateBranch { project_id: id },
            RowKind::Branch => PromptAction::CreateFile { branch_id: id },
            RowKind::File => return,
        };
        self.mode = AppMode::Prompt {
            action,
            input: String::new(),
        };
    }

    /// Opens the rename prompt for the cursor row, prefilled with the
    /// current name.
    pub fn prompt_rename(&mut self) {
        let Some((row, id)) = self.cursor_row_with_id() else {
            return;
        };
        let action = match row.kind {
            RowKind::Project => PromptAction::RenameProject { project_id: id },
            RowKind::Branch => PromptAction::RenameBranch { branch_id: id },
            RowKind::File => PromptAction::RenameFile { property_id: id },
        };
        self.mode = AppMode::Prompt {
            action,
            input: row.name,
        };
    }

    /// Dispatches the pending prompt as a mutation and closes it.
    ///
    /// The typed name is submitted as-is; an empty prompt just closes.
    pub fn submit_prompt(&mut self) {
        if !matches!(self.mode, AppMode::Prompt { .. }) {
            return;
        }
        let AppMode::Prompt { action, input } =
            std::mem::replace(&mut self.mode, AppMode::Explorer)
        else {
            return;
        };
        if input.is_empty() {
            return;
        }
        let outcome = match action {
            PromptAction::CreateProject => {
                self.explorer.create_project(&self.services, input);
                Ok(())
            }
            PromptAction::CreateBranch { project_id } => {
                self.explorer.create_branch(&self.services, project_id, input);
                Ok(())
            }
            PromptAction::CreateFile { branch_id } => {
                self.explorer.create_file(&self.services, branch_id, input);
                Ok(())
            }
            PromptAction::RenameProject { project_id } => {
                self.explorer.rename_project(&self.services, project_id, input)
            }
            PromptAction::RenameBranch { branch_id } => {
                self.explorer.rename_branch(&self.services, branch_id, input)
            }
            PromptAction::RenameFile { property_id } => {
                self.explorer.rename_file(&self.services, property_id, input)
            }
        };
        if let Err(error) = outcome {
            self.explorer.apply_mutation_failed(error);
        }
    }

    /// Opens the delete confirmation for the cursor row.
    pub fn confirm_delete_cursor_row(&mut self) {
        let Some((row, id)) = self.cursor_row_with_id() else {
            return;
        };
        let kind = match row.kind {
            RowKind::Project => EntityKind::Project,
            RowKind::Branch => EntityKind::Branch,
            RowKind::File => EntityKind::File,
        };
        self.mode = AppMode::ConfirmDelete {
            target: DeleteTarget {
                kind,
                id,
                name: row.name,
            },
            selected_confirmation_index: 0,
        };
    }

    /// Dispatches the confirmed delete and closes the overlay.
    pub fn execute_confirmed_delete(&mut self) {
        if !matches!(self.mode, AppMode::ConfirmDelete { .. }) {
            return;
        }
        let AppMode::ConfirmDelete { target, .. } =
            std::mem::replace(&mut self.mode, AppMode::Explorer)
        else {
            return;
        };
        match target.kind {
            EntityKind::Project => self.explorer.delete_project(&self.services, target.id),
            EntityKind::Branch => self.explorer.delete_branch(&self.services, target.id),
            EntityKind::File => self.explorer.delete_file(&self.services, target.id),
        }
    }

    /// Begins a save of the open buffer; failures before dispatch surface
    /// on the editor immediately.
    pub fn save_open_file(&mut self) {
        if let Some(request) = self.editor.begin_save() {
            if let Err(error) = self.explorer.save_file(
                &self.services,
                request.property_id,
                request.file_name,
                request.content,
            ) {
                self.editor.finish_save(Err(error));
            }
        }
    }

    /// Writes the open buffer to the export directory.
    pub fn export_open_file(&mut self) {
        let dir = self.services.export_dir().to_path_buf();
        if let Err(error) = self.editor.export(&dir) {
            warn!(%error, "buffer export failed");
        }
    }

    /// Submits the credential form, as sign-in or registration depending on
    /// its toggle. Requires both fields to be non-empty.
    pub fn submit_sign_in(&mut self) {
        let AppMode::SignIn(state) = &mut self.mode else {
            return;
        };
        if state.pending {
            return;
        }
        if state.email.is_empty() || state.password.is_empty() {
            state.error = Some("email and password are required".to_string());
            return;
        }
        state.pending = true;
        state.error = None;

        let operation = if state.registering {
            self.services.api().sign_up(SignUpRequest {
                email: state.email.clone(),
                username: None,
                password: state.password.clone(),
            })
        } else {
            self.services.api().sign_in(Credentials {
                email: state.email.clone(),
                password: state.password.clone(),
            })
        };
        let event_tx = self.services.event_sender();
        tokio::spawn(async move {
            let event = match operation.await {
                Ok(session) => AppEvent::SignedIn { session },
                Err(error) => {
                    warn!(%error, "authentication failed");

                    AppEvent::SignInFailed {
                        error: error.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event);
        });
    }

    /// Signs out: clears the session, resets all state, and returns to the
    /// sign-in page.
    pub fn sign_out(&mut self) {
        if let Err(error) = self.session.terminate() {
            warn!(%error, "failed to clear stored session");
        }
        self.explorer = ExplorerManager::default();
        self.editor.clear();
        self.view.reset();
        self.initial_open_seeded = false;
        self.mode = AppMode::SignIn(SignInState::default());
    }

    fn cursor_row_with_id(&self) -> Option<(TreeRow, i64)> {
        let rows = self.rows();
        let row = self.view.cursor_index(&rows).map(|index| rows[index].clone())?;
        let id = row.id.parse::<i64>().ok()?;

        Some((row, id))
    }
}

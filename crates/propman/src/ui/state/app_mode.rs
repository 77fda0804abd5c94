//! Input modes of the console and the state each mode carries.

/// Pending text prompt kind, deciding which mutation a submitted value feeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptAction {
    CreateProject,
    CreateBranch { project_id: i64 },
    CreateFile { branch_id: i64 },
    RenameProject { project_id: i64 },
    RenameBranch { branch_id: i64 },
    RenameFile { property_id: i64 },
}

impl PromptAction {
    /// Title rendered above the prompt input.
    pub fn title(&self) -> &'static str {
        match self {
            PromptAction::CreateProject => "New project name",
            PromptAction::CreateBranch { .. } => "New branch name",
            PromptAction::CreateFile { .. } => "New file name",
            PromptAction::RenameProject { .. } => "Rename project",
            PromptAction::RenameBranch { .. } => "Rename branch",
            PromptAction::RenameFile { .. } => "Rename file",
        }
    }
}

/// Entity kind targeted by a delete confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Branch,
    File,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Branch => "branch",
            EntityKind::File => "file",
        }
    }
}

/// Target of a pending delete confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteTarget {
    pub kind: EntityKind,
    pub id: i64,
    pub name: String,
}

/// Which sign-in form field currently has focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignInField {
    #[default]
    Email,
    Password,
}

/// State of the credential form, shared by sign-in and registration.
#[derive(Debug, Default)]
pub struct SignInState {
    pub email: String,
    pub password: String,
    pub focus: SignInField,
    pub registering: bool,
    pub pending: bool,
    pub error: Option<String>,
}

impl SignInState {
    /// Returns the field string the focused input edits.
    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            SignInField::Email => &mut self.email,
            SignInField::Password => &mut self.password,
        }
    }

    /// Moves focus to the other form field.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SignInField::Email => SignInField::Password,
            SignInField::Password => SignInField::Email,
        };
    }
}

/// Current input mode. Key events are dispatched on this.
#[derive(Debug)]
pub enum AppMode {
    /// Tree navigation.
    Explorer,
    /// Editing the open property file buffer.
    Editor,
    /// Collecting a name for a create or rename mutation.
    Prompt {
        action: PromptAction,
        input: String,
    },
    /// Yes/No overlay before a delete mutation.
    ConfirmDelete {
        target: DeleteTarget,
        selected_confirmation_index: usize,
    },
    /// Credential form shown while no session token is present.
    SignIn(SignInState),
}

impl AppMode {
    /// Returns whether the mode renders as an overlay above the explorer.
    pub fn is_overlay(&self) -> bool {
        matches!(self, AppMode::Prompt { .. } | AppMode::ConfirmDelete { .. })
    }
}

//! Ephemeral explorer view state.
//!
//! Expand/collapse and cursor position are keyed by node id strings and
//! stored outside the derived tree, so a full rebuild never resets them as
//! long as the underlying entity ids are stable. Nothing here is persisted.

use std::collections::HashSet;

use crate::domain::tree::ProjectNode;

/// Node kind of one flattened tree row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    Project,
    Branch,
    File,
}

impl RowKind {
    /// Returns whether rows of this kind can be expanded.
    pub fn is_folder(self) -> bool {
        !matches!(self, RowKind::File)
    }
}

/// One visible row of the flattened tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub id: String,
    pub name: String,
    pub depth: usize,
    pub kind: RowKind,
    pub expanded: bool,
}

/// Expand/collapse set and cursor, both keyed by node id string.
#[derive(Default)]
pub struct ExplorerViewState {
    open_ids: HashSet<String>,
    cursor_id: Option<String>,
}

impl ExplorerViewState {
    /// Returns whether a node is expanded. Nodes start collapsed.
    pub fn is_open(&self, node_id: &str) -> bool {
        self.open_ids.contains(node_id)
    }

    /// Flips a node between collapsed and expanded.
    pub fn toggle(&mut self, node_id: &str) {
        if !self.open_ids.remove(node_id) {
            self.open_ids.insert(node_id.to_string());
        }
    }

    /// Expands every project node, mirroring the initial view after the
    /// first load.
    pub fn seed_open_projects(&mut self, tree: &[ProjectNode]) {
        for project in tree {
            self.open_ids.insert(project.id.clone());
        }
    }

    /// Returns the id of the row under the cursor.
    pub fn cursor_id(&self) -> Option<&str> {
        self.cursor_id.as_deref()
    }

    /// Places the cursor on a specific node.
    pub fn set_cursor(&mut self, node_id: &str) {
        self.cursor_id = Some(node_id.to_string());
    }

    /// Returns the cursor position within `rows`, if the cursor id is
    /// visible.
    pub fn cursor_index(&self, rows: &[TreeRow]) -> Option<usize> {
        let cursor_id = self.cursor_id.as_deref()?;

        rows.iter().position(|row| row.id == cursor_id)
    }

    /// Snaps the cursor to the first row when it points at nothing visible.
    pub fn ensure_cursor(&mut self, rows: &[TreeRow]) {
        if self.cursor_index(rows).is_none() {
            self.cursor_id = rows.first().map(|row| row.id.clone());
        }
    }

    /// Moves the cursor one visible row down.
    pub fn move_down(&mut self, rows: &[TreeRow]) {
        match self.cursor_index(rows) {
            Some(index) if index + 1 < rows.len() => {
                self.cursor_id = Some(rows[index + 1].id.clone());
            }
            Some(_) => {}
            None => self.ensure_cursor(rows),
        }
    }

    /// Moves the cursor one visible row up.
    pub fn move_up(&mut self, rows: &[TreeRow]) {
        match self.cursor_index(rows) {
            Some(index) if index > 0 => {
                self.cursor_id = Some(rows[index - 1].id.clone());
            }
            Some(_) => {}
            None => self.ensure_cursor(rows),
        }
    }

    /// Resets all view state, used on sign-out.
    pub fn reset(&mut self) {
        self.open_ids.clear();
        self.cursor_id = None;
    }
}

/// Flattens the tree into the rows currently visible given the open set.
///
/// Children of collapsed nodes are skipped; depth reflects nesting level.
pub fn visible_rows(tree: &[ProjectNode], view: &ExplorerViewState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for project in tree {
        let project_open = view.is_open(&project.id);
        rows.push(TreeRow {
            id: project.id.clone(),
            name: project.name.clone(),
            depth: 0,
            kind: RowKind::Project,
            expanded: project_open,
        });
        if !project_open {
            continue;
        }
        for branch in &project.children {
            let branch_open = view.is_open(&branch.id);
            rows.push(TreeRow {
                id: branch.id.clone(),
                name: branch.name.clone(),
                depth: 1,
                kind: RowKind::Branch,
                expanded: branch_open,
            });
            if !branch_open {
                continue;
            }
            for file in &branch.children {
                rows.push(TreeRow {
                    id: file.id.clone(),
                    name: file.name.clone(),
                    depth: 2,
                    kind: RowKind::File,
                    expanded: false,
                });
            }
        }
    }

    rows
}

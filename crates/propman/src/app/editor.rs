//! Editor state machine for the currently selected property file.
//!
//! States: no selection → viewing/editing. The buffer diverges from the
//! last persisted value until Save; selecting another file (or none)
//! resets the buffer from the newly selected file's content, discarding
//! unsaved edits without warning. Save is disabled while a save request is
//! pending. Export writes the buffer to a local file and never touches the
//! backend.

use std::path::{Path, PathBuf};

use crate::domain::file_type::{FileType, ensure_extension};
use crate::domain::tree::{ProjectNode, PropertyFileNode, find_file};

/// A save request handed to the orchestrator when a save begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRequest {
    pub property_id: i64,
    pub file_name: String,
    pub content: String,
}

/// Buffer and cursor state for one open file.
struct OpenFileState {
    id: String,
    name: String,
    lines: Vec<String>,
    cursor_line: usize,
    cursor_col: usize,
    dirty: bool,
    saving: bool,
    notice: Option<String>,
    notice_is_error: bool,
}

/// Owns the editing buffer and the save/export actions around it.
#[derive(Default)]
pub struct EditorManager {
    open_file: Option<OpenFileState>,
}

impl EditorManager {
    /// Opens a file, resetting the buffer from its persisted content.
    ///
    /// Any unsaved edits to the previously open file are discarded.
    pub fn open(&mut self, file: &PropertyFileNode) {
        self.open_file = Some(OpenFileState {
            id: file.id.clone(),
            name: file.name.clone(),
            lines: split_lines(&file.content),
            cursor_line: 0,
            cursor_col: 0,
            dirty: false,
            saving: false,
            notice: None,
            notice_is_error: false,
        });
    }

    /// Returns to the no-selection state.
    pub fn clear(&mut self) {
        self.open_file = None;
    }

    /// Returns whether a file is currently open.
    pub fn is_open(&self) -> bool {
        self.open_file.is_some()
    }

    /// Returns the id string of the open file.
    pub fn selected_file_id(&self) -> Option<&str> {
        self.open_file.as_ref().map(|file| file.id.as_str())
    }

    /// Returns the open file's name.
    pub fn file_name(&self) -> Option<&str> {
        self.open_file.as_ref().map(|file| file.name.as_str())
    }

    /// Returns the type inferred from the open file's name.
    pub fn file_type(&self) -> Option<FileType> {
        self.file_name().map(FileType::infer)
    }

    /// Returns the buffer lines.
    pub fn lines(&self) -> &[String] {
        self.open_file
            .as_ref()
            .map(|file| file.lines.as_slice())
            .unwrap_or_default()
    }

    /// Returns the cursor as `(line, column)` in characters.
    pub fn cursor(&self) -> (usize, usize) {
        self.open_file
            .as_ref()
            .map(|file| (file.cursor_line, file.cursor_col))
            .unwrap_or_default()
    }

    /// Returns the full buffer content.
    pub fn content(&self) -> String {
        self.lines().join("\n")
    }

    /// Returns whether the buffer diverges from the last saved value.
    pub fn is_dirty(&self) -> bool {
        self.open_file.as_ref().is_some_and(|file| file.dirty)
    }

    /// Returns whether a save request is in flight.
    pub fn is_saving(&self) -> bool {
        self.open_file.as_ref().is_some_and(|file| file.saving)
    }

    /// Returns the last save/export outcome line and whether it is an error.
    pub fn notice(&self) -> Option<(&str, bool)> {
        self.open_file
            .as_ref()
            .and_then(|file| file.notice.as_deref().map(|text| (text, file.notice_is_error)))
    }

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, character: char) {
        let Some(file) = self.open_file.as_mut() else {
            return;
        };
        let cursor_col = file.cursor_col;
        let line = current_line_mut(file);
        let index = byte_index(line, cursor_col);
        line.insert(index, character);
        file.cursor_col += 1;
        file.dirty = true;
    }

    /// Splits the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let Some(file) = self.open_file.as_mut() else {
            return;
        };
        let cursor_col = file.cursor_col;
        let line = current_line_mut(file);
        let index = byte_index(line, cursor_col);
        let tail = line.split_off(index);
        file.lines.insert(file.cursor_line + 1, tail);
        file.cursor_line += 1;
        file.cursor_col = 0;
        file.dirty = true;
    }

    /// Deletes the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        let Some(file) = self.open_file.as_mut() else {
            return;
        };
        if file.cursor_col > 0 {
            file.cursor_col -= 1;
            let cursor_col = file.cursor_col;
            let line = current_line_mut(file);
            let index = byte_index(line, cursor_col);
            line.remove(index);
            file.dirty = true;
        } else if file.cursor_line > 0 {
            let removed = file.lines.remove(file.cursor_line);
            file.cursor_line -= 1;
            let previous = current_line_mut(file);
            let new_cursor_col = previous.chars().count();
            previous.push_str(&removed);
            file.cursor_col = new_cursor_col;
            file.dirty = true;
        }
    }

    /// Moves the cursor one column left, wrapping to the previous line end.
    pub fn move_left(&mut self) {
        let Some(file) = self.open_file.as_mut() else {
            return;
        };
        if file.cursor_col > 0 {
            file.cursor_col -= 1;
        } else if file.cursor_line > 0 {
            file.cursor_line -= 1;
            file.cursor_col = line_len(file, file.cursor_line);
        }
    }

    /// Moves the cursor one column right, wrapping to the next line start.
    pub fn move_right(&mut self) {
        let Some(file) = self.open_file.as_mut() else {
            return;
        };
        if file.cursor_col < line_len(file, file.cursor_line) {
            file.cursor_col += 1;
        } else if file.cursor_line + 1 < file.lines.len() {
            file.cursor_line += 1;
            file.cursor_col = 0;
        }
    }

    /// Moves the cursor one line up, clamping the column.
    pub fn move_up(&mut self) {
        let Some(file) = self.open_file.as_mut() else {
            return;
        };
        if file.cursor_line > 0 {
            file.cursor_line -= 1;
            file.cursor_col = file.cursor_col.min(line_len(file, file.cursor_line));
        }
    }

    /// Moves the cursor one line down, clamping the column.
    pub fn move_down(&mut self) {
        let Some(file) = self.open_file.as_mut() else {
            return;
        };
        if file.cursor_line + 1 < file.lines.len() {
            file.cursor_line += 1;
            file.cursor_col = file.cursor_col.min(line_len(file, file.cursor_line));
        }
    }

    /// Marks a save as pending and returns the request to dispatch.
    ///
    /// Returns `None` when no file is open, a save is already in flight, or
    /// the node id does not parse back to a persisted identity.
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        let content = self.content();
        let file = self.open_file.as_mut()?;
        if file.saving {
            return None;
        }
        let property_id = file.id.parse::<i64>().ok()?;
        file.saving = true;
        file.notice = None;

        Some(SaveRequest {
            property_id,
            file_name: file.name.clone(),
            content,
        })
    }

    /// Applies the outcome of a pending save.
    ///
    /// On success the buffer is considered saved; on failure it stays dirty
    /// and the error is surfaced on this editor only.
    pub fn finish_save(&mut self, outcome: Result<String, String>) {
        let Some(file) = self.open_file.as_mut() else {
            return;
        };
        file.saving = false;
        match outcome {
            Ok(message) => {
                file.dirty = false;
                file.notice = Some(message);
                file.notice_is_error = false;
            }
            Err(error) => {
                file.notice = Some(error);
                file.notice_is_error = true;
            }
        }
    }

    /// Reconciles the editor with a freshly rebuilt tree.
    ///
    /// The buffer is keyed by the stable file id, so a rebuild never resets
    /// it; only a vanished file closes the editor.
    pub fn sync_after_rebuild(&mut self, tree: &[ProjectNode]) {
        let Some(file_id) = self.selected_file_id() else {
            return;
        };
        if find_file(tree, file_id).is_none() {
            self.clear();
        }
    }

    /// Writes the current buffer to `dir`, auto-appending the canonical
    /// extension for the inferred type when the name lacks one.
    ///
    /// # Errors
    /// Returns an error when no file is open or the file cannot be written.
    pub fn export(&mut self, dir: &Path) -> std::io::Result<PathBuf> {
        let content = self.content();
        let Some(file) = self.open_file.as_mut() else {
            return Err(std::io::Error::other("no file selected"));
        };
        let file_type = FileType::infer(&file.name);
        let export_name = ensure_extension(&file.name, file_type);
        let path = dir.join(export_name);
        std::fs::write(&path, content)?;
        file.notice = Some(format!(
            "exported {} ({})",
            path.display(),
            file_type.mime()
        ));
        file.notice_is_error = false;

        Ok(path)
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

fn current_line_mut(file: &mut OpenFileState) -> &mut String {
    if file.cursor_line >= file.lines.len() {
        file.cursor_line = file.lines.len().saturating_sub(1);
    }

    &mut file.lines[file.cursor_line]
}

fn line_len(file: &OpenFileState, line_index: usize) -> usize {
    file.lines
        .get(line_index)
        .map(|line| line.chars().count())
        .unwrap_or_default()
}

fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(index, _)| index)
        .unwrap_or(line.len())
}

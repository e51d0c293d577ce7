//! Collecting free-form text in the user's preferred text editor.
//!
//! This module provides functionality to:
//! - Detect the user's preferred editor from environment variables
//! - Create temporary files with content for editing
//! - Launch the external editor and wait for it to complete
//! - Read back the modified content and clean up temporary files
//! - Split edited text into a summary line and a description

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur during external editor operations.
#[derive(Debug, Error)]
pub enum ExternalEditorError {
    /// Failed to create the temporary file.
    #[error("Failed to create temporary file: {0}")]
    TempFileCreation(#[source] io::Error),

    /// Failed to spawn the editor process.
    #[error("Failed to launch editor '{editor}': {source}")]
    EditorSpawn {
        editor: String,
        #[source]
        source: io::Error,
    },

    /// Editor exited with a non-zero status code.
    #[error("Editor exited with status code {0}")]
    EditorExecution(i32),

    /// Editor was terminated by a signal.
    #[error("Editor was terminated by a signal")]
    EditorTerminated,

    /// Failed to read content back from the temporary file.
    #[error("Failed to read content from temporary file: {0}")]
    ContentRead(#[source] io::Error),
}

/// External editor utility for launching text editors with temporary files.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    /// The editor command to use.
    editor: String,
}

impl ExternalEditor {
    /// Create a new external editor instance.
    ///
    /// Detects the editor from `$EDITOR`, then `$VISUAL`, falling back to `vi`.
    pub fn new() -> Self {
        Self {
            editor: get_editor(),
        }
    }

    /// Create an external editor instance with a specific editor command.
    pub fn with_editor(editor: impl Into<String>) -> Self {
        Self {
            editor: editor.into(),
        }
    }

    /// Get the editor command that will be used.
    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Open `content` in the editor and return what was saved.
    ///
    /// `label` names the temporary file so it is recognisable in the editor.
    /// The file is removed afterwards, even if the editor failed.
    pub fn edit(&self, label: &str, content: &str) -> Result<String, ExternalEditorError> {
        let temp_file = create_temp_file(label, content)?;

        let result = self.launch_editor(temp_file.path());
        let read_result = read_and_cleanup(temp_file);

        result?;
        read_result
    }

    fn launch_editor(&self, path: &Path) -> Result<(), ExternalEditorError> {
        let status = Command::new(&self.editor).arg(path).status().map_err(|e| {
            ExternalEditorError::EditorSpawn {
                editor: self.editor.clone(),
                source: e,
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            match status.code() {
                Some(code) => Err(ExternalEditorError::EditorExecution(code)),
                None => Err(ExternalEditorError::EditorTerminated),
            }
        }
    }
}

impl Default for ExternalEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the user's preferred editor from environment variables.
pub fn get_editor() -> String {
    env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string())
}

/// Split edited text into a summary (first line) and description (the rest).
///
/// Every description line keeps a trailing newline.
pub fn split_summary_description(text: &str) -> (String, String) {
    let mut lines = text.lines();
    let summary = lines.next().unwrap_or_default().to_string();

    let mut description = String::new();
    for line in lines {
        description.push_str(line);
        description.push('\n');
    }

    (summary, description)
}

/// Join a summary and description back into editable text.
pub fn join_summary_description(summary: &str, description: &str) -> String {
    format!("{}\n{}", summary, description)
}

/// Create a fresh `jiwa-{label}-XXXXXX.md` in the system temp directory.
///
/// The random suffix and exclusive creation keep other users from planting
/// a file or symlink at the path first.
fn create_temp_file(label: &str, content: &str) -> Result<NamedTempFile, ExternalEditorError> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("jiwa-{}-", label))
        .suffix(".md")
        .tempfile()
        .map_err(ExternalEditorError::TempFileCreation)?;

    file.write_all(content.as_bytes())
        .map_err(ExternalEditorError::TempFileCreation)?;
    file.flush().map_err(ExternalEditorError::TempFileCreation)?;

    Ok(file)
}

/// Read content back by path and remove the temporary file.
///
/// The path is re-read because some editors replace the file on save.
/// Failing to remove the file is logged, not returned.
fn read_and_cleanup(file: NamedTempFile) -> Result<String, ExternalEditorError> {
    let content = fs::read_to_string(file.path()).map_err(ExternalEditorError::ContentRead)?;

    let path = file.path().to_path_buf();
    if let Err(e) = file.close() {
        tracing::warn!("Failed to clean up temporary file {:?}: {}", path, e);
    }

    Ok(content)
}

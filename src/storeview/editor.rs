use crate::commands::edit::EditSession;
use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(StoreError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait"
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(editor.as_str());
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| StoreError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(StoreError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(StoreError::Io)
}

/// Lets the user edit a session's text and returns the new text.
pub fn edit_value(session: &EditSession) -> Result<String> {
    let temp_file = env::temp_dir().join(format!(
        "storeview_edit_{}{}",
        std::process::id(),
        session.file_ext()
    ));

    fs::write(&temp_file, &session.text).map_err(StoreError::Io)?;
    let edited = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(strip_final_newline(&session.text, &edited?))
}

/// Editors append a newline on save; drop it unless the original had one.
fn strip_final_newline(original: &str, edited: &str) -> String {
    if original.ends_with('\n') {
        return edited.to_string();
    }
    edited
        .strip_suffix("\r\n")
        .or_else(|| edited.strip_suffix('\n'))
        .unwrap_or(edited)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_editor_added_newline() {
        assert_eq!(strip_final_newline("abc", "abc\n"), "abc");
        assert_eq!(strip_final_newline("abc", "abc\r\n"), "abc");
        assert_eq!(strip_final_newline("abc", "abd"), "abd");
    }

    #[test]
    fn keeps_newline_the_value_already_had() {
        assert_eq!(strip_final_newline("abc\n", "abc\n"), "abc\n");
    }

    #[test]
    fn only_one_newline_is_dropped() {
        assert_eq!(strip_final_newline("a", "a\n\n"), "a\n");
    }
}

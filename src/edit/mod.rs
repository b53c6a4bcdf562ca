//! Mutating file operations: write, exact-string edit, delete, move.
//!
//! Every target is confined through the workspace guard before any I/O.
//! Concurrent writers get no cross-request atomicity; callers are assumed
//! single-threaded per workspace at the granularity of one request.

use std::fs;

use log::Level;

use crate::error::{Result, WorkspaceError};
use crate::telemetry::{LogMessage, log_with_context};
use crate::workspace::WorkspaceRoot;

/// Writes `content` to `file_path`, creating parent directories as needed.
/// An existing file is overwritten.
pub fn write_file(root: &WorkspaceRoot, file_path: &str, content: &str) -> Result<()> {
    let target = root.resolve(file_path)?;
    log_with_context(
        Level::Info,
        LogMessage {
            message: "Write".to_string(),
            module: "edit",
            context: Some(vec![("file_path", file_path.to_string())]),
        },
    );
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, content)?;
    Ok(())
}

/// Replaces an exact string in a file and returns how many occurrences were
/// replaced.
///
/// Without `replace_all`, `old_string` must occur exactly once: zero
/// occurrences and ambiguous (multiple) occurrences are both
/// [`WorkspaceError::EditConflict`], the latter naming the count so the
/// caller can disambiguate with more surrounding context.
pub fn edit_file(
    root: &WorkspaceRoot,
    file_path: &str,
    old_string: &str,
    new_string: &str,
    replace_all: bool,
) -> Result<usize> {
    let target = root.resolve(file_path)?;
    if !target.exists() {
        return Err(WorkspaceError::NotFound(file_path.to_string()));
    }
    if !target.is_file() {
        return Err(WorkspaceError::NotAFile(file_path.to_string()));
    }

    let bytes = fs::read(&target)?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    let count = content.matches(old_string).count();

    if count == 0 {
        return Err(WorkspaceError::EditConflict(
            "old_string not found in file".to_string(),
        ));
    }
    if !replace_all && count > 1 {
        return Err(WorkspaceError::EditConflict(format!(
            "old_string matches {count} locations, must be unique (or pass replace_all=true to replace all)"
        )));
    }

    let new_content = if replace_all {
        content.replace(old_string, new_string)
    } else {
        content.replacen(old_string, new_string, 1)
    };
    fs::write(&target, new_content)?;
    Ok(if replace_all { count } else { 1 })
}

/// Deletes a file, or a directory with everything under it.
pub fn delete_path(root: &WorkspaceRoot, path: &str) -> Result<()> {
    let target = root.resolve(path)?;
    log_with_context(
        Level::Info,
        LogMessage {
            message: "Delete".to_string(),
            module: "edit",
            context: Some(vec![("path", path.to_string())]),
        },
    );
    if !target.exists() {
        return Err(WorkspaceError::NotFound(path.to_string()));
    }
    if target.is_dir() {
        fs::remove_dir_all(&target)?;
    } else {
        fs::remove_file(&target)?;
    }
    Ok(())
}

/// Moves a file or directory within the workspace, creating the
/// destination's parent directories as needed.
pub fn move_path(root: &WorkspaceRoot, source: &str, destination: &str) -> Result<()> {
    let src = root.resolve(source)?;
    let dst = root.resolve(destination)?;
    if !src.exists() {
        return Err(WorkspaceError::NotFound(source.to_string()));
    }
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(&src, &dst)?;
    Ok(())
}

#[cfg(test)]
mod tests;

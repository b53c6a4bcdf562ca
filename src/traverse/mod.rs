//! Directory listing and glob-based file listing.

use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkspaceError};
use crate::fileset::collect_files;
use crate::workspace::WorkspaceRoot;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of a non-recursive directory listing.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DirEntryInfo {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Byte size for files; directories carry no size.
    pub size: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DirectoryListing {
    /// Listed directory, relative to the workspace root.
    pub path: String,
    pub entries: Vec<DirEntryInfo>,
}

/// Lists the immediate entries of a workspace directory, sorted by name.
pub fn list_directory(root: &WorkspaceRoot, path: &str) -> Result<DirectoryListing> {
    let target = root.resolve(path)?;
    if !target.exists() {
        return Err(WorkspaceError::NotFound(path.to_string()));
    }
    if !target.is_dir() {
        return Err(WorkspaceError::NotADirectory(path.to_string()));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(&target)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let metadata = entry.metadata()?;
        if metadata.is_dir() {
            entries.push(DirEntryInfo {
                name,
                kind: EntryKind::Directory,
                size: None,
            });
        } else {
            entries.push(DirEntryInfo {
                name,
                kind: EntryKind::File,
                size: Some(metadata.len()),
            });
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(DirectoryListing {
        path: root.relative_display(&target),
        entries,
    })
}

/// Lists workspace files matching a glob, newest first, as paths relative to
/// the workspace root.
///
/// `path` narrows the listing to a base directory (empty means the root);
/// the glob is applied relative to that base while the returned paths stay
/// root-relative.
pub fn glob_files(root: &WorkspaceRoot, pattern: &str, path: &str) -> Result<Vec<String>> {
    let base = root.resolve(path)?;
    if !base.is_dir() {
        return Err(WorkspaceError::NotADirectory(path.to_string()));
    }
    let files = collect_files(&base, pattern)?;
    Ok(files
        .iter()
        .map(|file| root.relative_display(file))
        .collect())
}

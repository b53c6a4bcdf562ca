//! Candidate file collection for search and glob listings.
//!
//! Given a base directory and an optional glob filter, produces the ordered
//! list of regular files a scan will visit. The list is rebuilt on every
//! call; nothing is cached between requests.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use globset::GlobBuilder;
use ignore::WalkBuilder;
use log::Level;

use crate::error::{Result, WorkspaceError};
use crate::telemetry::{LogMessage, log_with_context};

/// Collects regular files under `base` matching `glob_filter`, newest
/// modification time first.
///
/// An empty filter means every file at any depth (`**/*`). The glob is
/// matched against paths relative to `base`, with `*` stopping at directory
/// separators, so `*.py` selects top-level files only while `**/*.py`
/// recurses. Directories and unreadable entries are skipped. Ties in
/// modification time keep the traversal order of the walk.
///
/// Fails with [`WorkspaceError::InvalidPattern`] on malformed glob syntax,
/// before touching the filesystem.
pub fn collect_files(base: &Path, glob_filter: &str) -> Result<Vec<PathBuf>> {
    let pattern = if glob_filter.is_empty() {
        "**/*"
    } else {
        glob_filter
    };
    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| WorkspaceError::InvalidPattern(e.to_string()))?
        .compile_matcher();

    // Walk everything: the collector has no ignore-file semantics, hidden
    // files included, exactly like globbing the directory by hand.
    let mut builder = WalkBuilder::new(base);
    builder
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_exclude(false)
        .git_global(false);

    let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log_with_context(
                    Level::Warn,
                    LogMessage {
                        message: format!("Error walking directory: {}", err),
                        module: "fileset",
                        context: Some(vec![("base", base.display().to_string())]),
                    },
                );
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let relative = path.strip_prefix(base).unwrap_or(path);
        if !matcher.is_match(relative) {
            continue;
        }
        let mtime = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(UNIX_EPOCH);
        files.push((mtime, path.to_path_buf()));
    }

    // Stable sort: equal mtimes stay in traversal order.
    files.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests;

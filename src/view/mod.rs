//! Line-numbered file viewing.
//!
//! [`format_numbered`] is the one formatter for numbered text in the crate:
//! whole or partial file reads and historical file content
//! ([`crate::git::show`]) must render identically for identical input.

use std::fs;

use crate::error::{Result, WorkspaceError};
use crate::workspace::WorkspaceRoot;

/// Configuration options for reading a file.
pub struct ViewOptions {
    /// 1-based line to start reading from.
    pub offset: usize,

    /// Maximum number of lines to read; 0 means all remaining.
    pub limit: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            offset: 1,
            limit: 0,
        }
    }
}

/// Renders lines with fixed-width, right-aligned 1-based line numbers.
///
/// Each line keeps its own trailing newline (or lack of one, for the last
/// line of a file), so concatenation reproduces the numbered text verbatim.
pub fn format_numbered<S: AsRef<str>>(lines: &[S], start_line: usize) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&format!("{:>6}\u{2192}{}", start_line + i, line.as_ref()));
    }
    out
}

/// Reads a slice of a file as numbered text.
///
/// Invalid UTF-8 byte sequences are replaced rather than failing the read.
/// Selecting past the end of the file returns an explanatory placeholder
/// instead of empty output, so a caller paging through a file can tell the
/// difference between a blank region and running off the end.
pub fn read_file(root: &WorkspaceRoot, file_path: &str, options: &ViewOptions) -> Result<String> {
    let target = root.resolve(file_path)?;
    if !target.exists() {
        return Err(WorkspaceError::NotFound(file_path.to_string()));
    }
    if !target.is_file() {
        return Err(WorkspaceError::NotAFile(file_path.to_string()));
    }

    let bytes = fs::read(&target)?;
    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let total = lines.len();

    let start = options.offset.saturating_sub(1);
    let end = if options.limit > 0 {
        (start + options.limit).min(total)
    } else {
        total
    };
    let selected = if start >= total {
        &[] as &[&str]
    } else {
        &lines[start..end]
    };

    if selected.is_empty() {
        return Ok(format!(
            "(empty — file has {total} lines, offset={})",
            options.offset
        ));
    }
    Ok(format_numbered(selected, options.offset))
}

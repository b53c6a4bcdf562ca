//! Regex content search across a confined file set.
//!
//! A search resolves its root through the workspace guard, collects candidate
//! files once, compiles the pattern once, and renders one of three output
//! modes as a single text blob. Nothing is indexed or cached; every call
//! re-scans the matching files.

use std::fs;
use std::path::PathBuf;

use log::Level;
use regex::{Regex, RegexBuilder};

use crate::error::{Result, WorkspaceError};
use crate::fileset::collect_files;
use crate::telemetry::{LogMessage, log_with_context};
use crate::workspace::WorkspaceRoot;

mod context;
use context::group_context;

/// How search results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One workspace-relative path per file with at least one match.
    FilesWithMatches,
    /// `path:count` per file with a nonzero number of matches.
    Count,
    /// Matched lines with surrounding context, grep-style.
    Content,
}

/// Configuration options for a search call.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Root-relative file or directory to search; empty means the whole
    /// workspace.
    pub path: String,

    /// Glob filter applied to candidate files; empty means every file.
    pub glob: String,

    pub output_mode: OutputMode,

    /// Symmetric context lines around each match (content mode).
    pub context: usize,

    /// Context lines before each match; the effective value is the maximum
    /// of this and `context`.
    pub context_before: usize,

    /// Context lines after each match; the effective value is the maximum
    /// of this and `context`.
    pub context_after: usize,

    pub case_insensitive: bool,

    /// Whether content-mode lines carry a 1-based line number segment.
    pub line_numbers: bool,

    /// Cap on result entries; 0 means unlimited.
    pub head_limit: usize,

    /// Lets the pattern span line boundaries: enables both
    /// dot-matches-newline and `^`/`$` at internal line breaks. The two
    /// behaviors are coupled on purpose to match what callers expect from
    /// the flag.
    pub multiline: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            path: String::new(),
            glob: String::new(),
            output_mode: OutputMode::FilesWithMatches,
            context: 0,
            context_before: 0,
            context_after: 0,
            case_insensitive: false,
            line_numbers: true,
            head_limit: 0,
            multiline: false,
        }
    }
}

/// Compiles the search pattern with the requested flag semantics.
///
/// Compilation happens exactly once per search call, before any file is
/// read; malformed patterns surface the regex engine's diagnostic.
fn compile_pattern(pattern: &str, case_insensitive: bool, multiline: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .multi_line(multiline)
        .dot_matches_new_line(multiline)
        .build()
        .map_err(|e| WorkspaceError::InvalidPattern(e.to_string()))
}

/// Searches for `pattern` under the workspace per `options` and returns the
/// rendered result blob.
///
/// A structural problem (escaping path, malformed regex or glob) aborts the
/// call before any file is read. A file that cannot be read mid-scan is
/// skipped with a warning and never fails the search. A search root that
/// does not exist simply matches nothing.
pub fn search(root: &WorkspaceRoot, pattern: &str, options: &SearchOptions) -> Result<String> {
    let target = if options.path.is_empty() {
        root.path().to_path_buf()
    } else {
        root.resolve(&options.path)?
    };

    let compiled = compile_pattern(pattern, options.case_insensitive, options.multiline)?;

    // A single-file target short-circuits collection entirely.
    let files = if target.is_file() {
        vec![target]
    } else {
        collect_files(&target, &options.glob)?
    };

    match options.output_mode {
        OutputMode::FilesWithMatches => files_with_matches(root, &compiled, &files, options),
        OutputMode::Count => count_matches(root, &compiled, &files, options),
        OutputMode::Content => render_content(root, &compiled, &files, options),
    }
}

/// Reads a candidate as text, replacing invalid byte sequences. `None`
/// means the file could not be read and the scan should move on.
fn read_candidate(path: &PathBuf) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            log_with_context(
                Level::Warn,
                LogMessage {
                    message: format!("Skipping unreadable file: {}", e),
                    module: "search",
                    context: Some(vec![("file_path", path.display().to_string())]),
                },
            );
            None
        }
    }
}

fn files_with_matches(
    root: &WorkspaceRoot,
    compiled: &Regex,
    files: &[PathBuf],
    options: &SearchOptions,
) -> Result<String> {
    let mut hits: Vec<String> = Vec::new();
    for file in files {
        if let Some(text) = read_candidate(file) {
            if compiled.is_match(&text) {
                hits.push(root.relative_display(file));
            }
        }
        if options.head_limit > 0 && hits.len() >= options.head_limit {
            break;
        }
    }
    Ok(hits.join("\n"))
}

fn count_matches(
    root: &WorkspaceRoot,
    compiled: &Regex,
    files: &[PathBuf],
    options: &SearchOptions,
) -> Result<String> {
    let mut lines_out: Vec<String> = Vec::new();
    for file in files {
        let Some(text) = read_candidate(file) else {
            continue;
        };
        let count = compiled.find_iter(&text).count();
        if count > 0 {
            lines_out.push(format!("{}:{}", root.relative_display(file), count));
        }
    }
    // The cap applies to the finished list, after every file was counted.
    if options.head_limit > 0 {
        lines_out.truncate(options.head_limit);
    }
    Ok(lines_out.join("\n"))
}

fn render_content(
    root: &WorkspaceRoot,
    compiled: &Regex,
    files: &[PathBuf],
    options: &SearchOptions,
) -> Result<String> {
    let before = options.context.max(options.context_before);
    let after = options.context.max(options.context_after);

    let mut output_lines: Vec<String> = Vec::new();
    for file in files {
        let Some(text) = read_candidate(file) else {
            continue;
        };
        let lines: Vec<&str> = text.lines().collect();

        // Line indexing is per physical line even when the compiled pattern
        // itself carries multiline semantics.
        let match_indices: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| compiled.is_match(line))
            .map(|(idx, _)| idx)
            .collect();
        if match_indices.is_empty() {
            continue;
        }

        let groups = group_context(lines.len(), &match_indices, before, after);
        let relative = root.relative_display(file);

        for group in &groups {
            // One separator before every group except the first overall,
            // which also separates the output of consecutive files.
            if !output_lines.is_empty() {
                output_lines.push("--".to_string());
            }
            for &idx in group {
                let is_match = match_indices.binary_search(&idx).is_ok();
                let sep = if is_match { ':' } else { '-' };
                if options.line_numbers {
                    output_lines.push(format!("{relative}{sep}{}{sep}{}", idx + 1, lines[idx]));
                } else {
                    output_lines.push(format!("{relative}{sep}{}", lines[idx]));
                }
            }
        }

        if options.head_limit > 0 && output_lines.len() >= options.head_limit {
            output_lines.truncate(options.head_limit);
            break;
        }
    }
    Ok(output_lines.join("\n"))
}

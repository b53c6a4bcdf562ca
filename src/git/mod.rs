//! Pass-through wrapper around the external `git` executable.
//!
//! Every operation here is argument assembly plus stderr surfacing; git owns
//! the semantics. Calls run in whatever workspace directory the caller
//! resolved (the default root or a session worktree). Timeouts are the
//! transport's job, not handled here.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkspaceError};
use crate::view::format_numbered;

/// Runs `git <args>` in `workspace` and returns stdout.
///
/// A nonzero exit surfaces trimmed stderr in the error detail, falling back
/// to the exit code when git printed nothing. A missing git binary is
/// reported under the same error kind.
pub fn run_git<I, S>(workspace: &Path, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<_> = args.into_iter().collect();
    let command_name = args
        .first()
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .unwrap_or_default();

    let output = Command::new("git")
        .args(&args)
        .current_dir(workspace)
        .output()
        .map_err(|e| WorkspaceError::Git {
            command: command_name.clone(),
            detail: if e.kind() == std::io::ErrorKind::NotFound {
                "git executable not found".to_string()
            } else {
                e.to_string()
            },
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(WorkspaceError::Git {
            command: command_name,
            detail: if stderr.is_empty() {
                format!("exit {}", output.status.code().unwrap_or(-1))
            } else {
                stderr
            },
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// One changed path from porcelain status. `xy` is the two-letter
/// index/worktree state code.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusEntry {
    pub xy: String,
    pub path: String,

    /// Original path for renames.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_path: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GitStatus {
    pub files: Vec<StatusEntry>,
    pub summary: String,
}

/// Working tree status: staged, unstaged, and untracked files.
pub fn status(workspace: &Path) -> Result<GitStatus> {
    let raw = run_git(workspace, ["status", "--porcelain=v1", "--untracked-files=all"])?;
    let mut files = Vec::new();
    for line in raw.lines() {
        if line.is_empty() {
            continue;
        }
        let (xy, path) = line.split_at(2.min(line.len()));
        let path = path.strip_prefix(' ').unwrap_or(path);
        if let Some((old, new)) = path.split_once(" -> ") {
            files.push(StatusEntry {
                xy: xy.to_string(),
                path: new.to_string(),
                orig_path: Some(old.to_string()),
            });
        } else {
            files.push(StatusEntry {
                xy: xy.to_string(),
                path: path.to_string(),
                orig_path: None,
            });
        }
    }
    let summary = run_git(workspace, ["status", "--short"])?;
    Ok(GitStatus { files, summary })
}

#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Restrict the diff to this file or directory.
    pub path: String,

    /// Ref to diff against, e.g. `HEAD`, a branch, or a hash.
    pub r#ref: String,

    /// Show staged (indexed) changes.
    pub staged: bool,

    /// Diffstat summary instead of the full patch.
    pub stat: bool,
}

/// Unified diff of the working tree or the staged area.
pub fn diff(workspace: &Path, options: &DiffOptions) -> Result<String> {
    let mut args = vec!["diff".to_string()];
    if options.stat {
        args.push("--stat".to_string());
    }
    if options.staged {
        args.push("--staged".to_string());
    }
    if !options.r#ref.is_empty() {
        args.push(options.r#ref.clone());
    }
    if !options.path.is_empty() {
        args.push("--".to_string());
        args.push(options.path.clone());
    }
    run_git(workspace, args)
}

/// Diff introduced by one commit, against its first parent.
pub fn diff_commit(workspace: &Path, commit_hash: &str) -> Result<String> {
    let parent = format!("{commit_hash}^");
    run_git(workspace, ["diff", parent.as_str(), commit_hash])
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub subject: String,
}

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub max_count: usize,
    pub path: String,
    pub r#ref: String,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            max_count: 20,
            path: String::new(),
            r#ref: "HEAD".to_string(),
        }
    }
}

fn log_args(options: &LogOptions, format: &str) -> Vec<String> {
    let mut args = vec![
        "log".to_string(),
        format.to_string(),
        format!("--max-count={}", options.max_count),
        options.r#ref.clone(),
    ];
    if !options.path.is_empty() {
        args.push("--".to_string());
        args.push(options.path.clone());
    }
    args
}

/// Commit history parsed into hash, author, date, and subject.
pub fn log(workspace: &Path, options: &LogOptions) -> Result<Vec<Commit>> {
    let raw = run_git(
        workspace,
        log_args(options, "--pretty=format:%H%x09%an%x09%ai%x09%s"),
    )?;
    let mut commits = Vec::new();
    for line in raw.lines() {
        let parts: Vec<&str> = line.splitn(4, '\t').collect();
        if let [hash, author, date, subject] = parts[..] {
            commits.push(Commit {
                hash: hash.to_string(),
                author: author.to_string(),
                date: date.to_string(),
                subject: subject.to_string(),
            });
        }
    }
    Ok(commits)
}

/// Compact one-line-per-commit history, raw.
pub fn log_oneline(workspace: &Path, options: &LogOptions) -> Result<String> {
    run_git(workspace, log_args(options, "--oneline"))
}

/// Files tracked at `ref` under `path`, plus untracked and staged-new paths
/// from the working tree, sorted. Either half failing (e.g. an unborn HEAD)
/// contributes nothing rather than failing the call.
pub fn tree(workspace: &Path, path: &str, r#ref: &str, recursive: bool) -> Result<Vec<String>> {
    let prefix = path.trim_start_matches('/');

    let mut files: Vec<String> = Vec::new();
    let mut args = vec!["ls-tree", "--name-only"];
    if recursive {
        args.push("-r");
    }
    args.push(r#ref);
    if !prefix.is_empty() {
        args.push(prefix);
    }
    if let Ok(raw) = run_git(workspace, args) {
        files.extend(raw.lines().filter(|l| !l.is_empty()).map(str::to_string));
    }

    if let Ok(raw) = run_git(workspace, ["status", "--porcelain=v1", "--untracked-files=all"]) {
        for line in raw.lines() {
            if line.len() < 3 {
                continue;
            }
            let xy = &line[..2];
            let file_path = line[3..].rsplit(" -> ").next().unwrap_or(&line[3..]);
            if (xy == "??" || xy == "A ")
                && !files.iter().any(|f| f == file_path)
                && (prefix.is_empty() || file_path.starts_with(prefix))
            {
                files.push(file_path.to_string());
            }
        }
    }

    files.sort_unstable();
    files.dedup();
    Ok(files)
}

/// Content of a file as it exists at a git ref, optionally rendered through
/// the same numbered formatter file reads use.
pub fn show(workspace: &Path, path: &str, r#ref: &str, line_numbers: bool) -> Result<String> {
    let spec = format!("{}:{}", r#ref, path.trim_start_matches('/'));
    let content = run_git(workspace, ["show", spec.as_str()])?;
    if !line_numbers {
        return Ok(content);
    }
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    Ok(format_numbered(&lines, 1))
}

/// Which commit and author last modified each line of a file, raw.
pub fn blame(workspace: &Path, path: &str, r#ref: &str) -> Result<String> {
    run_git(workspace, ["blame", r#ref, "--", path.trim_start_matches('/')])
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Branch {
    pub name: String,
    pub hash: String,
    pub subject: String,
    pub current: bool,
}

/// Splits one whitespace-delimited token off the front of `s`.
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

/// Local (and optionally remote-tracking) branches with their latest commit.
pub fn branches(workspace: &Path, all: bool) -> Result<Vec<Branch>> {
    let mut args = vec!["branch", "-v"];
    if all {
        args.push("-a");
    }
    let raw = run_git(workspace, args)?;
    let mut branches = Vec::new();
    for line in raw.lines() {
        let current = line.starts_with('*');
        let rest = line.trim_start_matches(['*', ' ']);
        let (name, rest) = split_token(rest);
        let (hash, subject) = split_token(rest);
        branches.push(Branch {
            name: name.to_string(),
            hash: hash.to_string(),
            subject: subject.to_string(),
            current,
        });
    }
    Ok(branches)
}

/// Stages paths for the next commit; empty means everything (`.`).
pub fn add(workspace: &Path, paths: &[String]) -> Result<String> {
    let mut args = vec!["add".to_string()];
    if paths.is_empty() {
        args.push(".".to_string());
    } else {
        args.extend(paths.iter().cloned());
    }
    run_git(workspace, args)
}

/// Creates a commit from the staged changes.
pub fn commit(workspace: &Path, message: &str, author: &str) -> Result<String> {
    let mut args = vec!["commit", "-m", message];
    if !author.is_empty() {
        args.push("--author");
        args.push(author);
    }
    run_git(workspace, args)
}

/// Switches to a branch or commit, optionally creating a new branch.
pub fn checkout(workspace: &Path, r#ref: &str, create: bool) -> Result<String> {
    let mut args = vec!["checkout"];
    if create {
        args.push("-b");
    }
    args.push(r#ref);
    run_git(workspace, args)
}

/// Pushes to a remote; `force` uses `--force-with-lease`.
pub fn push(workspace: &Path, remote: &str, branch: &str, force: bool) -> Result<String> {
    let mut args = vec!["push"];
    if force {
        args.push("--force-with-lease");
    }
    args.push(remote);
    if !branch.is_empty() {
        args.push(branch);
    }
    run_git(workspace, args)
}

/// Pulls and merges from a remote.
pub fn pull(workspace: &Path, remote: &str, branch: &str) -> Result<String> {
    let mut args = vec!["pull", remote];
    if !branch.is_empty() {
        args.push(branch);
    }
    run_git(workspace, args)
}

/// Fetches from a remote without merging.
pub fn fetch(workspace: &Path, remote: &str, prune: bool) -> Result<String> {
    let mut args = vec!["fetch", remote];
    if prune {
        args.push("--prune");
    }
    run_git(workspace, args)
}

/// Saves or restores stashed changes. `action` is push, pop, list, or drop.
pub fn stash(workspace: &Path, action: &str, message: &str) -> Result<String> {
    let mut args = vec!["stash", action];
    if action == "push" && !message.is_empty() {
        args.push("-m");
        args.push(message);
    }
    run_git(workspace, args)
}

/// Resets HEAD, or unstages specific paths when `paths` is nonempty (the
/// mode is ignored in that form).
pub fn reset(workspace: &Path, r#ref: &str, mode: &str, paths: &[String]) -> Result<String> {
    let args: Vec<String> = if paths.is_empty() {
        vec!["reset".to_string(), format!("--{mode}"), r#ref.to_string()]
    } else {
        let mut args = vec!["reset".to_string(), r#ref.to_string(), "--".to_string()];
        args.extend(paths.iter().cloned());
        args
    };
    run_git(workspace, args)
}

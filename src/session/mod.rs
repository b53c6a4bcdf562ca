//! Session-scoped workspaces backed by git worktrees.
//!
//! A session maps an identifier to its own worktree directory so concurrent
//! callers can work on separate branches of the same repository. The store
//! is an explicit value owned by whoever serves requests; there is no
//! process-global session table.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::Level;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, WorkspaceError};
use crate::git::run_git;
use crate::telemetry::{LogMessage, log_with_context};
use crate::workspace::WorkspaceRoot;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Session {
    pub id: String,
    pub branch: String,
    pub user_name: String,
    pub worktree_path: PathBuf,
    pub created_at: DateTime<Utc>,
}

/// In-memory session registry for one serving process.
///
/// Owns the default workspace root (the repository itself) and the directory
/// worktrees are allocated under. Sessions live exactly as long as the
/// store; nothing is persisted.
pub struct SessionStore {
    root: WorkspaceRoot,
    sessions_dir: PathBuf,
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new(root: WorkspaceRoot, sessions_dir: PathBuf) -> Self {
        Self {
            root,
            sessions_dir,
            sessions: HashMap::new(),
        }
    }

    /// Allocates a worktree for `branch` and registers a session for it.
    ///
    /// With `create_branch`, a new branch is created at `start_point` (or
    /// HEAD when empty); otherwise `branch` must already exist. The
    /// worktree directory is named after the generated session id.
    pub fn create(
        &mut self,
        branch: &str,
        user_name: &str,
        create_branch: bool,
        start_point: &str,
    ) -> Result<&Session> {
        let id = Uuid::new_v4().to_string();
        let worktree_path = self.sessions_dir.join(&id);
        fs::create_dir_all(&self.sessions_dir)?;

        let worktree = worktree_path.display().to_string();
        let mut args: Vec<&str> = vec!["worktree", "add"];
        if create_branch {
            args.extend(["-b", branch, worktree.as_str()]);
            if !start_point.is_empty() {
                args.push(start_point);
            }
        } else {
            args.extend([worktree.as_str(), branch]);
        }
        run_git(self.root.path(), args)?;

        let session = Session {
            id: id.clone(),
            branch: branch.to_string(),
            user_name: user_name.to_string(),
            worktree_path,
            created_at: Utc::now(),
        };
        Ok(self.sessions.entry(id).or_insert(session))
    }

    pub fn get(&self, session_id: &str) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn list(&self) -> Vec<&Session> {
        self.sessions.values().collect()
    }

    /// Drops a session and removes its worktree. Returns false for an
    /// unknown id. A failing worktree removal is logged and tolerated; the
    /// session is forgotten either way.
    pub fn delete(&mut self, session_id: &str) -> bool {
        let Some(session) = self.sessions.remove(session_id) else {
            return false;
        };
        let worktree = session.worktree_path.display().to_string();
        if let Err(e) = run_git(self.root.path(), [
            "worktree",
            "remove",
            "--force",
            worktree.as_str(),
        ]) {
            log_with_context(
                Level::Warn,
                LogMessage {
                    message: format!("Failed to remove worktree: {}", e),
                    module: "session",
                    context: Some(vec![("session_id", session_id.to_string())]),
                },
            );
        }
        true
    }

    /// Resolves the active workspace for a request: the worktree of the
    /// named session, or the default root when no session is given.
    pub fn workspace_for(&self, session_id: Option<&str>) -> Result<WorkspaceRoot> {
        match session_id {
            None => Ok(self.root.clone()),
            Some(id) => {
                let session = self
                    .sessions
                    .get(id)
                    .ok_or_else(|| WorkspaceError::SessionNotFound(id.to_string()))?;
                WorkspaceRoot::new(&session.worktree_path)
            }
        }
    }
}

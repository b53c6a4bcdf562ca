//! # Workroom
//!
//! Workroom exposes a workspace directory as the file and search primitives
//! a remote coding tool needs: confined reads, writes, and edits, glob and
//! directory listings, regex content search with grep-style context, and a
//! pass-through git porcelain.
//!
//! Every operation takes workspace-relative paths and proves the resolved
//! target stays inside the configured root before touching the filesystem.

/// Closed error taxonomy and crate-wide Result alias
pub mod error;
/// Workspace root configuration and path confinement
pub mod workspace;
/// Candidate file collection for search and glob listings
pub mod fileset;
/// Regex content search with three output modes
pub mod search;
/// Line-numbered file viewing
pub mod view;
/// Mutating file operations: write, edit, delete, move
pub mod edit;
/// Directory and glob listings
pub mod traverse;
/// Pass-through wrapper around the git executable
pub mod git;
/// Worktree-backed per-session workspaces
pub mod session;
/// Logging setup and structured log helpers
pub mod telemetry;

pub use error::{Result, WorkspaceError};
pub use workspace::WorkspaceRoot;

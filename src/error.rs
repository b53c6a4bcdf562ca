//! Error taxonomy shared by every workspace operation.
//!
//! The enum is closed on purpose: a transport in front of this crate maps
//! each kind onto a status code, so new failure shapes must show up here
//! rather than as ad-hoc strings.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// The resolved path is not the workspace root or a descendant of it.
    #[error("path '{0}' escapes the workspace root")]
    OutOfBoundsPath(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a file: {0}")]
    NotAFile(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Malformed regex or glob, rejected before any file is scanned.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// An exact-string edit could not be applied unambiguously.
    #[error("{0}")]
    EditConflict(String),

    /// A git invocation exited nonzero or could not be spawned; `detail`
    /// carries stderr when the process produced any.
    #[error("git {command} failed: {detail}")]
    Git { command: String, detail: String },

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WorkspaceError {
    /// Machine-readable kind, stable across detail-message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            WorkspaceError::OutOfBoundsPath(_) => "out_of_bounds_path",
            WorkspaceError::NotFound(_) => "not_found",
            WorkspaceError::NotAFile(_) => "not_a_file",
            WorkspaceError::NotADirectory(_) => "not_a_directory",
            WorkspaceError::InvalidPattern(_) => "invalid_pattern",
            WorkspaceError::EditConflict(_) => "edit_conflict",
            WorkspaceError::Git { .. } => "git",
            WorkspaceError::SessionNotFound(_) => "session_not_found",
            WorkspaceError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_stable_per_variant() {
        assert_eq!(
            WorkspaceError::OutOfBoundsPath("x".into()).kind(),
            "out_of_bounds_path"
        );
        assert_eq!(WorkspaceError::NotFound("x".into()).kind(), "not_found");
        assert_eq!(
            WorkspaceError::Git {
                command: "status".into(),
                detail: "boom".into()
            }
            .kind(),
            "git"
        );
    }

    #[test]
    fn git_error_display_names_the_subcommand() {
        let err = WorkspaceError::Git {
            command: "push".into(),
            detail: "rejected".into(),
        };
        assert_eq!(err.to_string(), "git push failed: rejected");
    }
}

//! Git error types
//!
//! Expected absences (not a repository, unborn HEAD) are not errors; they are
//! reported through `Ok` values by [`super::Repository`]. This enum covers
//! the cases callers have to react to.

use std::fmt;

#[derive(Debug)]
pub enum GitError {
    /// The git executable could not be started (usually: git is not installed)
    Spawn {
        command: String,
        source: std::io::Error,
    },
    /// A query that must succeed exited non-zero
    CommandFailed { command: String, stderr: String },
    /// git was killed by Ctrl-C
    Interrupted,
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::Spawn { command, source } => {
                write!(f, "Failed to run `{command}`: {source}")
            }
            GitError::CommandFailed { command, stderr } => {
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    write!(f, "`{command}` failed")
                } else {
                    write!(f, "`{command}` failed: {stderr}")
                }
            }
            GitError::Interrupted => write!(f, "git was interrupted"),
        }
    }
}

impl std::error::Error for GitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GitError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

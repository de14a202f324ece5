//! Thin wrapper over the git CLI for the queries the prompt needs.

use std::process::Output;

use crate::shell_exec::{Cmd, killed_by_interrupt};

mod error;

pub use error::GitError;

/// Repository context for git queries.
///
/// Holds the directory being inspected; every command runs as
/// `git -C <path> ...`. Nothing is cached between calls.
///
/// ```no_run
/// use prompt_info::git::Repository;
///
/// let repo = Repository::at("/home/me/src/project");
/// if repo.is_repository()? {
///     let branch = repo.abbrev_head()?;
///     let dirty = repo.is_dirty()?;
/// }
/// # Ok::<(), prompt_info::git::GitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    path: String,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Whether the path is inside a git work tree.
    ///
    /// Uses `rev-parse --show-toplevel`; any non-zero exit means "no".
    pub fn is_repository(&self) -> Result<bool, GitError> {
        let output = self.run(&["rev-parse", "--show-toplevel"])?;
        Ok(output.status.success())
    }

    /// The abbreviated name of HEAD: a branch name, or the literal `HEAD`
    /// when detached.
    ///
    /// Returns `None` when HEAD doesn't resolve, e.g. before the first commit.
    pub fn abbrev_head(&self) -> Result<Option<String>, GitError> {
        let output = self.run(&["rev-parse", "--abbrev-ref", "--verify", "HEAD"])?;
        if !output.status.success() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
    }

    /// The full commit hash HEAD points at.
    pub fn head_sha(&self) -> Result<String, GitError> {
        self.run_command(&["rev-parse", "HEAD"])
            .map(|stdout| stdout.trim().to_string())
    }

    /// Whether tracked files differ from HEAD (staged or not).
    ///
    /// Untracked files don't count. Any exit code other than 0 is treated as
    /// dirty, including git's own failures.
    pub fn is_dirty(&self) -> Result<bool, GitError> {
        let output = self.run(&["diff", "HEAD", "--quiet"])?;
        Ok(!output.status.success())
    }

    /// Run a git command and return stdout, failing on a non-zero exit.
    pub fn run_command(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.run(args)?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: self.command(args).display(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a git command and return its raw output, whatever the exit code.
    ///
    /// Fails only if git can't be started or was killed by Ctrl-C.
    pub fn run(&self, args: &[&str]) -> Result<Output, GitError> {
        let cmd = self.command(args);
        let command = cmd.display();
        let output = cmd
            .run()
            .map_err(|source| GitError::Spawn { command, source })?;

        if killed_by_interrupt(&output.status) {
            return Err(GitError::Interrupted);
        }

        Ok(output)
    }

    fn command(&self, args: &[&str]) -> Cmd {
        Cmd::new("git")
            .args(["-C", self.path.as_str()])
            .args(args.iter().copied())
            .context(&self.path)
    }
}

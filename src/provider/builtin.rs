//! The builtin git status provider.

use super::{LookupError, RepoStatus, StatusProvider};
use crate::git::Repository;
use crate::interrupt::InterruptGuard;
use crate::path::normalize_home;

/// Label shown when HEAD can't be resolved (no commits yet).
pub const UNKNOWN_BRANCH: &str = "????";

/// Length of the commit abbreviation shown for a detached HEAD.
const SHORT_SHA_LEN: usize = 6;

/// Status from the git CLI.
#[derive(Debug, Clone, Default)]
pub struct BuiltinProvider {
    home: Option<String>,
}

impl BuiltinProvider {
    /// `home` is used to abbreviate the reported path.
    pub fn new(home: Option<String>) -> Self {
        Self { home }
    }
}

impl StatusProvider for BuiltinProvider {
    fn id(&self) -> &'static str {
        "builtin"
    }

    fn status(
        &self,
        path: &str,
        interrupt: &InterruptGuard,
    ) -> Result<Option<RepoStatus>, LookupError> {
        let check = || {
            if interrupt.interrupted() {
                Err(LookupError::Interrupted)
            } else {
                Ok(())
            }
        };

        let repo = Repository::at(path);
        let in_repo = repo.is_repository()?;
        check()?;
        if !in_repo {
            return Ok(None);
        }

        let head = repo.abbrev_head()?;
        check()?;

        let (label, is_dirty) = match head {
            // Unborn HEAD: nothing to diff against, always show as dirty.
            None => (UNKNOWN_BRANCH.to_string(), true),
            Some(name) => {
                let label = if name == "HEAD" {
                    let sha = repo.head_sha()?;
                    check()?;
                    sha.chars().take(SHORT_SHA_LEN).collect()
                } else {
                    name
                };
                let is_dirty = repo.is_dirty()?;
                check()?;
                (label, is_dirty)
            }
        };

        Ok(Some(RepoStatus {
            label,
            path: normalize_home(path, self.home.as_deref()),
            is_dirty,
        }))
    }
}

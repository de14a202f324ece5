//! Repository status providers.
//!
//! A provider turns a directory into a [`RepoStatus`], or reports that there
//! is no repository there. Providers are tried in a fixed order by
//! [`ProviderChain`]: the configured external plugin (if any), then the
//! builtin git provider. The first one that returns a status wins.

use std::fmt;

use serde::Deserialize;

use crate::config::PromptConfig;
use crate::env::PromptEnv;
use crate::git::GitError;
use crate::interrupt::InterruptGuard;

mod builtin;
mod external;

pub use builtin::{BuiltinProvider, UNKNOWN_BRANCH};
pub use external::ExternalProvider;

/// What the prompt shows for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoStatus {
    /// Branch name, 6-character commit abbreviation, or [`UNKNOWN_BRANCH`].
    pub label: String,
    /// Working directory with `$HOME` abbreviated to `~`.
    pub path: String,
    #[serde(default, alias = "isDirty")]
    pub is_dirty: bool,
}

impl RepoStatus {
    pub fn new(label: impl Into<String>, path: impl Into<String>, is_dirty: bool) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            is_dirty,
        }
    }
}

/// Why a status lookup produced neither a status nor an absence.
///
/// `Interrupted` is the only variant the prompt recovers from; everything in
/// `Failed` is reported and ends the process.
#[derive(Debug)]
pub enum LookupError {
    /// Ctrl-C arrived while a provider was running
    Interrupted,
    /// Anything else: missing executables, a broken plugin, bad plugin output
    Failed(anyhow::Error),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Interrupted => write!(f, "Status lookup was interrupted"),
            LookupError::Failed(err) => write!(f, "{err:#}"),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Interrupted => None,
            LookupError::Failed(err) => Some(err.as_ref()),
        }
    }
}

impl From<anyhow::Error> for LookupError {
    fn from(err: anyhow::Error) -> Self {
        LookupError::Failed(err)
    }
}

impl From<GitError> for LookupError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::Interrupted => LookupError::Interrupted,
            other => LookupError::Failed(other.into()),
        }
    }
}

/// Something that can report repository status for a directory.
pub trait StatusProvider {
    /// Stable identifier used in logs.
    fn id(&self) -> &'static str;

    /// Status for `path`, or `Ok(None)` if there is no repository there.
    ///
    /// Implementations should return [`LookupError::Interrupted`] as soon as
    /// `interrupt` reports a Ctrl-C.
    fn status(
        &self,
        path: &str,
        interrupt: &InterruptGuard,
    ) -> Result<Option<RepoStatus>, LookupError>;
}

/// Ordered list of providers; first status wins.
#[derive(Default)]
pub struct ProviderChain {
    providers: Vec<Box<dyn StatusProvider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard chain: the configured plugin (if any), then builtin git.
    pub fn from_config(config: &PromptConfig, env: &PromptEnv) -> Self {
        let mut chain = Self::new();
        if let Some(plugin) = &config.plugin {
            chain.push(ExternalProvider::from_config(plugin));
        }
        chain.push(BuiltinProvider::new(env.home.clone()));
        chain
    }

    /// Append a provider to the end of the chain.
    pub fn push<P>(&mut self, provider: P)
    where
        P: StatusProvider + 'static,
    {
        self.providers.push(Box::new(provider));
    }

    /// Provider identifiers in lookup order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.iter().map(|p| p.id())
    }

    /// Ask each provider in turn; return the first status found.
    pub fn lookup(
        &self,
        path: &str,
        interrupt: &InterruptGuard,
    ) -> Result<Option<RepoStatus>, LookupError> {
        for provider in &self.providers {
            let status = provider.status(path, interrupt)?;
            if interrupt.interrupted() {
                return Err(LookupError::Interrupted);
            }
            if let Some(status) = status {
                log::debug!("{} provided status for {path}", provider.id());
                return Ok(Some(status));
            }
            log::debug!("{} found no repository at {path}", provider.id());
        }
        Ok(None)
    }
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.ids().collect();
        f.debug_struct("ProviderChain")
            .field("providers", &ids)
            .finish()
    }
}

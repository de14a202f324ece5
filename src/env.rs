//! Snapshot of the process environment the prompt depends on.

/// The environment variables read by path resolution and normalization.
///
/// Captured once in `main` and passed down explicitly so the rest of the
/// crate never reads ambient process state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptEnv {
    /// `$HOME`, used to abbreviate paths to `~`.
    pub home: Option<String>,
    /// `$PWD`, the last-resort working directory.
    pub pwd: Option<String>,
}

impl PromptEnv {
    /// Read `HOME` and `PWD` from the current process.
    pub fn from_process() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            pwd: std::env::var("PWD").ok(),
        }
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_pwd(mut self, pwd: impl Into<String>) -> Self {
        self.pwd = Some(pwd.into());
        self
    }
}

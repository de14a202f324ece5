//! Prompt line formatting.
//!
//! The prompt line uses fixed ANSI escapes rather than `anstyle` so the bytes
//! are stable across terminals and match what shell prompts have always
//! received. `anstyle`/`anstream` are only used for diagnostics on stderr.

use std::borrow::Cow;

use anstyle::{AnsiColor, Color, Style};

use crate::provider::RepoStatus;

/// Bold cyan, used for the branch label.
pub const CYAN: &str = "\x1b[01;36m";

/// Bold blue, used for the path.
pub const BLUE: &str = "\x1b[01;34m";

/// Bold red, used for the dirty marker.
pub const RED: &str = "\x1b[01;31m";

/// Resets all attributes.
pub const RESET: &str = "\x1b[00m";

/// Dirty marker: `*` plus the separating space.
pub const DIRTY_MARKER: &str = "* ";

/// Clean marker: just the separating space.
pub const CLEAN_MARKER: &str = " ";

/// Error style (red) for diagnostics - use as `{ERROR}text{ERROR:#}`
pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Ordered prompt fragments, alternating color codes and text.
///
/// `[CYAN, label, RED, marker, BLUE, path]` for a repository,
/// `[BLUE, path]` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    fragments: Vec<Cow<'static, str>>,
}

impl PromptLine {
    /// Line for a directory with repository status.
    pub fn from_status(status: RepoStatus) -> Self {
        let marker = if status.is_dirty {
            DIRTY_MARKER
        } else {
            CLEAN_MARKER
        };
        Self {
            fragments: vec![
                CYAN.into(),
                status.label.into(),
                RED.into(),
                marker.into(),
                BLUE.into(),
                status.path.into(),
            ],
        }
    }

    /// Line for a directory with no status: just the (already normalized)
    /// path.
    pub fn bare(path: impl Into<String>) -> Self {
        Self {
            fragments: vec![BLUE.into(), Cow::Owned(path.into())],
        }
    }

    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.as_ref())
    }

    /// `[` + fragments + reset + `]`, without a trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::from("[");
        for fragment in &self.fragments {
            out.push_str(fragment);
        }
        out.push_str(RESET);
        out.push(']');
        out
    }
}

impl std::fmt::Display for PromptLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

//! Status from a user-configured plugin command.
//!
//! The plugin is run as `<command> <args...> <path>` and answers on stdout:
//! a JSON [`RepoStatus`] object, or nothing / `null` for "no repository
//! here". A non-zero exit or unparsable output is an error.

use anyhow::{Context, anyhow};

use super::{LookupError, RepoStatus, StatusProvider};
use crate::config::PluginConfig;
use crate::interrupt::InterruptGuard;
use crate::shell_exec::{Cmd, killed_by_interrupt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProvider {
    command: String,
    args: Vec<String>,
}

impl ExternalProvider {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }
}

impl StatusProvider for ExternalProvider {
    fn id(&self) -> &'static str {
        "external"
    }

    fn status(
        &self,
        path: &str,
        interrupt: &InterruptGuard,
    ) -> Result<Option<RepoStatus>, LookupError> {
        let cmd = Cmd::new(&self.command)
            .args(self.args.iter().cloned())
            .arg(path)
            .context(self.id());
        let shown = cmd.display();

        let output = cmd
            .run()
            .with_context(|| format!("Failed to run plugin `{shown}`"))?;

        if killed_by_interrupt(&output.status) || interrupt.interrupted() {
            return Err(LookupError::Interrupted);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let mut message = format!("Plugin `{shown}` failed ({})", output.status);
            if !stderr.is_empty() {
                message.push_str(": ");
                message.push_str(stderr);
            }
            return Err(anyhow!(message).into());
        }

        parse_plugin_output(&String::from_utf8_lossy(&output.stdout))
            .with_context(|| format!("Plugin `{shown}` printed invalid status"))
            .map_err(LookupError::from)
    }
}

/// Empty output and `null` mean "no repository"; anything else must be a
/// [`RepoStatus`] object.
fn parse_plugin_output(stdout: &str) -> anyhow::Result<Option<RepoStatus>> {
    let stdout = stdout.trim();
    if stdout.is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str(stdout)?)
}

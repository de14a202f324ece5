//! Working-directory resolution and home abbreviation.

use anyhow::{Context, anyhow};

use crate::env::PromptEnv;
use crate::shell_exec::Cmd;

/// Resolve the current directory as the shell sees it, without resolving
/// symlinks.
///
/// Tries `pwd -L` first, then the process's own working directory, then
/// `$PWD`. Errors if all three fail, or if the directory name isn't UTF-8.
pub fn resolve_working_dir(env: &PromptEnv) -> anyhow::Result<String> {
    resolve_with(Cmd::new("pwd").arg("-L"), env)
}

/// [`resolve_working_dir`] with a replaceable logical-pwd command.
pub fn resolve_with(pwd: Cmd, env: &PromptEnv) -> anyhow::Result<String> {
    let shown = pwd.display();
    match pwd.discard_stderr().run() {
        Ok(output) if output.status.success() => {
            let path = String::from_utf8(output.stdout)
                .map_err(|e| anyhow!("`{shown}` printed a path that is not valid UTF-8: {e}"))?;
            let path = path.trim();
            if !path.is_empty() {
                return Ok(path.to_string());
            }
            log::debug!("`{shown}` printed nothing; falling back to current_dir");
        }
        Ok(output) => {
            log::debug!("`{shown}` failed ({}); falling back to current_dir", output.status);
        }
        Err(e) => {
            log::debug!("`{shown}` could not run ({e}); falling back to current_dir");
        }
    }

    let cwd_error = match std::env::current_dir() {
        Ok(path) => {
            return path.into_os_string().into_string().map_err(|path| {
                anyhow!("Current directory is not valid UTF-8: {}", path.to_string_lossy())
            });
        }
        Err(e) => e,
    };
    log::debug!("current_dir failed ({cwd_error}); falling back to $PWD");

    env.pwd
        .clone()
        .filter(|pwd| !pwd.is_empty())
        .ok_or_else(|| anyhow!("$PWD is not set"))
        .with_context(|| format!("Cannot determine the current directory: {cwd_error}"))
}

/// Replace a leading `$HOME` with `~`.
///
/// Only a prefix at position 0 is replaced; an empty or missing home leaves
/// the path untouched.
pub fn normalize_home(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if !home.is_empty() => match path.strip_prefix(home) {
            Some(rest) => format!("~{rest}"),
            None => path.to_string(),
        },
        _ => path.to_string(),
    }
}

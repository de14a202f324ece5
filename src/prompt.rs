//! Top-level prompt assembly: resolve the directory, ask the providers,
//! format the line.

use crate::config::PromptConfig;
use crate::env::PromptEnv;
use crate::interrupt::InterruptGuard;
use crate::path::{normalize_home, resolve_working_dir};
use crate::provider::{LookupError, ProviderChain};
use crate::styling::PromptLine;

/// Build the prompt line for the current directory.
///
/// Ctrl-C while providers run degrades to the bare path line; every other
/// failure is returned.
pub fn run(env: &PromptEnv, config: &PromptConfig) -> anyhow::Result<PromptLine> {
    let path = resolve_working_dir(env)?;
    log::debug!("Working directory: {path}");

    let providers = ProviderChain::from_config(config, env);
    let interrupt = InterruptGuard::install();
    build_line(&path, env, &providers, &interrupt)
}

/// Format the line for `path` using `providers`.
pub fn build_line(
    path: &str,
    env: &PromptEnv,
    providers: &ProviderChain,
    interrupt: &InterruptGuard,
) -> anyhow::Result<PromptLine> {
    match providers.lookup(path, interrupt) {
        Ok(Some(status)) => return Ok(PromptLine::from_status(status)),
        Ok(None) => {}
        Err(LookupError::Interrupted) => log::debug!("Interrupted; showing path only"),
        Err(LookupError::Failed(err)) => return Err(err),
    }

    Ok(PromptLine::bare(normalize_home(path, env.home.as_deref())))
}

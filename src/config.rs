//! User configuration
//!
//! The only setting is the optional status plugin. It comes from a TOML file:
//!
//! ```toml
//! [plugin]
//! command = "company-prompt-info"
//! args = ["--json"]
//! ```
//!
//! and can be overridden with `PROMPT_INFO_PLUGIN="company-prompt-info --json"`.
//! An empty `PROMPT_INFO_PLUGIN` disables the plugin.

use std::path::{Path, PathBuf};

use config::ConfigError;
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV_VAR: &str = "PROMPT_INFO_CONFIG_PATH";

/// Environment variable overriding the `[plugin]` section.
pub const PLUGIN_ENV_VAR: &str = "PROMPT_INFO_PLUGIN";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromptConfig {
    /// External status provider, tried before the builtin git provider.
    #[serde(default)]
    pub plugin: Option<PluginConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginConfig {
    /// Program to run; looked up on `PATH`.
    pub command: String,
    /// Arguments placed before the directory path.
    #[serde(default)]
    pub args: Vec<String>,
}

impl PromptConfig {
    /// Load the config file (if any) and apply `PROMPT_INFO_PLUGIN`.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_path(explicit_path) {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        config.with_plugin_override(std::env::var(PLUGIN_ENV_VAR).ok().as_deref())
    }

    /// Load a TOML config file. A missing file yields the default config.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}", path.display());
            return Ok(Self::default());
        }
        log::debug!("Loading config from {}", path.display());

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Message(format!("Failed to read config file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::Message(format!("Failed to parse TOML: {e}")))
    }

    /// Apply a `PROMPT_INFO_PLUGIN`-style override.
    ///
    /// `None` keeps the file's plugin, an empty string removes it, anything
    /// else is split with shell quoting rules into command and args.
    pub fn with_plugin_override(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        let Some(value) = value else {
            return Ok(self);
        };

        let mut words = shlex::split(value).ok_or_else(|| {
            ConfigError::Message(format!("Invalid quoting in {PLUGIN_ENV_VAR}: {value}"))
        })?;

        self.plugin = if words.is_empty() {
            None
        } else {
            let command = words.remove(0);
            Some(PluginConfig {
                command,
                args: words,
            })
        };
        Ok(self)
    }
}

/// Config file location.
///
/// Priority:
/// 1. `--config` flag
/// 2. `PROMPT_INFO_CONFIG_PATH`
/// 3. `<config dir>/prompt-info/config.toml` (XDG on Linux and macOS)
pub fn config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("prompt-info").join("config.toml"))
}

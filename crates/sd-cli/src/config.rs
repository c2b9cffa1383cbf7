//! `statdist.toml` loading and path discovery.
//!
//! Resolution order: CLI argument → environment variable → XDG path → defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};
use crate::logging::{LogFormat, LogLevel};
use crate::output::OutputFormat;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "STATDIST_CONFIG";

/// Environment variable overriding the sampling seed.
pub const ENV_SEED: &str = "STATDIST_SEED";

/// Standard config file name.
pub const CONFIG_FILENAME: &str = "statdist.toml";

/// Application name for XDG directories.
const APP_NAME: &str = "statdist";

/// Settings read from `statdist.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Seed for `sample` when `--seed` is not given.
    pub seed: Option<u64>,
    /// Output format when `--format` is not given.
    pub format: Option<OutputFormat>,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
    /// Digits after the decimal point in human output.
    pub precision: Option<usize>,
}

impl Settings {
    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &text)
    }

    /// Applies scalar environment overrides on top of file values.
    pub fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = env(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|_| CliError::InvalidEnv {
                variable: ENV_SEED,
                value: raw.clone(),
            })?;
            self.seed = Some(seed);
        }
        Ok(())
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via `--config`.
    CliArgument,
    /// Named by STATDIST_CONFIG.
    Environment,
    /// Found in the XDG config directory.
    XdgConfig,
    /// No file; built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Settings plus their provenance.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub settings: Settings,
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Finds the config file to load.
///
/// An explicit path (flag or STATDIST_CONFIG) must exist; the XDG location
/// is only used when present.
pub fn resolve_config_path(
    cli_path: Option<&Path>,
    env: &impl Fn(&str) -> Option<String>,
    xdg_config_dir: Option<&Path>,
) -> Result<(Option<PathBuf>, ConfigSource)> {
    if let Some(path) = cli_path {
        if !path.exists() {
            return Err(CliError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok((Some(path.to_path_buf()), ConfigSource::CliArgument));
    }

    if let Some(raw) = env(ENV_CONFIG_PATH).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(raw);
        if !path.exists() {
            return Err(CliError::ConfigNotFound { path });
        }
        return Ok((Some(path), ConfigSource::Environment));
    }

    if let Some(dir) = xdg_config_dir {
        let path = dir.join(APP_NAME).join(CONFIG_FILENAME);
        if path.exists() {
            return Ok((Some(path), ConfigSource::XdgConfig));
        }
    }

    Ok((None, ConfigSource::BuiltinDefault))
}

/// Resolve and load configuration with an injectable environment.
pub fn load_config_with(
    cli_path: Option<&Path>,
    env: &impl Fn(&str) -> Option<String>,
    xdg_config_dir: Option<&Path>,
) -> Result<ResolvedConfig> {
    let (path, source) = resolve_config_path(cli_path, env, xdg_config_dir)?;
    let mut settings = match &path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.apply_env(env)?;
    Ok(ResolvedConfig {
        settings,
        path,
        source,
    })
}

/// Resolve and load configuration from the real process environment.
pub fn load_config(cli_path: Option<&Path>) -> Result<ResolvedConfig> {
    let env = |key: &str| std::env::var(key).ok();
    load_config_with(cli_path, &env, dirs::config_dir().as_deref())
}

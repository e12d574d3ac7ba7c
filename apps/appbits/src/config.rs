//! CLI configuration management.
//!
//! Configuration is stored as TOML:
//! - `$XDG_CONFIG_HOME/appbits/config.toml`
//! - `~/.config/appbits/config.toml` when `XDG_CONFIG_HOME` is unset

use std::path::{Path, PathBuf};

use anyhow::Context;
use appbits_app_files::{IGNORE_FILE_NAME, IgnoreConfig};
use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ignore patterns applied after the built-in defaults.
    #[serde(default)]
    pub extra_ignore: Vec<String>,

    /// Ignore file looked up at the app root (empty disables it).
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Parent directory for temporary scratch directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scratch_base: Option<PathBuf>,
}

fn default_ignore_file() -> String {
    IGNORE_FILE_NAME.into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extra_ignore: Vec::new(),
            ignore_file: default_ignore_file(),
            log_level: default_log_level(),
            scratch_base: None,
        }
    }
}

impl Config {
    /// Loads configuration from `explicit`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// defaults and is not created.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        match config_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Ignore rules for the walker, built from this configuration.
    pub fn ignore_config(&self) -> IgnoreConfig {
        IgnoreConfig {
            ignore_file: self.ignore_file.clone(),
            ..IgnoreConfig::default()
        }
        .with_extra(self.extra_ignore.iter().cloned())
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("appbits").join("config.toml"))
}

//! Run configuration for restcheck.
//!
//! Loaded from a YAML file. Every field has a default, so an empty file (or
//! no file at all) targets the public JSONPlaceholder service with both
//! suites enabled.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::suite::SuiteKind;

/// The public JSONPlaceholder service.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Config file names searched for in the current directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["restcheck.yaml", ".restcheck.yaml"];

/// Top-level run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds (default: 10000)
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Suites to run, in order (default: posts, users)
    #[serde(default = "default_suites")]
    pub suites: Vec<SuiteKind>,
    /// Glob patterns on check names; empty runs every check
    #[serde(default)]
    pub only: Vec<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    format!("restcheck/{}", env!("CARGO_PKG_VERSION"))
}

fn default_suites() -> Vec<SuiteKind> {
    SuiteKind::ALL.to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout(),
            user_agent: default_user_agent(),
            suites: default_suites(),
            only: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // serde_yaml reads an empty document as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Path of the per-user config file, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "restcheck").map(|dirs| dirs.config_dir().join("restcheck.yaml"))
}

/// Find a config file: the current directory first, then the user config dir.
pub fn discover() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .chain(user_config_path())
        .find(|path| path.exists())
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
        anyhow::bail!(
            "invalid base_url {:?}, must start with http:// or https://",
            config.base_url
        );
    }

    if config.timeout_ms == 0 {
        anyhow::bail!("timeout_ms must be greater than zero");
    }

    if config.suites.is_empty() {
        anyhow::bail!("at least one suite must be enabled");
    }

    for pattern in &config.only {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid check pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

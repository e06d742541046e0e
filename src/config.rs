//! Configuration management for reminderctl.
//!
//! Configuration is loaded from `~/.config/reminderctl/config.toml`. The only
//! setting today is the daemon socket path; the environment and the CLI can
//! both override it.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the daemon socket path.
pub const SOCKET_ENV: &str = "REMINDERD_SOCKET";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Daemon socket path (default: ~/.local/share/reminderd/reminderd.sock).
    #[serde(default)]
    pub socket: Option<PathBuf>,
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("reminderctl"))
            .context("Could not determine config directory")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default socket path, where reminderd listens unless told otherwise.
    pub fn default_socket_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| default_socket_path_in(&home))
            .context("Could not determine home directory")
    }

    /// Load configuration from file, using defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, using defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }
}

fn default_socket_path_in(home: &Path) -> PathBuf {
    home.join(".local/share/reminderd/reminderd.sock")
}

/// Address of the daemon's local channel, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(PathBuf);

impl Endpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Pick the socket path: CLI flag, then environment, then config file,
    /// then the default location. An empty environment value counts as unset.
    pub fn resolve(
        flag: Option<PathBuf>,
        env: Option<OsString>,
        config: &Config,
    ) -> Result<Self> {
        if let Some(path) = flag {
            return Ok(Self::new(path));
        }
        if let Some(value) = env.filter(|v| !v.is_empty()) {
            return Ok(Self::new(value));
        }
        if let Some(path) = &config.socket {
            return Ok(Self::new(path.clone()));
        }
        Config::default_socket_path().map(Self::new)
    }

    /// Resolve against the process environment.
    pub fn from_env(flag: Option<PathBuf>, config: &Config) -> Result<Self> {
        Self::resolve(flag, std::env::var_os(SOCKET_ENV), config)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

//! Configuration file parsing for `ember.toml`.
//!
//! Searches the starting directory then its ancestors. A missing file means
//! defaults; a file that exists but cannot be read or parsed is an error.

use crate::guard::{FaultPolicy, Guard};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE: &str = "ember.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid toml in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub runtime: RuntimeSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct RuntimeSection {
    #[serde(default)]
    pub fault_policy: FaultPolicy,
    /// Attach a forced backtrace to fault diagnostics.
    #[serde(default)]
    pub capture_backtrace: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogSection {
    /// Filter used when `EMBER_LOG` is unset, e.g. `"warn"` or `"ember_runtime=debug"`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

impl RuntimeConfig {
    /// Discover `ember.toml` from the current directory upwards.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::current_dir() {
            Ok(dir) => Self::load_discovered(&dir),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Discover from `start` upwards; defaults when nothing is found.
    pub fn load_discovered(start: &Path) -> Result<Self, ConfigError> {
        match discover(start) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a TOML string directly.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// A guard configured from the `[runtime]` section.
    pub fn guard(&self) -> Guard {
        Guard::new(self.runtime.fault_policy).with_backtrace(self.runtime.capture_backtrace)
    }
}

/// Nearest `ember.toml` at or above `start`.
pub fn discover(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

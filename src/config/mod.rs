//! Configuration system for pathwalk.
//!
//! Settings are read from `~/.config/pathwalk/config.toml`. Missing fields
//! fall back to their defaults, and a missing or malformed file yields
//! `Config::default()`. Command-line flags override whatever is loaded here.
//!
//! # Example
//!
//! ```
//! use pathwalk::config::Config;
//!
//! let config = Config::default();
//! assert!(!config.show_paths);
//! assert_eq!(config.limit, None);
//! assert_eq!(config.log_level, "warn");
//!
//! let custom = Config {
//!     show_paths: true,
//!     ..Config::default()
//! };
//! assert!(custom.show_paths);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for the pathwalk command-line tool.
///
/// * `show_paths` - Print each match's path before its id (default: false)
/// * `limit` - Stop after this many matches (default: no limit)
/// * `log_level` - Default tracing filter when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Print each match's path before its id
    #[serde(default)]
    pub show_paths: bool,

    /// Stop after this many matches
    #[serde(default)]
    pub limit: Option<usize>,

    /// Default tracing filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_paths: false,
            limit: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/pathwalk/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("pathwalk");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, returning the defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring malformed config file");
                Self::default()
            }),
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read config file");
                Self::default()
            }
        }
    }

    /// Saves configuration to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }
}

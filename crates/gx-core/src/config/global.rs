//! User-level defaults shared by every invocation
//!
//! Read from `<config_dir>/gx-harness/config.{toml,yaml,yml,json}`; the first
//! file that exists wins. A missing file means built-in defaults.

use std::path::{Path, PathBuf};

use gx_fs::{ConfigStore, NormalizedPath};
use serde::Deserialize;

use crate::Result;

/// Directory name under the platform config directory.
pub const GLOBAL_CONFIG_DIR_NAME: &str = "gx-harness";

/// Defaults that apply when an invocation leaves an option unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GlobalConfig {
    /// Galaxy root used when no explicit root is requested
    #[serde(default)]
    pub galaxy_root: Option<PathBuf>,
}

impl GlobalConfig {
    /// Platform location of the global config directory:
    /// - Linux: `~/.config/gx-harness/`
    /// - macOS: `~/Library/Application Support/gx-harness/`
    /// - Windows: `%APPDATA%\gx-harness\`
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(GLOBAL_CONFIG_DIR_NAME))
    }

    /// Load from the platform config directory.
    pub fn load() -> Result<Self> {
        match Self::default_dir() {
            Some(dir) => Self::load_from_dir(&dir),
            None => {
                tracing::debug!("No platform config directory; using global defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `dir`, falling back to defaults when no config file exists.
    ///
    /// Invalid content in an existing file is an error.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let loaded = ConfigStore::new().load_first(&NormalizedPath::new(dir), "config")?;
        if loaded.is_none() {
            tracing::debug!(dir = %dir.display(), "No global config found; using defaults");
        }
        Ok(loaded.unwrap_or_default())
    }
}

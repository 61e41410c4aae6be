//! Format-agnostic configuration loading

use crate::{Error, NormalizedPath, Result, io};
use serde::de::DeserializeOwned;

/// Extensions recognised by [`ConfigStore`], in lookup order.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Format-agnostic configuration store.
///
/// Detects format from the file extension and deserializes transparently.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    /// Create a new ConfigStore.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let extension = path.extension().unwrap_or("").to_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::UnsupportedFormat { extension });
        }

        let content = io::read_text(path)?;
        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            _ => serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "YAML".into(),
                message: e.to_string(),
            }),
        }
    }

    /// Load the first existing `<stem>.<ext>` in `dir`, trying
    /// [`SUPPORTED_EXTENSIONS`] in order.
    ///
    /// Returns `Ok(None)` when no candidate exists.
    pub fn load_first<T: DeserializeOwned>(
        &self,
        dir: &NormalizedPath,
        stem: &str,
    ) -> Result<Option<T>> {
        for extension in SUPPORTED_EXTENSIONS {
            let candidate = dir.join(&format!("{stem}.{extension}"));
            if candidate.is_file() {
                tracing::debug!(path = %candidate, "loading config file");
                return self.load(&candidate).map(Some);
            }
        }
        Ok(None)
    }
}

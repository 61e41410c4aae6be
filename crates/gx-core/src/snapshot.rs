//! Best-effort download of a pre-seeded Galaxy database
//!
//! Any failure (timeout, connection error, HTTP error status, write error)
//! means the snapshot is unavailable and Galaxy creates its own database.
//! The failure is logged, never returned.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::{Error, Result};

/// Default bound on the whole download.
pub const DEFAULT_SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether a snapshot was fetched, and from where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOutcome {
    pub fetched: bool,
    source: Option<String>,
}

impl SnapshotOutcome {
    pub fn available(url: impl Into<String>) -> Self {
        Self {
            fetched: true,
            source: Some(url.into()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fetched: false,
            source: None,
        }
    }

    /// URL the snapshot came from, when fetched.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Downloads a database snapshot to a local file.
pub trait SnapshotFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<()>;
}

/// [`SnapshotFetcher`] over blocking HTTP.
#[derive(Debug, Clone)]
pub struct HttpSnapshotFetcher {
    timeout: Duration,
}

impl Default for HttpSnapshotFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_TIMEOUT)
    }
}

impl HttpSnapshotFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn client(&self, url: &str) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Snapshot {
                url: url.to_string(),
                message: format!("Failed to create HTTP client: {e}"),
            })
    }
}

impl SnapshotFetcher for HttpSnapshotFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<()> {
        let http_error = |e: reqwest::Error| Error::Snapshot {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client(url)?
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(http_error)?;
        let body = response.bytes().map_err(http_error)?;

        fs::write(destination, &body).map_err(|e| gx_fs::Error::io(destination, e))?;
        tracing::debug!(url, bytes = body.len(), "downloaded database snapshot");
        Ok(())
    }
}

/// Fetch `url` into `destination`, swallowing any failure.
///
/// A partially written destination is removed.
pub fn fetch_snapshot(
    fetcher: &dyn SnapshotFetcher,
    url: &str,
    destination: &Path,
) -> SnapshotOutcome {
    match fetcher.fetch(url, destination) {
        Ok(()) => SnapshotOutcome::available(url),
        Err(e) => {
            tracing::warn!(error = %e, "no pre-seeded database available");
            if destination.exists() {
                let _ = fs::remove_file(destination);
            }
            SnapshotOutcome::unavailable()
        }
    }
}

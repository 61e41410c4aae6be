//! Error types for gx-core

/// Result type for gx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling a Galaxy configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Mutually exclusive options were requested together
    #[error("At most one option from [{}] may be specified", .options.join(", "))]
    ConflictingOptions { options: Vec<String> },

    /// No Galaxy root was supplied and none could be discovered
    #[error("Failed to find Galaxy root directory - please explicitly specify one with --galaxy_root.")]
    RootNotFound,

    /// The on-demand installation pipeline failed
    #[error("Galaxy installation failed running `{command}`: {message}")]
    InstallFailed { command: String, message: String },

    /// The database snapshot could not be downloaded
    #[error("Database snapshot download from {url} failed: {message}")]
    Snapshot { url: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from gx-fs
    #[error(transparent)]
    Fs(#[from] gx_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error stems from invalid caller input rather than the
    /// environment.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::ConflictingOptions { .. })
    }
}

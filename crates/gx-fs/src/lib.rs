//! Filesystem layer for the Galaxy test harness
//!
//! Provides path normalisation, plain file I/O, format-agnostic config
//! loading and the discovery rules used to locate tool-adjacent assets and
//! the Galaxy installation root.

pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::GalaxyPath;
pub use discovery::{
    find_application_root, find_associated_path, is_application_root, search_root_for,
};
pub use error::{Error, Result};
pub use path::{NormalizedPath, absolutize};

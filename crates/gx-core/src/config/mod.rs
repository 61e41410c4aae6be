//! Caller-facing configuration: per-invocation options and global defaults

mod global;
mod options;

pub use global::{GLOBAL_CONFIG_DIR_NAME, GlobalConfig};
pub use options::{ConfigOptions, ConfigurationRequest, DATABASE_TEMPLATE_URL};

pub(crate) use options::given;

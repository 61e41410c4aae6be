//! Typed configuration options and the per-invocation request
//!
//! Every recognised option is a named field with its default filled in at
//! deserialization time, so the rest of the crate never looks options up
//! by string. Unrecognised keys are kept aside and ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gx_fs::{ConfigStore, NormalizedPath};
use serde::Deserialize;

use crate::Result;
use crate::resolution::DependencyResolution;

/// Default download location of the pre-seeded database.
pub const DATABASE_TEMPLATE_URL: &str =
    "https://github.com/jmchilton/galaxy-downloads/raw/master/db_gx_rev_0120.sqlite";

fn default_port() -> u16 {
    9090
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_true() -> bool {
    true
}

fn default_master_api_key() -> String {
    "test_key".to_string()
}

fn default_id_secret() -> String {
    "test_secret".to_string()
}

fn default_log_level() -> String {
    "DEBUG".to_string()
}

fn default_database_template_url() -> String {
    DATABASE_TEMPLATE_URL.to_string()
}

/// Options recognised when assembling a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigOptions {
    /// Explicit Galaxy root; skips root discovery
    #[serde(default)]
    pub galaxy_root: Option<PathBuf>,

    /// Install Galaxy into the working directory instead of locating one
    #[serde(default)]
    pub install_galaxy: bool,

    /// Caller-owned working directory; never deleted by the session
    #[serde(default)]
    pub config_directory: Option<PathBuf>,

    /// Explicit test-data directory; skips discovery
    #[serde(default)]
    pub test_data: Option<PathBuf>,

    /// Explicit tool data table config; skips discovery
    #[serde(default)]
    pub tool_data_table: Option<PathBuf>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_true")]
    pub debug: bool,

    #[serde(default = "default_master_api_key")]
    pub master_api_key: String,

    #[serde(default = "default_id_secret")]
    pub id_secret: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Resolve tool dependencies with Homebrew
    #[serde(default)]
    pub brew_dependency_resolution: bool,

    /// Resolve tool dependencies with the Tool Shed Homebrew tap
    #[serde(default)]
    pub shed_brew_dependency_resolution: bool,

    /// Caller-provided dependency resolver config
    #[serde(default)]
    pub dependency_resolvers_config_file: Option<PathBuf>,

    #[serde(default)]
    pub job_config_file: Option<PathBuf>,

    #[serde(default)]
    pub job_metrics_config_file: Option<PathBuf>,

    #[serde(default)]
    pub tool_dependency_dir: Option<PathBuf>,

    /// Attempt to download the pre-seeded database
    #[serde(default = "default_true")]
    pub fetch_database: bool,

    #[serde(default = "default_database_template_url")]
    pub database_template_url: String,

    /// Keys that are not options, such as Galaxy properties outside the
    /// overridable set; never read
    #[serde(flatten)]
    pub ignored: BTreeMap<String, serde_yaml::Value>,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            galaxy_root: None,
            install_galaxy: false,
            config_directory: None,
            test_data: None,
            tool_data_table: None,
            port: default_port(),
            host: default_host(),
            debug: true,
            master_api_key: default_master_api_key(),
            id_secret: default_id_secret(),
            log_level: default_log_level(),
            brew_dependency_resolution: false,
            shed_brew_dependency_resolution: false,
            dependency_resolvers_config_file: None,
            job_config_file: None,
            job_metrics_config_file: None,
            tool_dependency_dir: None,
            fetch_database: true,
            database_template_url: default_database_template_url(),
            ignored: BTreeMap::new(),
        }
    }
}

impl ConfigOptions {
    /// Load options from a `.toml`, `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let options: Self = ConfigStore::new().load(&NormalizedPath::new(path))?;
        if !options.ignored.is_empty() {
            tracing::debug!(
                path = %path.display(),
                keys = ?options.ignored.keys().collect::<Vec<_>>(),
                "ignoring unrecognised options"
            );
        }
        Ok(options)
    }

    /// Check the options for conflicts. Performs no I/O.
    pub fn validate(&self) -> Result<()> {
        DependencyResolution::select(self).map(|_| ())
    }
}

/// An empty path counts as not given.
pub(crate) fn given(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

/// Input for one configuration session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRequest {
    /// Tool definition file or directory
    pub tool_path: PathBuf,
    /// Omit the live database connection
    pub for_tests: bool,
    pub options: ConfigOptions,
}

impl ConfigurationRequest {
    /// Create a request for `tool_path` with default options.
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: tool_path.into(),
            for_tests: false,
            options: ConfigOptions::default(),
        }
    }

    pub fn for_tests(mut self, for_tests: bool) -> Self {
        self.for_tests = for_tests;
        self
    }

    pub fn with_options(mut self, options: ConfigOptions) -> Self {
        self.options = options;
        self
    }
}

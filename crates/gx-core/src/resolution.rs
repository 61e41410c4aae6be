//! Dependency resolution strategy selection
//!
//! At most one strategy may be requested. The stock strategies come with a
//! fixed resolver document that is written into the working directory; a
//! caller-provided config file is used as-is.

use std::path::{Path, PathBuf};

use gx_fs::GalaxyPath;

use crate::config::{ConfigOptions, given};
use crate::{Error, Result};

pub const BREW_DEPENDENCY_RESOLUTION_CONF: &str = r#"<dependency_resolvers>
  <homebrew />
  <!--
  <homebrew versionless="true" />
  -->
</dependency_resolvers>
"#;

pub const SHED_BREW_DEPENDENCY_RESOLUTION_CONF: &str = r#"<dependency_resolvers>
  <tool_shed_tap />
</dependency_resolvers>
"#;

/// Option names selecting a strategy, as reported in conflict errors.
pub const STRATEGY_OPTIONS: [&str; 3] = [
    "brew_dependency_resolution",
    "dependency_resolvers_config_file",
    "shed_brew_dependency_resolution",
];

/// How tool dependencies are resolved by the launched instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyResolution {
    /// Galaxy's own default resolvers
    Default,
    /// Stock Homebrew resolver
    Brew,
    /// Stock Tool Shed tap resolver
    ShedBrew,
    /// A resolver config supplied by the caller
    ConfigFile(PathBuf),
}

/// Resolver config the launched instance reads, and the properties it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverPlan {
    pub config_file: PathBuf,
    /// Set for stock strategies only
    pub dependency_dir: Option<PathBuf>,
    /// Stock document to write at `config_file`; `None` when the caller's
    /// file is used as-is
    pub document: Option<&'static str>,
}

impl DependencyResolution {
    /// Pick the requested strategy, rejecting conflicting requests.
    pub fn select(options: &ConfigOptions) -> Result<Self> {
        let config_file = given(&options.dependency_resolvers_config_file);
        let requested = [
            options.brew_dependency_resolution,
            config_file.is_some(),
            options.shed_brew_dependency_resolution,
        ];

        if requested.iter().filter(|on| **on).count() > 1 {
            return Err(Error::ConflictingOptions {
                options: STRATEGY_OPTIONS.iter().map(|s| s.to_string()).collect(),
            });
        }

        let selected = if options.brew_dependency_resolution {
            Self::Brew
        } else if options.shed_brew_dependency_resolution {
            Self::ShedBrew
        } else if let Some(path) = config_file {
            Self::ConfigFile(path.to_path_buf())
        } else {
            Self::Default
        };
        tracing::debug!(strategy = ?selected, "selected dependency resolution");
        Ok(selected)
    }

    /// Fixed resolver document of a stock strategy.
    pub fn stock_document(&self) -> Option<&'static str> {
        match self {
            Self::Brew => Some(BREW_DEPENDENCY_RESOLUTION_CONF),
            Self::ShedBrew => Some(SHED_BREW_DEPENDENCY_RESOLUTION_CONF),
            Self::Default | Self::ConfigFile(_) => None,
        }
    }

    /// Resolver config for this strategy. Stock strategies place theirs
    /// inside `workdir`.
    ///
    /// `None` for Galaxy's default resolvers.
    pub fn plan(&self, workdir: &Path) -> Option<ResolverPlan> {
        match self {
            Self::Default => None,
            Self::ConfigFile(path) => Some(ResolverPlan {
                config_file: path.clone(),
                dependency_dir: None,
                document: None,
            }),
            Self::Brew | Self::ShedBrew => Some(ResolverPlan {
                config_file: workdir.join(GalaxyPath::ResolversConf),
                dependency_dir: Some(workdir.join(GalaxyPath::DependencyDir)),
                document: self.stock_document(),
            }),
        }
    }
}

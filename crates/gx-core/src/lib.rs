//! Runtime configuration assembly for isolated Galaxy test instances
//!
//! Given a tool path and a set of options, this crate works out where the
//! tool's test data and the Galaxy installation live, writes the Galaxy
//! config files into a scoped working directory, and derives the environment
//! Galaxy must be launched with.
//!
//! # Architecture
//!
//! ```text
//!               ConfigSession (session)
//!                        |
//!    +---------+---------+----------+-----------+
//!    |         |         |          |           |
//!  paths  resolution  properties   env      artifacts
//!    |                   |          |           |
//!  gx-fs              template   template    template
//! ```
//!
//! Installation and the database snapshot download sit behind the
//! [`Installer`] and [`SnapshotFetcher`] traits.
//!
//! # Example
//!
//! ```no_run
//! use gx_core::{ConfigurationRequest, SessionContext, with_galaxy_config};
//!
//! fn example() -> gx_core::Result<()> {
//!     let ctx = SessionContext::from_environment()?;
//!     let request = ConfigurationRequest::new("tools/cat.xml").for_tests(true);
//!     let env = with_galaxy_config(&request, &ctx, |config| config.environment.clone())?;
//!     println!("{} variables", env.len());
//!     Ok(())
//! }
//! ```

pub mod artifacts;
pub mod config;
pub mod env;
pub mod error;
pub mod install;
pub mod logging;
pub mod paths;
pub mod properties;
pub mod resolution;
pub mod session;
pub mod snapshot;
pub mod template;

pub use artifacts::{ArtifactLayout, ArtifactWriter, tool_definition};
pub use config::{ConfigOptions, ConfigurationRequest, GlobalConfig};
pub use env::{Environment, build_environment, override_variable};
pub use error::{Error, Result};
pub use install::{Installer, ShellInstaller};
pub use paths::ResolvedPaths;
pub use properties::{PropertyMap, derive_properties};
pub use resolution::{DependencyResolution, ResolverPlan};
pub use session::{
    ConfigSession, ConfigurationResult, SessionContext, SessionState, WorkingDirectory,
    with_galaxy_config,
};
pub use snapshot::{HttpSnapshotFetcher, SnapshotFetcher, SnapshotOutcome};
pub use template::{TemplateArgs, substitute, substitute_opt};

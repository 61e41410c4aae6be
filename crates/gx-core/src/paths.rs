//! Resolution of the session's input paths
//!
//! Explicit options always win; discovery only runs for what was not given.
//! A missing test-data directory or data table is tolerated, a missing
//! Galaxy root is not.

use std::path::{Path, PathBuf};

use gx_fs::{GalaxyPath, absolutize, find_application_root, find_associated_path};

use crate::config::{ConfigOptions, GlobalConfig, given};
use crate::{Error, Result};

pub const NO_TEST_DATA_MESSAGE: &str = "couldn't find a target test-data directory, you should \
     likely create a test-data directory or pass an explicit path using --test-data.";

pub const NO_DATA_TABLE_MESSAGE: &str = "couldn't find a tool_data_table_conf.xml.test file, \
     tools that rely on data tables will see none.";

/// Paths fixed once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub test_data_dir: Option<PathBuf>,
    pub tool_data_table: Option<PathBuf>,
    /// `None` when Galaxy is installed on demand into the working directory
    pub application_root: Option<PathBuf>,
}

impl ResolvedPaths {
    /// Resolve all paths for `tool_path`.
    pub fn resolve(
        tool_path: &Path,
        options: &ConfigOptions,
        global: &GlobalConfig,
        cwd: &Path,
    ) -> Result<Self> {
        let test_data_dir = find_test_data(tool_path, options, cwd);
        let tool_data_table =
            find_tool_data_table(tool_path, options, test_data_dir.as_deref(), cwd);
        let application_root = if options.install_galaxy {
            tracing::debug!("Galaxy will be installed on demand; skipping root discovery");
            None
        } else {
            Some(find_galaxy_root(options, global, cwd)?)
        };

        Ok(Self {
            test_data_dir,
            tool_data_table,
            application_root,
        })
    }
}

/// Test-data directory for `tool_path`, warning when there is none.
pub fn find_test_data(tool_path: &Path, options: &ConfigOptions, cwd: &Path) -> Option<PathBuf> {
    if let Some(explicit) = given(&options.test_data) {
        return Some(absolutize(explicit, cwd));
    }

    let found = find_associated_path(tool_path, GalaxyPath::TestData.as_str(), &[], cwd);
    if found.is_none() {
        tracing::warn!(tool = %tool_path.display(), "{NO_TEST_DATA_MESSAGE}");
    }
    found
}

/// Tool data table config for `tool_path`, warning when there is none; the
/// test-data directory is also searched.
pub fn find_tool_data_table(
    tool_path: &Path,
    options: &ConfigOptions,
    test_data_dir: Option<&Path>,
    cwd: &Path,
) -> Option<PathBuf> {
    if let Some(explicit) = given(&options.tool_data_table) {
        return Some(absolutize(explicit, cwd));
    }

    let extra: Vec<PathBuf> = test_data_dir.map(Path::to_path_buf).into_iter().collect();
    let found = find_associated_path(
        tool_path,
        GalaxyPath::ToolDataTableTest.as_str(),
        &extra,
        cwd,
    );
    if found.is_none() {
        tracing::warn!(tool = %tool_path.display(), "{NO_DATA_TABLE_MESSAGE}");
    }
    found
}

/// Galaxy root from the options, the global config, or an upward walk from
/// `cwd`, in that order.
pub fn find_galaxy_root(
    options: &ConfigOptions,
    global: &GlobalConfig,
    cwd: &Path,
) -> Result<PathBuf> {
    if let Some(root) = given(&options.galaxy_root) {
        return Ok(absolutize(root, cwd));
    }
    if let Some(root) = given(&global.galaxy_root) {
        tracing::debug!(root = %root.display(), "using Galaxy root from global config");
        return Ok(absolutize(root, cwd));
    }

    find_application_root(cwd).ok_or(Error::RootNotFound)
}

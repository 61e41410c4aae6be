//! Well-known file and directory names used by the harness.

use std::path::Path;

/// Fixed names of the files and directories the harness looks for or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalaxyPath {
    /// Launcher script marking a Galaxy root
    RunScript,
    /// Configuration subdirectory marking a Galaxy root
    ConfigDir,
    /// Test data directory shipped next to tools
    TestData,
    /// Data table config used while testing tools
    ToolDataTableTest,
    /// Paste web-server config
    WebConfig,
    /// Tool registry wrapping the tool under test
    ToolConf,
    /// Empty tool registry standing in for migrated tools
    EmptyToolConf,
    /// Dependency resolver config
    ResolversConf,
    /// Job metrics config
    JobMetricsConf,
    /// SQLite database file
    Database,
    /// Root of an on-demand installation inside the working directory
    InstallRoot,
    /// Tool dependency directory used by the stock resolver strategies
    DependencyDir,
}

impl GalaxyPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RunScript => "run.sh",
            Self::ConfigDir => "config",
            Self::TestData => "test-data",
            Self::ToolDataTableTest => "tool_data_table_conf.xml.test",
            Self::WebConfig => "galaxy.ini",
            Self::ToolConf => "tool_conf.xml",
            Self::EmptyToolConf => "empty_tool_conf.xml",
            Self::ResolversConf => "resolvers_conf.xml",
            Self::JobMetricsConf => "job_metrics_conf.xml",
            Self::Database => "galaxy.sqlite",
            Self::InstallRoot => "galaxy-central-master",
            Self::DependencyDir => "deps",
        }
    }
}

impl AsRef<Path> for GalaxyPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for GalaxyPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for GalaxyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

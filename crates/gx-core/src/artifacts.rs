//! Generated files of a configuration session
//!
//! [`ArtifactLayout`] names every file inside the working directory;
//! [`ArtifactWriter`] renders and writes them. Writes overwrite in place.

use std::path::{Path, PathBuf};

use gx_fs::{GalaxyPath, io};

use crate::Result;
use crate::resolution::ResolverPlan;
use crate::template::{TemplateArgs, substitute};

pub const WEB_SERVER_CONFIG_TEMPLATE: &str = "
[server:main]
use = egg:Paste#http
port = ${port}
host = ${host}
use_threadpool = True
threadpool_kill_thread_limit = 10800
[app:main]
paste.app_factory = galaxy.web.buildapp:app_factory
";

pub const TOOL_CONF_TEMPLATE: &str = r#"<toolbox>
  <section id="data_source" name="Data Source">
    <tool file="data_source/upload.xml" />
  </section>
  <section id="testing" name="Test Tools">
    ${tool_definition}
  </section>
</toolbox>
"#;

pub const EMPTY_TOOL_CONF_TEMPLATE: &str = "<toolbox></toolbox>";

pub const EMPTY_JOB_METRICS_TEMPLATE: &str = r#"<?xml version="1.0"?>
<job_metrics>
</job_metrics>
"#;

/// Paths of the generated files inside one working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    pub root: PathBuf,
    pub web_config: PathBuf,
    pub tool_conf: PathBuf,
    pub empty_tool_conf: PathBuf,
    pub job_metrics_conf: PathBuf,
    pub database: PathBuf,
}

impl ArtifactLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            web_config: root.join(GalaxyPath::WebConfig),
            tool_conf: root.join(GalaxyPath::ToolConf),
            empty_tool_conf: root.join(GalaxyPath::EmptyToolConf),
            job_metrics_conf: root.join(GalaxyPath::JobMetricsConf),
            database: root.join(GalaxyPath::Database),
        }
    }
}

/// Tool registry entry for `tool_path`: a directory entry when it is a
/// directory, a file entry otherwise.
pub fn tool_definition(tool_path: &Path) -> String {
    let escaped = escape_attribute(&tool_path.display().to_string());
    if tool_path.is_dir() {
        format!(r#"<tool_dir dir="{escaped}" />"#)
    } else {
        format!(r#"<tool file="{escaped}" />"#)
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Writes the session's files into an [`ArtifactLayout`].
#[derive(Debug)]
pub struct ArtifactWriter<'a> {
    layout: &'a ArtifactLayout,
}

impl<'a> ArtifactWriter<'a> {
    pub fn new(layout: &'a ArtifactLayout) -> Self {
        Self { layout }
    }

    /// Write the resolver document of a stock strategy. A caller-provided
    /// config is left untouched.
    pub fn write_resolver(&self, plan: &ResolverPlan) -> Result<()> {
        let Some(document) = plan.document else {
            return Ok(());
        };
        io::write_text(&plan.config_file, document)?;
        tracing::info!(path = %plan.config_file.display(), "wrote dependency resolver config");
        Ok(())
    }

    /// Write the empty job metrics document.
    pub fn write_job_metrics(&self) -> Result<()> {
        io::write_text(&self.layout.job_metrics_conf, EMPTY_JOB_METRICS_TEMPLATE)?;
        Ok(())
    }

    /// Render and write the web-server config and both tool registries.
    pub fn write_configs(&self, args: &TemplateArgs) -> Result<()> {
        let args = args.to_map();

        io::write_text(
            &self.layout.web_config,
            &substitute(WEB_SERVER_CONFIG_TEMPLATE, &args),
        )?;
        io::write_text(&self.layout.tool_conf, &substitute(TOOL_CONF_TEMPLATE, &args))?;
        io::write_text(&self.layout.empty_tool_conf, EMPTY_TOOL_CONF_TEMPLATE)?;

        tracing::info!(dir = %self.layout.root.display(), "wrote Galaxy config files");
        Ok(())
    }
}

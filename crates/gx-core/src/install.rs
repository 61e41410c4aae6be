//! On-demand Galaxy installation
//!
//! The install is a fixed shell pipeline run inside the working directory.
//! It either succeeds and leaves Galaxy under
//! `<workdir>/galaxy-central-master`, or fails the whole session.

use std::path::{Path, PathBuf};
use std::process::Command;

use gx_fs::GalaxyPath;

use crate::{Error, Result};

/// Leave any active virtualenv so the new one is created cleanly.
pub const DEACTIVATE_COMMAND: &str = "type deactivate >/dev/null 2>&1 && deactivate";

pub const DOWNLOAD_GALAXY: &str =
    "wget https://codeload.github.com/galaxyproject/galaxy/tar.gz/master \
     || curl -L -o master https://codeload.github.com/galaxyproject/galaxy/tar.gz/master";

/// Installs Galaxy into a working directory and returns its root.
pub trait Installer {
    fn install(&self, workdir: &Path) -> Result<PathBuf>;
}

/// Shell commands, in order, that install Galaxy into `workdir`.
pub fn install_commands(workdir: &Path) -> Vec<String> {
    vec![
        DEACTIVATE_COMMAND.to_string(),
        format!("cd {}", shell_quote(&workdir.display().to_string())),
        DOWNLOAD_GALAXY.to_string(),
        "tar -zxvf master | tail".to_string(),
        format!("cd {}", GalaxyPath::InstallRoot),
        "virtualenv .venv".to_string(),
        ". .venv/bin/activate; sh scripts/common_startup.sh".to_string(),
    ]
}

/// Single-quote `value` for `sh`, closing and reopening the quotes around
/// each embedded `'`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// [`Installer`] running [`install_commands`] through `sh -c`.
#[derive(Debug, Clone)]
pub struct ShellInstaller {
    shell: String,
}

impl Default for ShellInstaller {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }
}

impl ShellInstaller {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Run `script` with the configured shell in `workdir`.
    pub fn run_script(&self, script: &str, workdir: &Path) -> Result<()> {
        tracing::info!(dir = %workdir.display(), "installing Galaxy");
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(script)
            .current_dir(workdir)
            .output()
            .map_err(|e| Error::InstallFailed {
                command: self.shell.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr_snippet = stderr.trim();
            let message = if stderr_snippet.is_empty() {
                format!(
                    "exited with non-zero status (exit code: {:?})",
                    output.status.code()
                )
            } else {
                format!(
                    "exited with non-zero status (exit code: {:?}): {}",
                    output.status.code(),
                    stderr_snippet
                )
            };
            return Err(Error::InstallFailed {
                command: script.to_string(),
                message,
            });
        }

        Ok(())
    }
}

impl Installer for ShellInstaller {
    fn install(&self, workdir: &Path) -> Result<PathBuf> {
        self.run_script(&install_commands(workdir).join(";"), workdir)?;
        Ok(workdir.join(GalaxyPath::InstallRoot))
    }
}

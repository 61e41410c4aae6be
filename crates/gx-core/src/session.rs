//! Configuration session lifecycle
//!
//! A session moves through [`SessionState`] strictly forward:
//!
//! ```text
//! Initializing -> Resolving -> Writing -> Ready -> Released
//!        \            \           \
//!         +------------+-----------+------> Released   (on error)
//! ```
//!
//! Only a `Ready` session hands out a [`ConfigurationResult`]. The working
//! directory is held by a [`WorkingDirectory`] guard: an ephemeral directory
//! is removed on every exit path, a caller-provided one is never removed.

use std::fmt;
use std::path::{Path, PathBuf};

use gx_fs::{absolutize, io};
use tempfile::TempDir;

use crate::artifacts::{ArtifactLayout, ArtifactWriter, tool_definition};
use crate::config::{ConfigurationRequest, GlobalConfig};
use crate::env::{Environment, build_environment};
use crate::install::{Installer, ShellInstaller};
use crate::paths::ResolvedPaths;
use crate::properties::{PropertyInputs, PropertyMap, derive_properties};
use crate::resolution::DependencyResolution;
use crate::snapshot::{HttpSnapshotFetcher, SnapshotFetcher, SnapshotOutcome, fetch_snapshot};
use crate::template::TemplateArgs;
use crate::Result;

/// Prefix of ephemeral working directory names.
pub const WORKDIR_PREFIX: &str = "gx-harness-";

/// Process-level inputs of a session.
///
/// Holds what would otherwise be read from global state: the working
/// directory used for discovery, user-level defaults, and the collaborators
/// that reach outside the machine.
pub struct SessionContext {
    pub cwd: PathBuf,
    pub global: GlobalConfig,
    installer: Box<dyn Installer>,
    fetcher: Box<dyn SnapshotFetcher>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("cwd", &self.cwd)
            .field("global", &self.global)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Context rooted at `cwd` with default global config, the shell
    /// installer and the HTTP snapshot fetcher.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            global: GlobalConfig::default(),
            installer: Box::new(ShellInstaller::default()),
            fetcher: Box::new(HttpSnapshotFetcher::default()),
        }
    }

    /// Context for the running process: its current directory and the
    /// user's global config.
    pub fn from_environment() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd).with_global(GlobalConfig::load()?))
    }

    pub fn with_global(mut self, global: GlobalConfig) -> Self {
        self.global = global;
        self
    }

    pub fn with_installer(mut self, installer: impl Installer + 'static) -> Self {
        self.installer = Box::new(installer);
        self
    }

    pub fn with_fetcher(mut self, fetcher: impl SnapshotFetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }
}

/// Lifecycle state of a [`ConfigSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    Resolving,
    Writing,
    Ready,
    Released,
}

fn advance(state: &mut SessionState, next: SessionState) {
    tracing::debug!(from = ?*state, to = ?next, "configuration session state change");
    *state = next;
}

/// Scoped working directory.
#[derive(Debug)]
pub enum WorkingDirectory {
    /// Created by the session and removed on release
    Ephemeral(TempDir),
    /// Supplied by the caller; written into, never removed
    Provided(PathBuf),
}

impl WorkingDirectory {
    /// Use `requested` (created if missing) or a fresh temporary directory.
    pub fn acquire(requested: Option<&Path>, cwd: &Path) -> Result<Self> {
        match requested.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => {
                let path = absolutize(path, cwd);
                io::ensure_dir(&path)?;
                tracing::debug!(dir = %path.display(), "using caller-provided config directory");
                Ok(Self::Provided(path))
            }
            None => {
                let dir = tempfile::Builder::new().prefix(WORKDIR_PREFIX).tempdir()?;
                tracing::debug!(dir = %dir.path().display(), "created ephemeral config directory");
                Ok(Self::Ephemeral(dir))
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Ephemeral(dir) => dir.path(),
            Self::Provided(path) => path,
        }
    }

    /// Whether releasing removes the directory.
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Ephemeral(_))
    }

    /// Remove the directory if the session owns it.
    pub fn release(self) -> Result<()> {
        if let Self::Ephemeral(dir) = self {
            let path = dir.path().to_path_buf();
            dir.close().map_err(|e| gx_fs::Error::io(&path, e))?;
            tracing::debug!(dir = %path.display(), "removed ephemeral config directory");
        }
        Ok(())
    }
}

/// What a ready session yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationResult {
    pub application_root: PathBuf,
    /// Directory holding every generated artifact
    pub config_directory: PathBuf,
    /// Variables to launch Galaxy with
    pub environment: Environment,
    pub test_data_dir: Option<PathBuf>,
    /// Properties before rendering, as exported through `environment`
    pub properties: PropertyMap,
    pub snapshot: SnapshotOutcome,
}

/// A ready configuration and the working directory it lives in.
///
/// Dropping the session releases it; [`ConfigSession::release`] does the
/// same but reports removal errors.
#[derive(Debug)]
pub struct ConfigSession {
    state: SessionState,
    workdir: Option<WorkingDirectory>,
    result: ConfigurationResult,
}

impl ConfigSession {
    /// Resolve, write and assemble the configuration for `request`.
    ///
    /// Conflicting options are rejected before anything touches the disk.
    /// On any error the working directory is released before returning.
    pub fn open(request: &ConfigurationRequest, ctx: &SessionContext) -> Result<Self> {
        let mut state = SessionState::Initializing;
        let opened = Self::prepare(request, ctx, &mut state);
        if let Err(e) = &opened {
            tracing::debug!(error = %e, "configuration session failed");
            advance(&mut state, SessionState::Released);
        }
        opened
    }

    fn prepare(
        request: &ConfigurationRequest,
        ctx: &SessionContext,
        state: &mut SessionState,
    ) -> Result<Self> {
        let resolution = DependencyResolution::select(&request.options)?;

        advance(state, SessionState::Resolving);
        let paths =
            ResolvedPaths::resolve(&request.tool_path, &request.options, &ctx.global, &ctx.cwd)?;
        let workdir =
            WorkingDirectory::acquire(request.options.config_directory.as_deref(), &ctx.cwd)?;

        advance(state, SessionState::Writing);
        match assemble(request, ctx, &paths, &resolution, workdir.path()) {
            Ok(result) => {
                advance(state, SessionState::Ready);
                Ok(Self {
                    state: *state,
                    workdir: Some(workdir),
                    result,
                })
            }
            Err(e) => {
                if let Err(release_error) = workdir.release() {
                    tracing::warn!(error = %release_error, "failed to remove config directory");
                }
                Err(e)
            }
        }
    }

    /// The assembled configuration; valid for the session's lifetime only.
    pub fn result(&self) -> &ConfigurationResult {
        &self.result
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether releasing the session removes its working directory.
    pub fn owns_working_directory(&self) -> bool {
        self.workdir.as_ref().is_some_and(WorkingDirectory::is_owned)
    }

    /// Release the session, removing an ephemeral working directory.
    pub fn release(mut self) -> Result<()> {
        let released = match self.workdir.take() {
            Some(workdir) => workdir.release(),
            None => Ok(()),
        };
        advance(&mut self.state, SessionState::Released);
        released
    }
}

impl Drop for ConfigSession {
    fn drop(&mut self) {
        if let Some(workdir) = self.workdir.take() {
            if let Err(e) = workdir.release() {
                tracing::warn!(error = %e, "failed to remove config directory");
            }
            advance(&mut self.state, SessionState::Released);
        }
    }
}

fn assemble(
    request: &ConfigurationRequest,
    ctx: &SessionContext,
    paths: &ResolvedPaths,
    resolution: &DependencyResolution,
    workdir: &Path,
) -> Result<ConfigurationResult> {
    let options = &request.options;
    let layout = ArtifactLayout::new(workdir);
    let writer = ArtifactWriter::new(&layout);

    let application_root = match &paths.application_root {
        Some(root) => root.clone(),
        None => ctx.installer.install(workdir)?,
    };

    let resolver = resolution.plan(workdir);
    if let Some(plan) = &resolver {
        writer.write_resolver(plan)?;
    }
    writer.write_job_metrics()?;

    let snapshot = if options.fetch_database {
        fetch_snapshot(ctx.fetcher.as_ref(), &options.database_template_url, &layout.database)
    } else {
        tracing::debug!("database snapshot download disabled");
        SnapshotOutcome::unavailable()
    };

    let tool_path = absolutize(&request.tool_path, &ctx.cwd);
    let args = TemplateArgs {
        port: options.port,
        host: options.host.clone(),
        temp_directory: workdir.to_path_buf(),
        database_location: layout.database.clone(),
        tool_definition: tool_definition(&tool_path),
        tool_conf: layout.tool_conf.clone(),
        debug: options.debug,
        master_api_key: options.master_api_key.clone(),
        id_secret: options.id_secret.clone(),
        log_level: options.log_level.clone(),
    };

    let properties = derive_properties(&PropertyInputs {
        layout: &layout,
        paths,
        resolver: resolver.as_ref(),
        options,
        for_tests: request.for_tests,
    });
    let environment = build_environment(&properties, &args, &snapshot);

    writer.write_configs(&args)?;

    Ok(ConfigurationResult {
        application_root,
        config_directory: workdir.to_path_buf(),
        environment,
        test_data_dir: paths.test_data_dir.clone(),
        properties,
        snapshot,
    })
}

/// Run `f` against a ready configuration, then release it.
pub fn with_galaxy_config<T>(
    request: &ConfigurationRequest,
    ctx: &SessionContext,
    f: impl FnOnce(&ConfigurationResult) -> T,
) -> Result<T> {
    let session = ConfigSession::open(request, ctx)?;
    let value = f(session.result());
    session.release()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_directory_is_removed_on_release() {
        let cwd = tempfile::TempDir::new().unwrap();
        let workdir = WorkingDirectory::acquire(None, cwd.path()).unwrap();
        let path = workdir.path().to_path_buf();
        assert!(workdir.is_owned());
        assert!(path.is_dir());

        workdir.release().unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn ephemeral_directory_is_removed_on_drop() {
        let cwd = tempfile::TempDir::new().unwrap();
        let path = {
            let workdir = WorkingDirectory::acquire(None, cwd.path()).unwrap();
            workdir.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn provided_directory_is_created_and_kept() {
        let cwd = tempfile::TempDir::new().unwrap();
        let workdir =
            WorkingDirectory::acquire(Some(Path::new("configs/run1")), cwd.path()).unwrap();
        let path = workdir.path().to_path_buf();
        assert_eq!(path, cwd.path().join("configs/run1"));
        assert!(!workdir.is_owned());

        workdir.release().unwrap();

        assert!(path.is_dir());
    }

    #[test]
    fn advance_records_next_state() {
        let mut state = SessionState::Initializing;
        advance(&mut state, SessionState::Resolving);
        assert_eq!(state, SessionState::Resolving);
    }
}

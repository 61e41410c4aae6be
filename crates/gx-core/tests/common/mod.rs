//! Fakes and helpers shared by the gx-core integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use gx_core::{
    ConfigOptions, ConfigurationRequest, Error, GlobalConfig, Installer, Result, SessionContext,
    SnapshotFetcher,
};
use gx_test_utils::workspace::TestWorkspace;
use tracing_subscriber::fmt::MakeWriter;

/// Fetcher that always fails, as if offline.
pub struct Offline;

impl SnapshotFetcher for Offline {
    fn fetch(&self, url: &str, _destination: &Path) -> Result<()> {
        Err(Error::Snapshot {
            url: url.to_string(),
            message: "offline".into(),
        })
    }
}

/// Fetcher that writes a fixed body.
pub struct StaticSnapshot(pub &'static str);

impl SnapshotFetcher for StaticSnapshot {
    fn fetch(&self, _url: &str, destination: &Path) -> Result<()> {
        fs::write(destination, self.0)?;
        Ok(())
    }
}

/// Installer that only creates the install root directory.
pub struct FakeInstaller;

impl Installer for FakeInstaller {
    fn install(&self, workdir: &Path) -> Result<PathBuf> {
        let root = workdir.join("galaxy-central-master");
        fs::create_dir_all(&root)?;
        Ok(root)
    }
}

/// Installer that fails after leaving a partial download behind.
pub struct BrokenInstaller;

impl Installer for BrokenInstaller {
    fn install(&self, workdir: &Path) -> Result<PathBuf> {
        fs::write(workdir.join("master"), "partial")?;
        Err(Error::InstallFailed {
            command: "tar -zxvf master".into(),
            message: "unexpected end of file".into(),
        })
    }
}

/// Installer that succeeds but leaves a directory where `galaxy.ini` must
/// be written, so the config write fails regardless of permissions.
#[derive(Default)]
pub struct ObstructingInstaller {
    seen: Arc<Mutex<Option<PathBuf>>>,
}

impl ObstructingInstaller {
    /// Working directory the installer was handed, once it ran.
    pub fn seen(&self) -> Arc<Mutex<Option<PathBuf>>> {
        Arc::clone(&self.seen)
    }
}

impl Installer for ObstructingInstaller {
    fn install(&self, workdir: &Path) -> Result<PathBuf> {
        *self.seen.lock().unwrap() = Some(workdir.to_path_buf());
        fs::create_dir_all(workdir.join("galaxy.ini"))?;
        FakeInstaller.install(workdir)
    }
}

/// Context rooted at the workspace `cwd/` with a fake Galaxy root configured
/// globally and an offline fetcher.
pub fn context(ws: &TestWorkspace) -> SessionContext {
    let root = ws.add_galaxy_root();
    SessionContext::new(ws.cwd())
        .with_global(GlobalConfig {
            galaxy_root: Some(root),
        })
        .with_fetcher(Offline)
}

pub fn request(tool: &Path, options: ConfigOptions) -> ConfigurationRequest {
    ConfigurationRequest::new(tool).with_options(options)
}

/// Writer collecting formatted log output in memory.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with warnings and above captured; returns its value and the log text.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, logs.contents())
}

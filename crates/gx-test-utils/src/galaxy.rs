//! Fake Galaxy installation roots.

use std::fs;
use std::path::Path;

/// Mark `path` as a Galaxy root: a `run.sh` launcher and a `config/`
/// directory, nothing else.
///
/// Enough for root discovery; nothing here can actually be started.
///
/// # Panics
/// Panics if the filesystem operations fail.
pub fn fake_galaxy_root(path: &Path) {
    fs::create_dir_all(path.join("config"))
        .unwrap_or_else(|e| panic!("fake_galaxy_root: failed to create config/: {e}"));
    fs::write(path.join("run.sh"), "#!/bin/sh\nexit 0\n")
        .unwrap_or_else(|e| panic!("fake_galaxy_root: failed to write run.sh: {e}"));
}

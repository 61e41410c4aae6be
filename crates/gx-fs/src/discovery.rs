//! Discovery of tool-adjacent assets and of the Galaxy root
//!
//! Two independent searches live here:
//!
//! - [`find_associated_path`] looks for a named entry next to a tool, then in
//!   the working directory, then in caller-supplied directories.
//! - [`find_application_root`] walks upward from a starting directory until
//!   it finds a directory carrying both root markers.
//!
//! Neither search touches process state: the working directory is passed in.

use std::path::{Path, PathBuf};

use crate::{GalaxyPath, absolutize};

/// Directory a tool's neighbours are searched in.
///
/// A directory tool is searched within; a tool file is searched beside.
pub fn search_root_for(tool_path: &Path) -> PathBuf {
    if tool_path.is_dir() {
        return tool_path.to_path_buf();
    }
    match tool_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Find `target` next to `tool_path`, in `cwd`, or in `extra_dirs`.
///
/// Candidates are checked in that order and the first existing one is
/// returned as an absolute path. Relative inputs are resolved against `cwd`.
pub fn find_associated_path(
    tool_path: &Path,
    target: &str,
    extra_dirs: &[PathBuf],
    cwd: &Path,
) -> Option<PathBuf> {
    let tool_path = absolutize(tool_path, cwd);
    let mut candidates = vec![search_root_for(&tool_path), cwd.to_path_buf()];
    candidates.extend(extra_dirs.iter().map(|dir| absolutize(dir, cwd)));

    for dir in candidates {
        let candidate = dir.join(target);
        if candidate.exists() {
            tracing::debug!(target, found = %candidate.display(), "discovered associated path");
            return Some(absolutize(candidate, cwd));
        }
    }

    tracing::debug!(target, tool = %tool_path.display(), "no associated path found");
    None
}

/// Check whether `dir` looks like a Galaxy root.
pub fn is_application_root(dir: &Path) -> bool {
    dir.join(GalaxyPath::RunScript).is_file() && dir.join(GalaxyPath::ConfigDir).is_dir()
}

/// Walk from `start` towards the filesystem root and return the first
/// directory that [`is_application_root`].
pub fn find_application_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_application_root(dir))
        .map(Path::to_path_buf)
}

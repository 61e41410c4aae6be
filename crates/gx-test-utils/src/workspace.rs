//! [`TestWorkspace`] builder for configuration scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::galaxy::fake_galaxy_root;

/// A temporary directory holding a `tools/` tree and a separate `cwd/`
/// used as the session's working directory.
///
/// # Example
///
/// ```rust,no_run
/// use gx_test_utils::workspace::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// let tool = ws.add_tool_file("cat.xml");
/// ws.add_test_data();
/// ws.assert_file_exists("tools/test-data");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create `tools/` and `cwd/` under a fresh temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("tools")).unwrap();
        fs::create_dir_all(temp_dir.path().join("cwd")).unwrap();
        Self { temp_dir }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.root().join("tools")
    }

    /// Directory to use as the current working directory.
    pub fn cwd(&self) -> PathBuf {
        self.root().join("cwd")
    }

    /// Write a minimal tool XML file into `tools/`.
    pub fn add_tool_file(&self, name: &str) -> PathBuf {
        let path = self.tools_dir().join(name);
        let id = name.trim_end_matches(".xml");
        fs::write(&path, format!("<tool id=\"{id}\" name=\"{id}\" version=\"0.1.0\"/>\n"))
            .unwrap();
        path
    }

    /// Create `tools/test-data/`.
    pub fn add_test_data(&self) -> PathBuf {
        let path = self.tools_dir().join("test-data");
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write `tool_data_table_conf.xml.test` into `dir` (relative to root).
    pub fn add_data_table(&self, dir: &str) -> PathBuf {
        let parent = self.root().join(dir);
        fs::create_dir_all(&parent).unwrap();
        let path = parent.join("tool_data_table_conf.xml.test");
        fs::write(&path, "<tables></tables>\n").unwrap();
        path
    }

    /// Create a fake Galaxy root at `galaxy/` and return it.
    pub fn add_galaxy_root(&self) -> PathBuf {
        let path = self.root().join("galaxy");
        fake_galaxy_root(&path);
        path
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &Path, content: &str) {
        let file_content = fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path.display(),
            content,
            file_content
        );
    }
}

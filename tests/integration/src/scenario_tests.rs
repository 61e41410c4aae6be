//! Scenario tests for the user-facing failure and fallback paths

use gx_core::{
    ConfigOptions, ConfigSession, ConfigurationRequest, Error, SessionContext, SnapshotFetcher,
    with_galaxy_config,
};
use gx_test_utils::workspace::TestWorkspace;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

struct Unreachable;

impl SnapshotFetcher for Unreachable {
    fn fetch(&self, url: &str, destination: &Path) -> gx_core::Result<()> {
        // Simulates a connection dropped mid-download
        fs::write(destination, b"SQLite for").unwrap();
        Err(Error::Snapshot {
            url: url.to_string(),
            message: "connection reset by peer".into(),
        })
    }
}

#[test]
fn test_without_galaxy_root_asks_for_one() {
    let ws = TestWorkspace::new();
    let tool = ws.add_tool_file("cat.xml");
    let ctx = SessionContext::new(ws.cwd()).with_fetcher(Unreachable);

    let err = ConfigSession::open(&ConfigurationRequest::new(&tool), &ctx).unwrap_err();

    assert!(matches!(err, Error::RootNotFound));
    assert_eq!(
        err.to_string(),
        "Failed to find Galaxy root directory - please explicitly specify one with --galaxy_root."
    );
}

#[test]
fn test_failed_snapshot_falls_back_to_fresh_database() {
    let ws = TestWorkspace::new();
    let tool = ws.add_tool_file("cat.xml");
    let galaxy = ws.add_galaxy_root();
    let options = ConfigOptions {
        galaxy_root: Some(galaxy),
        ..ConfigOptions::default()
    };
    let ctx = SessionContext::new(ws.cwd()).with_fetcher(Unreachable);
    let request = ConfigurationRequest::new(&tool).with_options(options);

    let (fetched, partial_left, env) = with_galaxy_config(&request, &ctx, |result| {
        (
            result.snapshot.fetched,
            result.config_directory.join("galaxy.sqlite").exists(),
            result.environment.clone(),
        )
    })
    .unwrap();

    assert!(!fetched);
    assert!(!partial_left);
    assert!(!env.contains_key("GALAXY_TEST_DB_TEMPLATE"));
    assert!(env["GALAXY_CONFIG_OVERRIDE_DATABASE_CONNECTION"].contains("galaxy.sqlite"));
}

#[test]
fn test_provided_config_directory_is_reusable() {
    let ws = TestWorkspace::new();
    let tool = ws.add_tool_file("cat.xml");
    let galaxy = ws.add_galaxy_root();
    let provided = ws.root().join("galaxy-config");
    let options = ConfigOptions {
        galaxy_root: Some(galaxy),
        config_directory: Some(provided.clone()),
        ..ConfigOptions::default()
    };
    let ctx = SessionContext::new(ws.cwd()).with_fetcher(Unreachable);
    let request = ConfigurationRequest::new(&tool).with_options(options);

    // A second session over the same directory overwrites the first's files
    for _ in 0..2 {
        let dir: PathBuf =
            with_galaxy_config(&request, &ctx, |result| result.config_directory.clone()).unwrap();
        assert_eq!(dir, provided);
    }

    ws.assert_file_exists("galaxy-config/galaxy.ini");
    ws.assert_file_contains(&provided.join("tool_conf.xml"), "cat.xml");
}

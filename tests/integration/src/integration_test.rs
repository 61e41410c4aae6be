//! End-to-end integration test for a full configuration session
//!
//! This test exercises the complete flow: options file -> discovery ->
//! artifact writing -> environment -> release.

use gx_core::{
    ConfigOptions, ConfigSession, ConfigurationRequest, Error, GlobalConfig, SessionContext,
    SnapshotFetcher,
};
use gx_fs::{ConfigStore, NormalizedPath, is_application_root};
use gx_test_utils::galaxy::fake_galaxy_root;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Offline;

impl SnapshotFetcher for Offline {
    fn fetch(&self, url: &str, _destination: &Path) -> gx_core::Result<()> {
        Err(Error::Snapshot {
            url: url.to_string(),
            message: "network disabled in tests".into(),
        })
    }
}

/// A tool repository nested inside a Galaxy checkout:
///
/// ```text
/// galaxy/
///   run.sh
///   config/
///   tools/seqtk/
///     seqtk_seq.xml
///     test-data/
///       tool_data_table_conf.xml.test
/// ```
fn setup_checkout() -> TempDir {
    let temp = TempDir::new().unwrap();
    let galaxy = temp.path().join("galaxy");
    fake_galaxy_root(&galaxy);

    let tool_dir = galaxy.join("tools/seqtk");
    fs::create_dir_all(tool_dir.join("test-data")).unwrap();
    fs::write(
        tool_dir.join("seqtk_seq.xml"),
        "<tool id=\"seqtk_seq\" name=\"seqtk seq\" version=\"1.0\"/>\n",
    )
    .unwrap();
    fs::write(
        tool_dir.join("test-data/tool_data_table_conf.xml.test"),
        "<tables></tables>\n",
    )
    .unwrap();

    temp
}

#[test]
fn test_options_file_drives_full_session() {
    let temp = setup_checkout();
    let galaxy = temp.path().join("galaxy");
    let tool_dir = galaxy.join("tools/seqtk");
    let options_path = temp.path().join("harness.yaml");
    fs::write(
        &options_path,
        "port: 9191\nbrew_dependency_resolution: true\nfetch_database: false\n",
    )
    .unwrap();

    // Load and validate the options the way an embedding CLI would
    let options = ConfigOptions::load(&options_path).unwrap();
    options.validate().unwrap();
    assert_eq!(options.port, 9191);

    // Galaxy root is found by walking up from the tool directory
    let ctx = SessionContext::new(&tool_dir).with_fetcher(Offline);
    let request = ConfigurationRequest::new("seqtk_seq.xml")
        .for_tests(true)
        .with_options(options);
    let session = ConfigSession::open(&request, &ctx).unwrap();
    let result = session.result();

    assert!(is_application_root(&result.application_root));
    assert_eq!(result.application_root, galaxy);
    assert_eq!(result.test_data_dir, Some(tool_dir.join("test-data")));

    let env = &result.environment;
    assert_eq!(
        env["GALAXY_CONFIG_OVERRIDE_TOOL_DATA_TABLE_CONFIG_PATH"],
        tool_dir
            .join("test-data/tool_data_table_conf.xml.test")
            .display()
            .to_string()
    );
    assert!(env.contains_key("GALAXY_CONFIG_OVERRIDE_TOOL_DEPENDENCY_DIR"));
    assert!(!env.contains_key("GALAXY_CONFIG_OVERRIDE_DATABASE_CONNECTION"));
    assert!(!env.contains_key("GALAXY_TEST_DB_TEMPLATE"));

    let ini = fs::read_to_string(result.config_directory.join("galaxy.ini")).unwrap();
    assert!(ini.contains("port = 9191"));
    let tool_conf = fs::read_to_string(result.config_directory.join("tool_conf.xml")).unwrap();
    assert!(tool_conf.contains(&tool_dir.join("seqtk_seq.xml").display().to_string()));

    let workdir = result.config_directory.clone();
    session.release().unwrap();
    assert!(!workdir.exists());
}

#[test]
fn test_conflicting_options_file_is_rejected_up_front() {
    let temp = setup_checkout();
    let options_path = temp.path().join("harness.json");
    fs::write(
        &options_path,
        r#"{"brew_dependency_resolution": true, "dependency_resolvers_config_file": "/etc/r.xml"}"#,
    )
    .unwrap();

    let options = ConfigOptions::load(&options_path).unwrap();
    let err = options.validate().unwrap_err();

    assert!(err.is_user_error());
    assert!(err.to_string().contains("brew_dependency_resolution"));
    assert!(err.to_string().contains("dependency_resolvers_config_file"));
}

#[test]
fn test_unknown_option_keys_are_ignored() {
    let temp = setup_checkout();
    let galaxy = temp.path().join("galaxy");
    let options_path = temp.path().join("harness.yaml");
    fs::write(
        &options_path,
        "port: 9191\nfile_path: /elsewhere\nupdate_test_data: true\nfetch_database: false\n",
    )
    .unwrap();

    let options = ConfigOptions::load(&options_path).unwrap();
    assert_eq!(options.port, 9191);
    assert_eq!(options.ignored.len(), 2);

    let ctx = SessionContext::new(&galaxy).with_fetcher(Offline);
    let request =
        ConfigurationRequest::new(galaxy.join("tools/seqtk/seqtk_seq.xml")).with_options(options);
    let session = ConfigSession::open(&request, &ctx).unwrap();
    let result = session.result();

    // Only the overridable properties can be set from options
    assert_eq!(
        result.environment["GALAXY_CONFIG_OVERRIDE_FILE_PATH"],
        result.config_directory.join("files").display().to_string()
    );
    assert!(!result
        .environment
        .contains_key("GALAXY_CONFIG_OVERRIDE_UPDATE_TEST_DATA"));
}

#[test]
fn test_mistyped_option_value_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let options_path = temp.path().join("harness.toml");
    fs::write(&options_path, "port = \"ninety\"\n").unwrap();

    let err = ConfigOptions::load(&options_path).unwrap_err();

    assert!(matches!(err, Error::Fs(gx_fs::Error::ConfigParse { .. })));
}

#[test]
fn test_global_config_is_shared_across_sessions() {
    let temp = setup_checkout();
    let galaxy = temp.path().join("galaxy");
    let elsewhere = temp.path().join("elsewhere");
    fs::create_dir_all(&elsewhere).unwrap();
    let tool = galaxy.join("tools/seqtk/seqtk_seq.xml");

    let config_dir = temp.path().join("global");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.json"),
        format!(r#"{{"galaxy_root": "{}"}}"#, galaxy.display()),
    )
    .unwrap();
    let global: GlobalConfig = ConfigStore::new()
        .load(&NormalizedPath::new(config_dir.join("config.json")))
        .unwrap();
    assert_eq!(global, GlobalConfig::load_from_dir(&config_dir).unwrap());

    let ctx = SessionContext::new(&elsewhere)
        .with_global(global)
        .with_fetcher(Offline);
    let request = ConfigurationRequest::new(&tool);

    let first = ConfigSession::open(&request, &ctx).unwrap();
    let second = ConfigSession::open(&request, &ctx).unwrap();

    assert_eq!(first.result().application_root, galaxy);
    assert_eq!(second.result().application_root, galaxy);
    assert_ne!(
        first.result().config_directory,
        second.result().config_directory
    );
}

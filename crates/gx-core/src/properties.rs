//! Galaxy property derivation
//!
//! Properties are built in layers, each later layer writing over earlier ones:
//!
//! 1. Built-in defaults, mostly paths under `${temp_directory}`
//! 2. Values derived from discovery, resolver selection and the artifact layout
//! 3. Caller overrides, restricted to [`OVERRIDABLE_PROPERTIES`]
//! 4. The live database connection, outside test mode only
//!
//! Values may still contain `${...}` placeholders; they are rendered when the
//! environment is built.

use std::collections::BTreeMap;
use std::path::Path;

use crate::artifacts::ArtifactLayout;
use crate::config::{ConfigOptions, given};
use crate::paths::ResolvedPaths;
use crate::resolution::ResolverPlan;

/// Key of the live database connection property.
pub const DATABASE_CONNECTION: &str = "database_connection";

/// Value of [`DATABASE_CONNECTION`] before rendering.
pub const DATABASE_CONNECTION_TEMPLATE: &str =
    "sqlite:///${database_location}?isolation_level=IMMEDIATE";

/// Properties a caller may set directly. Everything else follows from where
/// files actually are.
pub const OVERRIDABLE_PROPERTIES: [&str; 4] = [
    "job_config_file",
    "job_metrics_config_file",
    "dependency_resolvers_config_file",
    "tool_dependency_dir",
];

const DEFAULT_PROPERTIES: &[(&str, &str)] = &[
    ("file_path", "${temp_directory}/files"),
    ("new_file_path", "${temp_directory}/tmp"),
    ("check_migrate_tools", "False"),
    ("manage_dependency_relationships", "False"),
    ("job_working_directory", "${temp_directory}/job_working_directory"),
    ("template_cache_path", "${temp_directory}/compiled_templates"),
    ("citation_cache_type", "file"),
    ("citation_cache_data_dir", "${temp_directory}/citations/data"),
    ("citation_cache_lock_dir", "${temp_directory}/citations/lock"),
    ("collect_outputs_from", "job_working_directory"),
    ("database_auto_migrate", "True"),
    ("cleanup_job", "never"),
    ("master_api_key", "${master_api_key}"),
    ("id_secret", "${id_secret}"),
    ("log_level", "${log_level}"),
    ("debug", "${debug}"),
    (
        "integrated_tool_panel_config",
        "${temp_directory}/integrated_tool_panel_conf.xml",
    ),
    // In-memory kombu database avoids contention during tests
    ("amqp_internal_connection", "sqlalchemy+sqlite://"),
];

/// Canonical Galaxy property name to (possibly templated) value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: BTreeMap<String, String>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding the built-in defaults.
    pub fn defaults() -> Self {
        let mut map = Self::new();
        for (key, value) in DEFAULT_PROPERTIES {
            map.set(*key, *value);
        }
        map
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn set_path(&mut self, key: impl Into<String>, value: &Path) {
        self.set(key, value.display().to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything property derivation reads.
#[derive(Debug, Clone, Copy)]
pub struct PropertyInputs<'a> {
    pub layout: &'a ArtifactLayout,
    pub paths: &'a ResolvedPaths,
    pub resolver: Option<&'a ResolverPlan>,
    pub options: &'a ConfigOptions,
    pub for_tests: bool,
}

/// Caller overrides for [`OVERRIDABLE_PROPERTIES`] that were actually given.
pub fn property_overrides(options: &ConfigOptions) -> Vec<(&'static str, &Path)> {
    let candidates = [
        (OVERRIDABLE_PROPERTIES[0], &options.job_config_file),
        (OVERRIDABLE_PROPERTIES[1], &options.job_metrics_config_file),
        (OVERRIDABLE_PROPERTIES[2], &options.dependency_resolvers_config_file),
        (OVERRIDABLE_PROPERTIES[3], &options.tool_dependency_dir),
    ];
    candidates
        .into_iter()
        .filter_map(|(key, value)| given(value).map(|path| (key, path)))
        .collect()
}

/// Build the property map for one session.
pub fn derive_properties(inputs: &PropertyInputs<'_>) -> PropertyMap {
    let mut properties = PropertyMap::defaults();

    properties.set_path("tool_config_file", &inputs.layout.tool_conf);
    properties.set_path("migrated_tools_config", &inputs.layout.empty_tool_conf);
    properties.set_path("job_metrics_config_file", &inputs.layout.job_metrics_conf);
    if let Some(table) = &inputs.paths.tool_data_table {
        properties.set_path("tool_data_table_config_path", table);
    }
    if let Some(test_data) = &inputs.paths.test_data_dir {
        properties.set_path("test_data_dir", test_data);
    }
    if let Some(plan) = inputs.resolver {
        properties.set_path("dependency_resolvers_config_file", &plan.config_file);
        if let Some(dir) = &plan.dependency_dir {
            properties.set_path("tool_dependency_dir", dir);
        }
    }

    for (key, value) in property_overrides(inputs.options) {
        tracing::debug!(key, value = %value.display(), "applying property override");
        properties.set_path(key, value);
    }

    if !inputs.for_tests {
        properties.set(DATABASE_CONNECTION, DATABASE_CONNECTION_TEMPLATE);
    }

    properties
}

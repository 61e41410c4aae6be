//! Property map to environment variable mapping
//!
//! Every property becomes `GALAXY_CONFIG_OVERRIDE_<KEY>`, rendered against
//! the template arguments. A fixed table of legacy test variables aliases a
//! few properties for older Galaxy test runners.

use std::collections::BTreeMap;

use crate::properties::PropertyMap;
use crate::snapshot::SnapshotOutcome;
use crate::template::{TemplateArgs, substitute};

/// Environment variable name to value.
pub type Environment = BTreeMap<String, String>;

pub const OVERRIDE_PREFIX: &str = "GALAXY_CONFIG_OVERRIDE_";

/// Legacy variable name to the property it mirrors.
pub const LEGACY_TEST_VARIABLES: &[(&str, &str)] = &[
    ("GALAXY_TEST_MIGRATED_TOOL_CONF", "migrated_tools_config"),
    ("GALAXY_TEST_SHED_TOOL_CONF", "migrated_tools_config"),
    ("GALAXY_TEST_TOOL_CONF", "tool_config_file"),
    ("GALAXY_TEST_FILE_DIR", "test_data_dir"),
    ("GALAXY_TOOL_DEPENDENCY_DIR", "tool_dependency_dir"),
];

pub const UPLOAD_ASYNC_VARIABLE: &str = "GALAXY_TEST_UPLOAD_ASYNC";
pub const DB_TEMPLATE_VARIABLE: &str = "GALAXY_TEST_DB_TEMPLATE";

/// Environment variable carrying the property `key`.
pub fn override_variable(key: &str) -> String {
    format!("{OVERRIDE_PREFIX}{}", key.to_uppercase())
}

/// Full environment for launching Galaxy with `properties`.
pub fn build_environment(
    properties: &PropertyMap,
    args: &TemplateArgs,
    snapshot: &SnapshotOutcome,
) -> Environment {
    let args = args.to_map();
    let mut env = Environment::new();

    for (key, value) in properties.iter() {
        env.insert(override_variable(key), substitute(value, &args));
    }

    for (variable, key) in LEGACY_TEST_VARIABLES {
        if let Some(value) = properties.get(key) {
            env.insert(variable.to_string(), substitute(value, &args));
        }
    }

    if let Some(url) = snapshot.source() {
        env.insert(DB_TEMPLATE_VARIABLE.to_string(), url.to_string());
    }
    env.insert(UPLOAD_ASYNC_VARIABLE.to_string(), "false".to_string());

    env
}

//! Safe `${name}` placeholder substitution
//!
//! Placeholders whose name has no value are left verbatim. Property values
//! are themselves templates that get rendered in a later pass, so a partial
//! render must never fail.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([_A-Za-z][_A-Za-z0-9]*)\}").unwrap());

/// Replace every `${key}` in `template` whose key is in `args`.
pub fn substitute(template: &str, args: &BTreeMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| match args.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// [`substitute`] for an optional template; `None` renders as empty.
pub fn substitute_opt(template: Option<&str>, args: &BTreeMap<String, String>) -> String {
    template.map(|t| substitute(t, args)).unwrap_or_default()
}

/// Interpolation values for the final rendering pass.
///
/// Distinct from the property map: these feed the templates, they are not
/// exported as properties themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateArgs {
    pub port: u16,
    pub host: String,
    pub temp_directory: PathBuf,
    pub database_location: PathBuf,
    pub tool_definition: String,
    pub tool_conf: PathBuf,
    pub debug: bool,
    pub master_api_key: String,
    pub id_secret: String,
    pub log_level: String,
}

impl TemplateArgs {
    /// Flatten into the lookup map used by [`substitute`].
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let path = |p: &Path| p.display().to_string();
        BTreeMap::from([
            ("port".to_string(), self.port.to_string()),
            ("host".to_string(), self.host.clone()),
            ("temp_directory".to_string(), path(&self.temp_directory)),
            ("database_location".to_string(), path(&self.database_location)),
            ("tool_definition".to_string(), self.tool_definition.clone()),
            ("tool_conf".to_string(), path(&self.tool_conf)),
            ("debug".to_string(), self.debug.to_string()),
            ("master_api_key".to_string(), self.master_api_key.clone()),
            ("id_secret".to_string(), self.id_secret.clone()),
            ("log_level".to_string(), self.log_level.clone()),
        ])
    }
}

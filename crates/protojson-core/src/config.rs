//! Generator configuration

use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};

/// Generator configuration, passed by protoc as the plugin parameter
///
/// The parameter is a comma-separated list of `key=value` pairs, for example
/// `--java-json_opt=log_level=debug,method_option=acme.http`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Log level filter for diagnostics written to stderr
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Name (short or fully-qualified) of the string field option naming a map's key sub-field
    #[serde(default = "default_map_key_option")]
    pub map_key_option: String,

    /// Name (short or fully-qualified) of the string field option naming a map's value sub-field
    #[serde(default = "default_map_value_option")]
    pub map_value_option: String,

    /// Name (short or fully-qualified) of the method option carrying `http_method` and `path`
    #[serde(default = "default_method_option")]
    pub method_option: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_map_key_option() -> String {
    "dx_map_key".to_string()
}

fn default_map_value_option() -> String {
    "dx_map_val".to_string()
}

fn default_method_option() -> String {
    "dx_method_options".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            map_key_option: default_map_key_option(),
            map_value_option: default_map_value_option(),
            method_option: default_method_option(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the protoc plugin parameter string
    ///
    /// An absent or blank parameter yields the defaults. Unknown keys and
    /// entries without `=` are rejected.
    pub fn from_parameter(parameter: Option<&str>) -> CodegenResult<Self> {
        let Some(parameter) = parameter else {
            return Ok(Self::default());
        };

        let mut entries = serde_json::Map::new();
        for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                CodegenError::Config(format!("expected key=value, got {part:?}"))
            })?;
            entries.insert(
                key.trim().to_string(),
                serde_json::Value::String(value.trim().to_string()),
            );
        }

        Ok(serde_json::from_value(serde_json::Value::Object(entries))?)
    }
}

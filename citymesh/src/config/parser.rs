//! INI config parsing
//!
//! Missing sections and keys fall back to defaults; present keys must
//! parse, and a value that doesn't is a [`ConfigError`], not a silent
//! fallback.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::settings::ConfigFile;
use crate::pipeline::FetchPolicy;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// File could not be read
    Io(String),
    /// File is not valid INI
    Parse(String),
    /// A present key failed to parse
    InvalidValue { key: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "invalid config file: {}", msg),
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid value for '{}': {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Loads configuration from an INI file on disk.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    parse_config(&text)
}

/// Parses configuration from INI text.
pub fn parse_config(text: &str) -> Result<ConfigFile, ConfigError> {
    let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    let mut config = ConfigFile::default();

    if let Some(section) = ini.section(Some("provider")) {
        if let Some(value) = section.get("base_url") {
            config.provider.base_url = value.to_string();
        }
        if let Some(value) = section.get("layer") {
            config.provider.layer = value.to_string();
        }
        if let Some(value) = section.get("properties") {
            config.provider.properties = value
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
        if let Some(value) = parse_key(section, "request_timeout_secs")? {
            config.provider.request_timeout_secs = value;
        }
    }

    if let Some(section) = ini.section(Some("pipeline")) {
        if let Some(value) = section.get("fetch_policy") {
            config.pipeline.fetch_policy = parse_fetch_policy(value)?;
        }
        if let Some(value) = parse_key(section, "winding")? {
            config.pipeline.winding = value;
        }
        if let Some(value) = parse_key(section, "rewind_after_union")? {
            config.pipeline.rewind_after_union = value;
        }
        if let Some(value) = parse_key(section, "tile_size")? {
            config.pipeline.tile_size = value;
        }
    }

    if let Some(section) = ini.section(Some("physics")) {
        if let Some(value) = parse_key(section, "batch_size")? {
            config.physics.batch_size = value;
        }
        if let Some(value) = parse_key(section, "attractor_count")? {
            config.physics.attractor_count = value;
        }
        if let Some(value) = parse_key(section, "force_constant")? {
            config.physics.force_constant = value;
        }
        if let Some(value) = parse_key(section, "border_thickness")? {
            config.physics.border_thickness = value;
        }
        if let Some(value) = parse_key(section, "simplify_tolerance")? {
            config.physics.simplify_tolerance = value;
        }
        if let Some(value) = section.get("group_id") {
            config.physics.group_id = value.to_string();
        }
    }

    Ok(config)
}

fn parse_key<T>(section: &Properties, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    section
        .get(key)
        .map(|value| {
            value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        })
        .transpose()
}

fn parse_fetch_policy(value: &str) -> Result<FetchPolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "fail-fast" | "fail_fast" => Ok(FetchPolicy::FailFast),
        "skip-failed" | "skip_failed" => Ok(FetchPolicy::SkipFailed),
        other => Err(ConfigError::InvalidValue {
            key: "fetch_policy".to_string(),
            message: format!("unknown policy '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::WindingOrder;

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_full_config() {
        let text = r#"
[provider]
base_url = https://tiles.example.org
layer = buildings
properties = id, height
request_timeout_secs = 10

[pipeline]
fetch_policy = skip-failed
winding = ccw
rewind_after_union = false
tile_size = 512

[physics]
batch_size = 25
attractor_count = 3
force_constant = 0.00002
border_thickness = 40
simplify_tolerance = 0.5
group_id = Patches
"#;
        let config = parse_config(text).unwrap();

        assert_eq!(config.provider.base_url, "https://tiles.example.org");
        assert_eq!(config.provider.properties, vec!["id", "height"]);
        assert_eq!(config.provider.request_timeout_secs, 10);
        assert_eq!(config.pipeline.fetch_policy, FetchPolicy::SkipFailed);
        assert_eq!(config.pipeline.winding, WindingOrder::CounterClockwise);
        assert!(!config.pipeline.rewind_after_union);
        assert_eq!(config.pipeline.tile_size, 512);
        assert_eq!(config.physics.batch_size, 25);
        assert_eq!(config.physics.group_id, "Patches");
    }

    #[test]
    fn test_invalid_value_rejected() {
        let result = parse_config("[pipeline]\ntile_size = huge\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_fetch_policy_rejected() {
        let result = parse_config("[pipeline]\nfetch_policy = maybe\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("citymesh.ini");
        std::fs::write(&path, "[physics]\nbatch_size = 7\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.physics.batch_size, 7);
    }

    #[test]
    fn test_missing_file_errors() {
        let result = load_config(Path::new("/nonexistent/citymesh.ini"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}

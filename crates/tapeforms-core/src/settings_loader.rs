//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `TAPEFORMS_DEBUG` | `debug` |
//! | `TAPEFORMS_LOG_LEVEL` | `log_level` |
//! | `TAPEFORMS_LAYOUT_TEMPLATE` | `layout_default_template` |
//! | `TAPEFORMS_FIELD_TEMPLATE` | `field_default_template` |
//! | `TAPEFORMS_FIELDSET_TEMPLATE` | `fieldset_default_template` |
//! | `TAPEFORMS_STATIC_URL` | `static_url` |
//! | `TAPEFORMS_TEMPLATE_DIRS` | `template_dirs` (colon-separated) |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use tapeforms_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/tapeforms.toml").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::{TapeformsError, TapeformsResult};
use crate::settings::Settings;

/// Loads settings from a TOML string. Missing keys keep their defaults.
pub fn from_toml_str(toml_str: &str) -> TapeformsResult<Settings> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| TapeformsError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> TapeformsResult<Settings> {
    let content = read_config_file(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> TapeformsResult<Settings> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string. Missing keys keep their defaults.
pub fn from_json_str(json_str: &str) -> TapeformsResult<Settings> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| TapeformsError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> TapeformsResult<Settings> {
    let content = read_config_file(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Applies `TAPEFORMS_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("TAPEFORMS_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("TAPEFORMS_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("TAPEFORMS_LAYOUT_TEMPLATE") {
        settings.layout_default_template = val;
    }

    if let Ok(val) = std::env::var("TAPEFORMS_FIELD_TEMPLATE") {
        settings.field_default_template = val;
    }

    if let Ok(val) = std::env::var("TAPEFORMS_FIELDSET_TEMPLATE") {
        settings.fieldset_default_template = val;
    }

    if let Ok(val) = std::env::var("TAPEFORMS_STATIC_URL") {
        settings.static_url = val;
    }

    if let Ok(val) = std::env::var("TAPEFORMS_TEMPLATE_DIRS") {
        settings.template_dirs = val
            .split(':')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config_file(path: &Path, format: &str) -> TapeformsResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        TapeformsError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(value: serde_json::Value, format: &str) -> TapeformsResult<Settings> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        TapeformsError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        TapeformsError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::settings::{FIELDSET_DEFAULT_TEMPLATE, LAYOUT_DEFAULT_TEMPLATE};

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = true
            field_default_template = "custom/field.html"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(settings.debug);
        assert_eq!(settings.field_default_template, "custom/field.html");
        // Defaults preserved
        assert_eq!(settings.layout_default_template, LAYOUT_DEFAULT_TEMPLATE);
        assert_eq!(settings.static_url, "/static/");
    }

    #[test]
    fn test_from_toml_str_template_dirs() {
        let settings = from_toml_str(r#"template_dirs = ["templates", "more"]"#).unwrap();
        assert_eq!(settings.template_dirs.len(), 2);
        assert_eq!(settings.template_dirs[0], PathBuf::from("templates"));
    }

    #[test]
    fn test_from_toml_str_empty() {
        assert_eq!(from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let err = from_toml_str("debug = [").unwrap_err();
        assert!(matches!(err, TapeformsError::ConfigurationError(_)));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let err = from_toml_str(r#"debug = "maybe""#).unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize settings from TOML"));
    }

    #[test]
    fn test_from_json_str() {
        let settings = from_json_str(r#"{"static_url": "/assets/"}"#).unwrap();
        assert_eq!(settings.static_url, "/assets/");
        assert_eq!(settings.fieldset_default_template, FIELDSET_DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"log_level = "debug""#).unwrap();
        let settings = from_toml_file(file.path()).unwrap();
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"layout_default_template": "x.html"}}"#).unwrap();
        let settings = from_json_file(file.path()).unwrap();
        assert_eq!(settings.layout_default_template, "x.html");
    }

    #[test]
    fn test_from_missing_file() {
        let err = from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read TOML file"));
    }

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}});
        let over = serde_json::json!({"a": {"c": 3}});
        assert_eq!(
            merge_json(base, over),
            serde_json::json!({"a": {"b": 1, "c": 3}})
        );
    }
}

//! Configuration file upgrade: add keys introduced by newer versions,
//! keeping every value the user already set.

use super::{
    Config, default_expected_daily_hours, default_high_hours, default_regular_hours,
    default_rest_days, default_separator_char,
};
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys every config file is expected to carry, with their default value.
fn expected_keys() -> AppResult<Vec<(&'static str, Value)>> {
    let to_value = |v: Result<Value, serde_yaml::Error>| {
        v.map_err(|e| AppError::Config(format!("Failed to build default value: {e}")))
    };

    Ok(vec![
        (
            "database",
            Value::String(Config::database_file().to_string_lossy().to_string()),
        ),
        (
            "expected_daily_hours",
            Value::String(default_expected_daily_hours()),
        ),
        ("rest_days", to_value(serde_yaml::to_value(default_rest_days()))?),
        (
            "high_hours_threshold",
            to_value(serde_yaml::to_value(default_high_hours()))?,
        ),
        (
            "regular_hours_threshold",
            to_value(serde_yaml::to_value(default_regular_hours()))?,
        ),
        ("separator_char", Value::String(default_separator_char())),
    ])
}

/// Add missing keys to the config file at `path`.
///   Returns:
///   Ok(added keys) → file rewritten when the list is not empty
pub fn upgrade_config_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;

    let mut yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Invalid YAML in {}: {e}", path.display())))?;

    if yaml.is_null() {
        yaml = Value::Mapping(Mapping::new());
    }

    let map = yaml
        .as_mapping_mut()
        .ok_or_else(|| AppError::Config(format!("{} is not a YAML mapping", path.display())))?;

    let mut added = Vec::new();
    for (key, default) in expected_keys()? {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k) {
            map.insert(k, default);
            added.push(key);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&yaml)
            .map_err(|e| AppError::Config(format!("Failed to serialize YAML: {e}")))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}

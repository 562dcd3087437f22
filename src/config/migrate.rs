use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Serialize the built-in defaults as a YAML mapping.
fn default_mapping() -> AppResult<Mapping> {
    let value = serde_yaml::to_value(Config::default())?;
    value
        .as_mapping()
        .cloned()
        .ok_or_else(|| AppError::Config("default configuration is not a mapping".into()))
}

/// Read the YAML file at `path` as a raw mapping (not validated against `Config`).
fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    let yaml: Value = serde_yaml::from_str(&content)?;
    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
    }
}

/// Keys known to this version that the file at `path` does not set.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value, preserving what is already set.
///   Returns the keys that were added (empty → no change needed).
pub fn fill_missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;
    let mut added = Vec::new();

    for (key, value) in defaults {
        if current.contains_key(&key) {
            continue;
        }
        if let Some(name) = key.as_str() {
            added.push(name.to_string());
        }
        current.insert(key, value);
    }

    if added.is_empty() {
        info("Configuration already up to date.");
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(current))?;
    fs::write(path, serialized)?;

    success(format!(
        "Configuration migrated, added: {}",
        added.join(", ")
    ));
    Ok(added)
}

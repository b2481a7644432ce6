//! Configuration file upgrades: detect keys missing from an older
//! `rdashlog.conf` and fill them with defaults.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

/// Keys present in the defaults but absent from the file.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Fill missing keys with defaults and rewrite the file.
/// Returns `true` when the file changed.
pub fn run_config_migration(path: &Path) -> AppResult<bool> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;

    let mut changed = false;
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            info(format!(
                "Adding missing key '{}' with default value",
                k.as_str().unwrap_or("?")
            ));
            current.insert(k, v);
            changed = true;
        }
    }

    if changed {
        fs::write(path, serde_yaml::to_string(&Value::Mapping(current))?)?;
        success(format!("Configuration migrated: {}", path.display()));
    }

    Ok(changed)
}

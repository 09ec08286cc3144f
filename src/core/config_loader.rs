// src/core/config_loader.rs

use crate::constants::SETTINGS_NAMESPACE;
use crate::core::paths::{self, PathError};
use crate::models::RawConfig;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Could not read configuration file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing TOML in '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Error parsing JSON in '{path}': {source}")]
    JsonParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("The settings file '{0}' must contain a JSON object at its top level.")]
    NotAnObject(String),
    #[error("Setting '{0}' conflicts with another setting of the same group.")]
    ConflictingKey(String),
    #[error("{0}")]
    Path(#[from] PathError),
}

/// Where the configuration of a launch request comes from.
///
/// Sources are read again on every request, in this order, each one overriding the
/// previous: the TOML config file, the editor `settings.json`, then `overrides`.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Explicit TOML file. When `None`, the default `config.toml` is used if it exists.
    pub config_file: Option<PathBuf>,
    pub settings_json: Option<PathBuf>,
    pub overrides: RawConfig,
}

/// Reads and layers every configured source into a single sparse configuration.
pub fn load_raw_config(sources: &ConfigSources) -> Result<RawConfig, LoaderError> {
    let from_file = match &sources.config_file {
        Some(path) => read_toml_config(path)?,
        None => {
            let default_path = paths::get_config_file_path()?;
            match read_toml_config(&default_path) {
                Err(LoaderError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    log::debug!(
                        "No config file at '{}'. Using defaults.",
                        default_path.display()
                    );
                    RawConfig::default()
                }
                other => other?,
            }
        }
    };

    let from_settings = match &sources.settings_json {
        Some(path) => read_settings_json(path)?,
        None => RawConfig::default(),
    };

    let mut raw = from_file
        .overlay(from_settings)
        .overlay(sources.overrides.clone());

    // `~` and `$VAR` are allowed wherever a path or executable is expected.
    if let Some(shell) = &raw.integrated_terminal.path_to_shell {
        raw.integrated_terminal.path_to_shell = Some(paths::expand_user_path(shell)?);
    }
    if let Some(vim) = &raw.vim_executable {
        raw.vim_executable = Some(paths::expand_user_path(vim)?);
    }

    Ok(raw)
}

fn read_file(path: &Path) -> Result<String, LoaderError> {
    fs::read_to_string(path).map_err(|source| LoaderError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Parses an openvim `config.toml`.
pub fn read_toml_config(path: &Path) -> Result<RawConfig, LoaderError> {
    let content = read_file(path)?;
    log::debug!("Loading config file '{}'.", path.display());
    toml::from_str(&content).map_err(|source| LoaderError::TomlParse {
        path: path.display().to_string(),
        source,
    })
}

/// Reads the `open-in-vim.*` keys of an editor `settings.json`.
pub fn read_settings_json(path: &Path) -> Result<RawConfig, LoaderError> {
    let content = read_file(path)?;
    log::debug!("Loading editor settings '{}'.", path.display());
    parse_settings_json(&content, &path.display().to_string())
}

/// Turns flat namespaced keys (`open-in-vim.linux.tilix.args`) into the nested
/// shape of [`RawConfig`]. Keys outside the namespace are ignored.
pub fn parse_settings_json(content: &str, origin: &str) -> Result<RawConfig, LoaderError> {
    let json_err = |source| LoaderError::JsonParse {
        path: origin.to_string(),
        source,
    };

    let value: Value = serde_json::from_str(content).map_err(json_err)?;
    let Value::Object(settings) = value else {
        return Err(LoaderError::NotAnObject(origin.to_string()));
    };

    let prefix = format!("{}.", SETTINGS_NAMESPACE);
    let mut nested = Map::new();

    for (key, value) in settings {
        let Some(local_key) = key.strip_prefix(&prefix) else {
            continue;
        };
        insert_dotted(&mut nested, local_key, value)
            .map_err(|_| LoaderError::ConflictingKey(key.clone()))?;
    }

    serde_json::from_value(Value::Object(nested)).map_err(json_err)
}

/// Inserts `value` at the path spelled by `dotted_key`, creating groups on the way.
fn insert_dotted(root: &mut Map<String, Value>, dotted_key: &str, value: Value) -> Result<(), ()> {
    let mut segments: Vec<&str> = dotted_key.split('.').collect();
    let leaf = segments.pop().ok_or(())?;

    let mut current = root;
    for segment in segments {
        current = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or(())?;
    }
    if current.get(leaf).is_some_and(Value::is_object) {
        return Err(());
    }
    current.insert(leaf.to_string(), value);
    Ok(())
}

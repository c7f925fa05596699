use crate::error::AppError;
use crate::model::TaskFields;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TWODO_CONFIG_PATH";

/// Reduces an alias to lowercase alphanumerics joined by single underscores.
pub fn canonical_alias_name(raw: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// List used when a task names none.
    #[serde(default)]
    pub default_list: Option<String>,
    /// Tags used when a task names none.
    #[serde(default)]
    pub default_tags: Option<String>,
    /// Hand URLs to the system opener instead of only printing them.
    #[serde(default)]
    pub execute: bool,
    /// Short names for lists, e.g. `"w": "Work"`.
    #[serde(default)]
    pub lists: HashMap<String, String>,
}

impl Config {
    /// Full list name for an alias, or the name itself when it is not an alias.
    pub fn resolve_list(&self, name: &str) -> String {
        canonical_alias_name(name)
            .and_then(|alias| self.lists.get(&alias))
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// Fills absent list and tags from the defaults and resolves list aliases.
    pub fn apply_defaults(&self, fields: &mut TaskFields) {
        let list = fields.for_list.take().or_else(|| self.default_list.clone());
        fields.for_list = list.map(|name| self.resolve_list(&name));

        if fields.tags.is_none() {
            fields.tags = self.default_tags.clone();
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub default_list: Option<String>,
    pub default_tags: Option<String>,
    pub execute: Option<bool>,
    pub lists: HashMap<String, String>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("twodo").join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("twodo")
            .join(CONFIG_FILE_NAME))
    }
}

/// Never fails: problems are returned next to a default config.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

pub fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    Ok(normalize_list_aliases(config))
}

fn normalize_list_aliases(mut config: Config) -> Config {
    config.lists = config
        .lists
        .into_iter()
        .filter_map(|(alias, list)| canonical_alias_name(&alias).map(|alias| (alias, list)))
        .collect();
    config
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(list) = overrides.default_list.as_ref() {
        merged.default_list = Some(list.clone());
    }
    if let Some(tags) = overrides.default_tags.as_ref() {
        merged.default_tags = Some(tags.clone());
    }
    if let Some(execute) = overrides.execute {
        merged.execute = execute;
    }

    for (alias, list) in overrides.lists.iter() {
        if let Some(alias) = canonical_alias_name(alias) {
            merged.lists.insert(alias, list.clone());
        }
    }

    merged
}

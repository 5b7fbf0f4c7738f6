//! Settings store: defaults overlaid by a user dotfile

use super::properties::{self, PropertiesError};
use super::tokenize::{normalize, RawValue};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Setting name to value
pub type Settings = BTreeMap<String, RawValue>;

/// Errors raised while loading the settings dotfile
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },
}

/// Merged, read-only settings.
///
/// Built once from defaults plus an optional overlay. The designated list
/// field is always normalized to a token list, whichever side it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    values: Settings,
    list_field: String,
}

impl SettingsStore {
    /// Merge `overlay` pairs over `defaults` (overlay wins per key) and
    /// normalize `list_field`.
    pub fn build<I>(defaults: Settings, list_field: &str, overlay: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut values = defaults;
        for (key, value) in overlay {
            values.insert(key, RawValue::String(value));
        }

        if let Some(raw) = values.remove(list_field) {
            values.insert(list_field.to_string(), RawValue::List(normalize(raw)));
        }

        Self {
            values,
            list_field: list_field.to_string(),
        }
    }

    /// Build from defaults alone
    pub fn defaults_only(defaults: Settings, list_field: &str) -> Self {
        Self::build(defaults, list_field, std::iter::empty())
    }

    /// Build from defaults and the text of a properties document
    pub fn from_text(
        defaults: Settings,
        list_field: &str,
        text: &str,
    ) -> Result<Self, PropertiesError> {
        let overlay = properties::parse(text)?;
        Ok(Self::build(defaults, list_field, overlay))
    }

    /// Load the settings file at `path` over `defaults`.
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is an error and no store is produced.
    pub fn load(defaults: Settings, list_field: &str, path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::defaults_only(defaults, list_field));
        }

        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_text(defaults, list_field, &text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    /// Text value of a setting; `None` for lists
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            RawValue::String(s) => Some(s.as_str()),
            RawValue::List(_) => None,
        }
    }

    /// Boolean value of a text setting (`true/false`, `yes/no`, `1/0`)
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get_str(key)?.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }

    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        match self.values.get(key)? {
            RawValue::List(items) => Some(items.as_slice()),
            RawValue::String(_) => None,
        }
    }

    /// The normalized list field
    pub fn list(&self) -> &[String] {
        self.get_list(&self.list_field).unwrap_or(&[])
    }

    pub fn list_field(&self) -> &str {
        &self.list_field
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawValue)> {
        self.values.iter()
    }
}

//! Template description file (`<template>/template.json`)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the per-template description
pub const TEMPLATE_MANIFEST: &str = "template.json";

/// Shown when a template has no description
pub const NO_DESCRIPTION: &str = "No description available";

/// Per-template manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Description of what the template provides
    #[serde(default)]
    pub description: Option<String>,
}

impl TemplateManifest {
    /// Read `template.json` from a template directory.
    /// A missing file gives an empty manifest.
    pub fn read(template_path: &Path) -> Result<Self> {
        let manifest_path = template_path.join(TEMPLATE_MANIFEST);
        if !manifest_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", manifest_path.display()))
    }

    pub fn description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = TemplateManifest::read(dir.path()).unwrap();
        assert_eq!(manifest.description(), NO_DESCRIPTION);
    }

    #[test]
    fn test_reads_description() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(TEMPLATE_MANIFEST),
            r#"{ "description": "Command line tool", "extra": true }"#,
        )
        .unwrap();
        let manifest = TemplateManifest::read(dir.path()).unwrap();
        assert_eq!(manifest.description(), "Command line tool");
    }

    #[test]
    fn test_missing_description_field() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TEMPLATE_MANIFEST), "{}").unwrap();
        let manifest = TemplateManifest::read(dir.path()).unwrap();
        assert_eq!(manifest.description(), NO_DESCRIPTION);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TEMPLATE_MANIFEST), "{ nope").unwrap();
        let err = TemplateManifest::read(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}

//! `package.json` rewriting for generated projects

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Manifest file rewritten after copying
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Placeholder replaced by the project name in keys and string values
pub const APP_NAME_PLACEHOLDER: &str = "<appName>";

/// Answers written into the generated manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageAnswers {
    pub project_name: String,
    pub author: String,
    /// npm user for a scoped package name; `None` or empty for unscoped
    pub npm_user: Option<String>,
    pub version: String,
    /// Written as `keywords` when non-empty
    pub keywords: Vec<String>,
}

impl PackageAnswers {
    /// `@user/project` when an npm user is set, else `project`
    pub fn package_name(&self) -> String {
        match self.npm_user.as_deref().map(str::trim) {
            Some(user) if !user.is_empty() => format!("@{}/{}", user, self.project_name),
            _ => self.project_name.clone(),
        }
    }
}

/// Set name, version, author and keywords, then substitute the
/// project name for every `<appName>` placeholder.
pub fn apply_answers(manifest: &mut Value, answers: &PackageAnswers) -> Result<()> {
    let fields = manifest
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("{} must contain a JSON object", PACKAGE_MANIFEST))?;

    fields.insert("name".to_string(), Value::String(answers.package_name()));
    fields.insert("version".to_string(), Value::String(answers.version.clone()));
    fields.insert("author".to_string(), Value::String(answers.author.clone()));
    if !answers.keywords.is_empty() {
        fields.insert(
            "keywords".to_string(),
            Value::Array(answers.keywords.iter().cloned().map(Value::String).collect()),
        );
    }

    replace_app_name(manifest, &answers.project_name);
    Ok(())
}

/// Replace `<appName>` with `project_name` in every string value and
/// every object key, recursively. Renamed keys keep their position.
pub fn replace_app_name(value: &mut Value, project_name: &str) {
    match value {
        Value::String(s) => {
            if s.contains(APP_NAME_PLACEHOLDER) {
                *s = s.replace(APP_NAME_PLACEHOLDER, project_name);
            }
        }
        Value::Array(items) => {
            for item in items {
                replace_app_name(item, project_name);
            }
        }
        Value::Object(map) => {
            let entries = std::mem::take(map);
            let mut renamed = Map::with_capacity(entries.len());
            for (key, mut child) in entries {
                replace_app_name(&mut child, project_name);
                let key = if key.contains(APP_NAME_PLACEHOLDER) {
                    key.replace(APP_NAME_PLACEHOLDER, project_name)
                } else {
                    key
                };
                renamed.insert(key, child);
            }
            *map = renamed;
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Serialize with tab indentation and a trailing newline
pub fn to_tab_indented_json(value: &Value) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize package manifest")?;
    buffer.push(b'\n');
    String::from_utf8(buffer).context("Package manifest is not valid UTF-8")
}

/// Rewrite `package.json` in `project_dir`.
/// Returns `false` when the template has no `package.json`.
pub async fn rewrite_package_json(project_dir: &Path, answers: &PackageAnswers) -> Result<bool> {
    let manifest_path = project_dir.join(PACKAGE_MANIFEST);
    if !manifest_path.exists() {
        return Ok(false);
    }

    let content = tokio::fs::read_to_string(&manifest_path)
        .await
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let mut manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

    apply_answers(&mut manifest, answers)?;

    tokio::fs::write(&manifest_path, to_tab_indented_json(&manifest)?)
        .await
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(true)
}

//! Template discovery from a local templates directory
//!
//! Layout: `<root>/<template>/<language>/...` with an optional
//! `<root>/<template>/template.json` describing the template.

use super::manifest::TemplateManifest;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the templates directory was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Given on the command line
    Explicit(PathBuf),
    /// Taken from the product's environment variable
    Environment(PathBuf),
    /// Shipped alongside the executable or in the working directory
    Bundled(PathBuf),
}

impl TemplateSource {
    /// Resolve the templates directory: explicit path, then the product's
    /// environment variable, then `templates/` near the executable, then
    /// `./templates`.
    pub fn resolve<C: ProductConfig>(config: &C, explicit: Option<PathBuf>) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path);
        }

        if let Some(path) = std::env::var_os(config.template_dir_env()).filter(|v| !v.is_empty()) {
            return Self::Environment(PathBuf::from(path));
        }

        let near_exe = std::env::current_exe().ok().and_then(|exe| {
            let exe_dir = exe.parent()?.to_path_buf();
            [
                exe_dir.join("templates"),
                exe_dir.join("..").join("templates"),
            ]
            .into_iter()
            .find(|candidate| candidate.is_dir())
        });

        Self::Bundled(near_exe.unwrap_or_else(|| PathBuf::from("templates")))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Environment(path) | Self::Bundled(path) => path,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(path) => format!("Using templates from {}", path.display()),
            Self::Environment(path) => {
                format!("Using templates from {} (environment)", path.display())
            }
            Self::Bundled(path) => format!("Using bundled templates from {}", path.display()),
        }
    }
}

/// One template and its language variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub name: String,
    pub description: String,
    /// Variant directory names, sorted
    pub languages: Vec<String>,
    pub path: PathBuf,
}

impl TemplateEntry {
    /// Label used in the template picker: `name - description`
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.description)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    /// The only variant, when there is exactly one
    pub fn sole_language(&self) -> Option<&str> {
        match self.languages.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn language_path(&self, language: &str) -> PathBuf {
        self.path.join(language)
    }
}

/// All templates under a root directory, sorted by name
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    root: PathBuf,
    templates: Vec<TemplateEntry>,
}

impl TemplateCatalog {
    /// Scan `root`: every subdirectory is a template, every subdirectory of
    /// a template is a language variant.
    pub fn discover(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("Template directory not found: {}", root.display());
        }

        let mut templates = Vec::new();
        for template_path in sorted_subdirs(root)? {
            let name = file_name(&template_path);
            let manifest = TemplateManifest::read(&template_path)?;
            let languages = sorted_subdirs(&template_path)?
                .iter()
                .map(|p| file_name(p))
                .collect();

            templates.push(TemplateEntry {
                name,
                description: manifest.description().to_string(),
                languages,
                path: template_path,
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            templates,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn templates(&self) -> &[TemplateEntry] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TemplateEntry> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("cli/js/src")).unwrap();
        fs::create_dir_all(root.join("cli/ts")).unwrap();
        fs::write(
            root.join("cli/template.json"),
            r#"{"description": "Command line app"}"#,
        )
        .unwrap();
        fs::create_dir_all(root.join("api/js")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("README.md"), "not a template").unwrap();
        dir
    }

    #[test]
    fn test_discover_templates_and_languages() {
        let dir = fixture();
        let catalog = TemplateCatalog::discover(dir.path()).unwrap();

        assert_eq!(catalog.names(), vec!["api", "cli", "empty"]);

        let cli = catalog.get("cli").unwrap();
        assert_eq!(cli.languages, vec!["js", "ts"]);
        assert_eq!(cli.label(), "cli - Command line app");
        assert!(cli.sole_language().is_none());
        assert!(cli.has_language("ts"));

        let api = catalog.get("api").unwrap();
        assert_eq!(api.description, "No description available");
        assert_eq!(api.sole_language(), Some("js"));
        assert_eq!(api.language_path("js"), dir.path().join("api").join("js"));

        assert!(catalog.get("empty").unwrap().languages.is_empty());
        assert!(catalog.get("README.md").is_none());
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = TemplateCatalog::discover(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("Template directory not found"));
    }

    #[test]
    fn test_source_paths() {
        let explicit = TemplateSource::Explicit(PathBuf::from("/tmp/t"));
        assert_eq!(explicit.path(), Path::new("/tmp/t"));
        assert!(explicit.describe().contains("/tmp/t"));
        assert!(TemplateSource::Environment(PathBuf::from("x"))
            .describe()
            .contains("environment"));
    }
}

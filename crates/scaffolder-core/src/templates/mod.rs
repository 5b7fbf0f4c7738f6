//! Template discovery, copying, and manifest rewriting
//!
//! This module provides:
//! - Template discovery from a local templates directory (TemplateCatalog)
//! - Template tree copying into a new project
//! - `package.json` rewriting with `<appName>` substitution
//! - Project name and version validation

pub mod catalog;
pub mod copier;
pub mod manifest;
pub mod package;
pub mod version;

use crate::product::ProductConfig;
use anyhow::Result;
use colored::Colorize;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

pub use catalog::{TemplateCatalog, TemplateEntry, TemplateSource};
pub use copier::copy_template;
pub use manifest::TemplateManifest;
pub use package::{replace_app_name, rewrite_package_json, PackageAnswers};
pub use version::validate_version;

fn project_name_regex() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(r"^[a-z0-9_-]+$").expect("valid project name regex"))
}

/// Validation message for a project name, or `None` when valid
pub fn validate_project_name(input: &str) -> Option<String> {
    if input.is_empty() {
        return Some("Project name cannot be empty!".to_string());
    }
    if !project_name_regex().is_match(input) {
        return Some(
            "Project name must consist of lowercase letters, numbers, hyphens, and underscores only!"
                .to_string(),
        );
    }
    None
}

/// Print all templates and their language variants
pub fn list_templates<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Result<()> {
    let source = TemplateSource::resolve(config, template_dir);
    let catalog = TemplateCatalog::discover(source.path())?;

    println!(
        "{}",
        format!("{} templates", config.display_name()).cyan().bold()
    );
    println!("{}", config.cli_description().dimmed());
    println!("{}", source.describe().dimmed());
    println!();

    if catalog.is_empty() {
        eprintln!(
            "{} No templates found in {}",
            "Warning:".yellow(),
            catalog.root().display()
        );
        return Ok(());
    }

    for template in catalog.templates() {
        let languages = if template.languages.is_empty() {
            "no language variants".red().to_string()
        } else {
            template.languages.join(", ")
        };
        println!(
            "  {} {} {}",
            "->".blue(),
            template.label(),
            format!("[{}]", languages).dimmed()
        );
    }

    println!();
    println!(
        "{} {} template(s)",
        "Found".green().bold(),
        catalog.templates().len()
    );

    Ok(())
}

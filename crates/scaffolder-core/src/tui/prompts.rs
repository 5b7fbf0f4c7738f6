//! Charm-style CLI prompts using cliclack

use crate::config::SettingsStore;
use crate::product::{keys, ProductConfig};
use crate::runtime::{check, tool, Language};
use crate::templates::catalog::{TemplateCatalog, TemplateEntry, TemplateSource};
use crate::templates::package::{self, PackageAnswers};
use crate::templates::{copier, validate_project_name, version};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Default initial version when neither flags nor settings provide one
const DEFAULT_VERSION: &str = "1.0.0";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Language variant to use
    pub language: Option<String>,

    /// Project name (also the directory created in the working directory)
    pub name: Option<String>,

    /// Author written to package.json
    pub author: Option<String>,

    /// npm user for a scoped package name
    pub npm_user: Option<String>,

    /// Initial version
    pub version: Option<String>,

    /// Install dependencies (`None` asks)
    pub install: Option<bool>,

    /// Replace an existing project directory without asking
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(
    config: &C,
    settings: &SettingsStore,
    args: CreateArgs,
) -> Result<()> {
    cliclack::intro(format!("Welcome to the {}!", config.display_name()))?;

    // Step 1: Locate templates
    let source = TemplateSource::resolve(config, args.template_dir.clone());
    cliclack::log::info(source.describe())?;

    // Step 2: Select template
    let template = select_template(&source, args.template.as_deref())?;

    // Step 3: Select language variant
    let language = select_language(&template, args.language.as_deref())?;

    // Step 4: Collect answers
    let answers = collect_answers(settings, &args)?;
    let mut install_deps = select_install(settings, &args)?;

    // Step 5: Check tools
    if !check_runtimes(install_deps)? {
        install_deps = false;
    }

    // Step 6: Prepare target directory
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = current_dir.join(&answers.project_name);
    prepare_directory(&project_dir, &answers.project_name, &args).await?;

    // Step 7: Create project
    create_project(&template, &language, &project_dir, &answers).await?;

    // Step 8: Initialize git (fatal on failure)
    if let Err(e) = tool::git_init(&project_dir).await {
        cliclack::log::error(format!("Error initializing git: {}", e))?;
        return Err(e.context("Git initialization failed"));
    }
    cliclack::log::success("Git repository initialized successfully!")?;

    // Step 9: Install dependencies (failure is reported, not fatal)
    if install_deps {
        match tool::install_dependencies(&project_dir, &config.install_steps()).await {
            Ok(()) => cliclack::log::success("Dependencies installed successfully!")?,
            Err(e) => cliclack::log::error(format!("Error installing dependencies: {}", e))?,
        }
    }

    // Step 10: Show next steps
    print_next_steps(config, &answers.project_name, &language)?;

    Ok(())
}

fn select_template(source: &TemplateSource, specified: Option<&str>) -> Result<TemplateEntry> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let catalog = match TemplateCatalog::discover(source.path()) {
        Ok(catalog) => catalog,
        Err(e) => {
            spinner.stop("Failed to load templates");
            return Err(e);
        }
    };

    // If a template was specified via --template flag, use it directly
    if let Some(name) = specified {
        return match catalog.get(name) {
            Some(template) => {
                spinner.stop(format!("Template: {}", template.label()));
                Ok(template.clone())
            }
            None => {
                spinner.stop("Failed to load templates");
                anyhow::bail!(
                    "Template '{}' not found. Available templates: {}",
                    name,
                    catalog.names().join(", ")
                );
            }
        };
    }

    spinner.stop("Templates loaded");

    let templates = catalog.templates();
    if templates.is_empty() {
        anyhow::bail!("No templates found in {}", catalog.root().display());
    }

    // If only one template, use it automatically
    if let [only] = templates {
        cliclack::log::info(format!("Using template: {}", only.label()))?;
        return Ok(only.clone());
    }

    let mut select = cliclack::select("Select a template type");
    for (idx, template) in templates.iter().enumerate() {
        select = select.item(idx, template.label(), "");
    }
    let selected_idx: usize = select.interact()?;

    templates
        .get(selected_idx)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Invalid template selection"))
}

fn select_language(template: &TemplateEntry, specified: Option<&str>) -> Result<String> {
    if template.languages.is_empty() {
        anyhow::bail!("Template '{}' has no language variants.", template.name);
    }

    if let Some(language) = specified {
        if !template.has_language(language) {
            anyhow::bail!(
                "Language '{}' not available for template '{}'. Available: {}",
                language,
                template.name,
                template.languages.join(", ")
            );
        }
        cliclack::log::info(format!("Language: {}", Language::variant_label(language)))?;
        return Ok(language.to_string());
    }

    if let Some(only) = template.sole_language() {
        return Ok(only.to_string());
    }

    let mut select = cliclack::select("Select a language");
    for language in &template.languages {
        select = select.item(language.clone(), Language::variant_label(language), "");
    }
    Ok(select.interact()?)
}

/// First non-empty of: flag value, settings value
fn preset(flag: Option<&String>, settings: &SettingsStore, key: &str) -> Option<String> {
    flag.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            settings
                .get_str(key)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
}

fn collect_answers(settings: &SettingsStore, args: &CreateArgs) -> Result<PackageAnswers> {
    let project_name = ask_project_name(args)?;
    let author = ask_author(settings, args)?;
    let npm_user = ask_npm_user(settings, args)?;
    let version = ask_version(settings, args)?;

    Ok(PackageAnswers {
        project_name,
        author,
        npm_user,
        version,
        keywords: settings.list().to_vec(),
    })
}

fn ask_project_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        if let Some(problem) = validate_project_name(name) {
            anyhow::bail!("{}", problem);
        }
        return Ok(name.clone());
    }

    if args.yes {
        anyhow::bail!("A project name is required in non-interactive mode (--name).");
    }

    let name: String = cliclack::input("Enter project name")
        .placeholder("my-project")
        .validate(|input: &String| validate_project_name(input).map_or(Ok(()), Err))
        .interact()?;
    Ok(name)
}

fn ask_author(settings: &SettingsStore, args: &CreateArgs) -> Result<String> {
    let default = preset(args.author.as_ref(), settings, keys::AUTHOR);

    if args.author.is_some() {
        return default
            .ok_or_else(|| anyhow::anyhow!("Author name cannot be empty (--author was blank)."));
    }
    if args.yes {
        return default.ok_or_else(|| {
            anyhow::anyhow!("An author is required in non-interactive mode (--author).")
        });
    }

    let mut input = cliclack::input("Enter author name").validate(|input: &String| {
        if input.trim().is_empty() {
            Err("Author name cannot be empty!")
        } else {
            Ok(())
        }
    });
    if let Some(author) = &default {
        input = input.default_input(author);
    }
    let author: String = input.interact()?;
    Ok(author.trim().to_string())
}

fn ask_npm_user(settings: &SettingsStore, args: &CreateArgs) -> Result<Option<String>> {
    let default = preset(args.npm_user.as_ref(), settings, keys::NPM_USER);

    if args.npm_user.is_some() || args.yes {
        return Ok(default);
    }

    let mut input = cliclack::input("Enter npm user")
        .placeholder("leave empty for an unscoped package")
        .required(false);
    if let Some(user) = &default {
        input = input.default_input(user);
    }
    let user: String = input.interact()?;
    let user = user.trim().to_string();
    Ok((!user.is_empty()).then_some(user))
}

fn ask_version(settings: &SettingsStore, args: &CreateArgs) -> Result<String> {
    let default = preset(args.version.as_ref(), settings, keys::VERSION)
        .unwrap_or_else(|| DEFAULT_VERSION.to_string());

    if args.version.is_some() || args.yes {
        return Ok(version::parse_version(&default)?.to_string());
    }

    let input: String = cliclack::input("Enter initial version")
        .default_input(&default)
        .validate(|input: &String| version::validate_version(input).map_or(Ok(()), Err))
        .interact()?;
    Ok(version::parse_version(&input)?.to_string())
}

fn select_install(settings: &SettingsStore, args: &CreateArgs) -> Result<bool> {
    if let Some(install) = args.install {
        return Ok(install);
    }

    let default = settings.get_bool(keys::INSTALL_DEPS).unwrap_or(true);
    if args.yes {
        return Ok(default);
    }

    Ok(cliclack::confirm("Do you want to install dependencies?")
        .initial_value(default)
        .interact()?)
}

/// Returns whether dependency installation can go ahead
fn check_runtimes(install_deps: bool) -> Result<bool> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    match check::check_runtimes(install_deps) {
        Ok(runtimes) => {
            let info: Vec<String> = runtimes.iter().map(|r| r.summary()).collect();
            spinner.stop(format!("Detected tools: {}", info.join(", ")));

            let missing: Vec<&str> = runtimes
                .iter()
                .filter(|r| !r.available)
                .map(|r| r.name)
                .collect();
            if missing.is_empty() {
                Ok(install_deps)
            } else {
                cliclack::log::warning(format!(
                    "{} not found, skipping dependency installation",
                    missing.join(", ")
                ))?;
                Ok(false)
            }
        }
        Err(e) => {
            spinner.stop("Missing tools");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing tools and try again.");
        }
    }
}

async fn prepare_directory(project_dir: &Path, project_name: &str, args: &CreateArgs) -> Result<()> {
    if !project_dir.exists() {
        return Ok(());
    }

    let overwrite = if args.force {
        true
    } else if args.yes {
        false
    } else {
        cliclack::confirm(format!(
            "Directory {} already exists. Do you want to overwrite it?",
            project_name
        ))
        .initial_value(false)
        .interact()?
    };

    if !overwrite {
        cliclack::outro_cancel("Project creation aborted.")?;
        anyhow::bail!("Directory {} already exists.", project_dir.display());
    }

    copier::remove_existing(project_dir).await?;
    cliclack::log::info(format!("Deleted existing directory: {}", project_dir.display()))?;
    Ok(())
}

async fn create_project(
    template: &TemplateEntry,
    language: &str,
    project_dir: &Path,
    answers: &PackageAnswers,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start(format!(
        "Creating project from template: {}/{}...",
        template.name, language
    ));

    let created = async {
        let copied = copier::copy_template(&template.language_path(language), project_dir).await?;
        let rewritten = package::rewrite_package_json(project_dir, answers).await?;
        anyhow::Ok((copied, rewritten))
    }
    .await;

    let (copied_files, rewritten) = match created {
        Ok(result) => result,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e);
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        copied_files.len(),
        project_dir.display()
    ));

    if !rewritten {
        cliclack::log::warning(format!(
            "Template has no {}; skipped name and version substitution",
            package::PACKAGE_MANIFEST
        ))?;
    }

    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, project_name: &str, language: &str) -> Result<()> {
    let steps = config.next_steps(project_name, language);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Project setup complete!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawValue, Settings};

    fn settings(pairs: &[(&str, &str)]) -> SettingsStore {
        let mut defaults = Settings::new();
        defaults.insert(keys::AUTHOR.to_string(), "".into());
        defaults.insert(keys::KEYWORDS.to_string(), RawValue::List(Vec::new()));
        SettingsStore::build(
            defaults,
            keys::KEYWORDS,
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_preset_prefers_flag() {
        let store = settings(&[("author", "From File")]);
        let flag = Some("From Flag".to_string());
        assert_eq!(
            preset(flag.as_ref(), &store, keys::AUTHOR).as_deref(),
            Some("From Flag")
        );
        assert_eq!(
            preset(None, &store, keys::AUTHOR).as_deref(),
            Some("From File")
        );
    }

    #[test]
    fn test_preset_skips_blank_values() {
        let store = settings(&[]);
        let blank = Some("   ".to_string());
        assert_eq!(preset(blank.as_ref(), &store, keys::AUTHOR), None);
        assert_eq!(preset(None, &store, keys::KEYWORDS), None);
    }

    #[test]
    fn test_non_interactive_answers() {
        let store = settings(&[("author", "Jane"), ("keywords", "cli \"node tool\"")]);
        let args = CreateArgs {
            name: Some("demo".to_string()),
            yes: true,
            ..CreateArgs::default()
        };

        let answers = collect_answers(&store, &args).unwrap();
        assert_eq!(answers.project_name, "demo");
        assert_eq!(answers.author, "Jane");
        assert_eq!(answers.npm_user, None);
        assert_eq!(answers.version, "1.0.0");
        assert_eq!(answers.keywords, vec!["cli", "node tool"]);
    }

    #[test]
    fn test_non_interactive_requires_name_and_author() {
        let store = settings(&[]);
        let args = CreateArgs {
            yes: true,
            ..CreateArgs::default()
        };
        assert!(ask_project_name(&args).is_err());
        assert!(ask_author(&store, &args).is_err());
    }

    #[test]
    fn test_blank_author_flag() {
        let args = CreateArgs {
            author: Some("  ".to_string()),
            ..CreateArgs::default()
        };

        let err = ask_author(&settings(&[]), &args).unwrap_err().to_string();
        assert!(err.contains("cannot be empty"));
        assert!(!err.contains("non-interactive"));

        // A blank flag still falls back to the configured author
        let store = settings(&[(keys::AUTHOR, "Jo")]);
        assert_eq!(ask_author(&store, &args).unwrap(), "Jo");
    }

    #[test]
    fn test_version_flag_is_validated() {
        let store = settings(&[]);
        let args = CreateArgs {
            version: Some("v2.0.0".to_string()),
            ..CreateArgs::default()
        };
        assert_eq!(ask_version(&store, &args).unwrap(), "2.0.0");

        let args = CreateArgs {
            version: Some("two".to_string()),
            ..CreateArgs::default()
        };
        assert!(ask_version(&store, &args).is_err());
    }

    #[test]
    fn test_install_default_from_settings() {
        let args = CreateArgs {
            yes: true,
            ..CreateArgs::default()
        };
        assert!(!select_install(&settings(&[("installDeps", "false")]), &args).unwrap());
        assert!(select_install(&settings(&[]), &args).unwrap());

        let args = CreateArgs {
            install: Some(false),
            ..CreateArgs::default()
        };
        assert!(!select_install(&settings(&[]), &args).unwrap());
    }
}

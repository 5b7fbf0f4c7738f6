//! create-project - scaffold new projects from local templates

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use scaffolder_core::product::keys;
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::{Level, Logger, ProductConfig, RawValue, Settings, SettingsError};
use std::io::{self, Write};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// create-project product configuration
#[derive(Clone)]
pub struct CreateProjectConfig;

impl ProductConfig for CreateProjectConfig {
    fn name(&self) -> &'static str {
        "create-project"
    }

    fn display_name(&self) -> &'static str {
        "CLI Project Generator"
    }

    fn version(&self) -> &'static str {
        CLI_VERSION
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_PROJECT_TEMPLATES"
    }

    fn cli_description(&self) -> &'static str {
        "Generate a new project from a template"
    }

    fn default_settings(&self) -> Settings {
        let mut defaults = Settings::new();
        defaults.insert(keys::AUTHOR.to_string(), RawValue::from(""));
        defaults.insert(keys::NPM_USER.to_string(), RawValue::from(""));
        defaults.insert(keys::VERSION.to_string(), RawValue::from("1.0.0"));
        defaults.insert(keys::INSTALL_DEPS.to_string(), RawValue::from("true"));
        defaults.insert(keys::KEYWORDS.to_string(), RawValue::List(Vec::new()));
        defaults
    }

    fn next_steps(&self, project_name: &str, _language: &str) -> Vec<String> {
        vec![
            format!("cd {}", project_name),
            "node ./src/main.js".to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-project")]
#[command(about = "Generate a new project from a template")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project (default)
    Create(CliCreateArgs),
    /// List available templates and their languages
    List(ListArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CliCreateArgs {
    /// Directory containing templates (overrides CREATE_PROJECT_TEMPLATES)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Language variant of the template (e.g. js, ts)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Project name; the project is created in ./<name>
    #[arg(short, long)]
    pub name: Option<String>,

    /// Author name
    #[arg(short, long)]
    pub author: Option<String>,

    /// npm user for a scoped package name (@user/name)
    #[arg(long = "npm-user")]
    pub npm_user: Option<String>,

    /// Initial version
    #[arg(long = "initial-version")]
    pub initial_version: Option<String>,

    /// Install dependencies without asking
    #[arg(long, conflicts_with = "no_install")]
    pub install: bool,

    /// Skip dependency installation
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Overwrite an existing project directory
    #[arg(short, long)]
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        let install = match (args.install, args.no_install) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        CreateArgs {
            template_dir: args.template_dir,
            template: args.template,
            language: args.language,
            name: args.name,
            author: args.author,
            npm_user: args.npm_user,
            version: args.initial_version,
            install,
            force: args.force,
            yes: args.yes,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct ListArgs {
    /// Directory containing templates (overrides CREATE_PROJECT_TEMPLATES)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

/// Report a settings load failure as a single error line; returns the exit code
fn report_load_failure<W: Write>(logger: &Logger, out: &mut W, err: &SettingsError) -> i32 {
    let _ = logger.write_to(
        out,
        Level::Error,
        &format!("Error loading defaults from configuration file: {}", err),
    );
    1
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = CreateProjectConfig;
    let logger = Logger::from_env();

    // Settings are loaded once, before any other work; a broken dotfile is fatal
    let settings = match config.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            let code = report_load_failure(&logger, &mut io::stderr().lock(), &e);
            std::process::exit(code);
        }
    };
    for (key, value) in settings.iter() {
        logger.verbose(&format!("setting {} = {}", key, value));
    }

    match args.command {
        Some(Command::Create(create_args)) => {
            let result = scaffolder_core::run(&config, &settings, create_args.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::List(list_args)) => {
            scaffolder_core::templates::list_templates(&config, list_args.template_dir)
        }
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let result = scaffolder_core::run(&config, &settings, CreateArgs::default()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}

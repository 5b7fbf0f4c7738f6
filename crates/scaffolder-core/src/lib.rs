//! Scaffolder Core - Shared library for project generator CLIs
//!
//! This library provides the core functionality for generating projects from
//! local templates, plus the user settings layer the generator reads its
//! default answers from.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Settings tokenizer and store, template
//!   discovery, tree copying, `package.json` rewriting, git/npm invocation
//! - **Layer 2: Workflow Configuration** - `ProductConfig` trait describing a generator binary
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::config::{normalize, RawValue, Settings, SettingsStore};
//!
//! let mut defaults = Settings::new();
//! defaults.insert("keywords".into(), RawValue::List(vec![]));
//! let store = SettingsStore::from_text(defaults, "keywords", "keywords = cli 'node tool'")?;
//! assert_eq!(store.list(), ["cli", "node tool"]);
//! ```

pub mod config;
pub mod logger;
pub mod product;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{normalize, AppInfo, RawValue, Settings, SettingsError, SettingsStore};
pub use logger::{Level, Logger};
pub use product::ProductConfig;
pub use runtime::{check_runtimes, Language, RuntimeInfo};
pub use templates::{
    copy_template, replace_app_name, PackageAnswers, TemplateCatalog, TemplateEntry,
    TemplateSource,
};

#[cfg(feature = "tui")]
pub use tui::run;

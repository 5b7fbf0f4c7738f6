//! User settings: dotfile parsing, token normalization, and the merged store
//!
//! This module provides:
//! - A line-oriented properties parser for `~/.<app>` dotfiles
//! - Quoted-token normalization for list-valued settings
//! - The read-only settings store built from defaults plus the dotfile
//! - Package identity (scope, basename, version) used to locate the dotfile

pub mod appinfo;
pub mod properties;
pub mod store;
pub mod tokenize;

pub use appinfo::AppInfo;
pub use properties::PropertiesError;
pub use store::{Settings, SettingsError, SettingsStore};
pub use tokenize::{normalize, RawValue};

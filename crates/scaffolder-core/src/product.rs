//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each generator binary implements
//! to configure the scaffolding behavior for its templates and users.

use crate::config::{AppInfo, Settings, SettingsError, SettingsStore};

/// Setting names read by the scaffolding flow
pub mod keys {
    /// Default author answer
    pub const AUTHOR: &str = "author";
    /// Default npm scope user (empty for unscoped packages)
    pub const NPM_USER: &str = "npmUser";
    /// Default initial version
    pub const VERSION: &str = "version";
    /// Default answer for dependency installation
    pub const INSTALL_DEPS: &str = "installDeps";
    /// List field: keywords written to package.json
    pub const KEYWORDS: &str = "keywords";
}

/// Configuration trait for generator products
///
/// Each product defines:
/// - Product identity (package name, display name, version)
/// - Where templates are found
/// - Default answers and the user settings dotfile
/// - Dependency installation commands
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Package name; its basename names the settings dotfile
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Product version (build metadata is ignored)
    fn version(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Built-in answers, overridden by the user settings dotfile
    fn default_settings(&self) -> Settings;

    /// Name of the list-valued setting that gets token-normalized
    fn list_setting(&self) -> &'static str {
        keys::KEYWORDS
    }

    /// Commands run in the new project when dependencies are installed
    fn install_steps(&self) -> Vec<Vec<String>> {
        vec![
            ["npx", "npm-check-updates", "-u", "--silent"]
                .map(String::from)
                .to_vec(),
            ["npm", "install"].map(String::from).to_vec(),
        ]
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_name: &str, language: &str) -> Vec<String>;

    fn app_info(&self) -> AppInfo {
        AppInfo::new(self.name(), self.version())
    }

    /// Build the settings store from defaults and `~/.<basename>`.
    /// Without a home directory only the defaults apply.
    fn load_settings(&self) -> Result<SettingsStore, SettingsError> {
        match self.app_info().user_settings_path() {
            Some(path) => SettingsStore::load(self.default_settings(), self.list_setting(), &path),
            None => Ok(SettingsStore::defaults_only(
                self.default_settings(),
                self.list_setting(),
            )),
        }
    }
}

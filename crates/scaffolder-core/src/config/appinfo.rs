//! Package identity: npm scope, basename, and release version

use crate::templates::version::strip_build_metadata;
use std::path::{Path, PathBuf};

/// Identity of an application derived from its package name and version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    /// Full package name, e.g. `@acme/tool`
    pub name: String,
    /// npm scope including the `@`, or empty when unscoped
    pub scope: String,
    /// Name without scope, e.g. `tool`
    pub basename: String,
    /// Version without build metadata
    pub version: String,
}

impl AppInfo {
    pub fn new(package_name: &str, version: &str) -> Self {
        // Only the first two segments count: `a/b/c` is scope `a`, basename `b`
        let mut segments = package_name.split('/');
        let first = segments.next().unwrap_or_default();
        let (scope, basename) = match segments.next() {
            Some(second) => (first.to_string(), second.to_string()),
            None => (String::new(), first.to_string()),
        };

        Self {
            name: package_name.to_string(),
            scope,
            basename,
            version: strip_build_metadata(version),
        }
    }

    /// Dotfile holding user settings: `<home>/.<basename>`
    pub fn settings_path(&self, home: &Path) -> PathBuf {
        home.join(format!(".{}", self.basename))
    }

    /// Settings dotfile in the current user's home directory
    pub fn user_settings_path(&self) -> Option<PathBuf> {
        dirs::home_dir().map(|home| self.settings_path(&home))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscoped_name() {
        let info = AppInfo::new("create-project", "1.0.0");
        assert_eq!(info.scope, "");
        assert_eq!(info.basename, "create-project");
    }

    #[test]
    fn test_extra_segments_are_ignored() {
        let info = AppInfo::new("a/b/c", "1.0.0");
        assert_eq!(info.scope, "a");
        assert_eq!(info.basename, "b");
        assert_eq!(
            info.settings_path(Path::new("/home/me")),
            PathBuf::from("/home/me/.b")
        );
    }

    #[test]
    fn test_scoped_name() {
        let info = AppInfo::new("@acme/tool", "2.1.0");
        assert_eq!(info.scope, "@acme");
        assert_eq!(info.basename, "tool");
        assert_eq!(info.name, "@acme/tool");
    }

    #[test]
    fn test_version_drops_build_metadata() {
        assert_eq!(AppInfo::new("x", "1.2.3+build.7").version, "1.2.3");
        assert_eq!(AppInfo::new("x", "1.2.3-rc.1").version, "1.2.3-rc.1");
    }

    #[test]
    fn test_settings_path() {
        let info = AppInfo::new("@acme/tool", "1.0.0");
        assert_eq!(
            info.settings_path(Path::new("/home/user")),
            PathBuf::from("/home/user/.tool")
        );
    }
}

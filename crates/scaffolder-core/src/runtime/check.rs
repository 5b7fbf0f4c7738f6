//! Tool detection for git and npm, plus language variant labels

use anyhow::Result;
use std::fmt;
use std::process::Command;

/// Known template language variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    JavaScript,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
        }
    }

    /// Map a variant directory name (`js`, `typescript`, ...) to a language
    pub fn from_variant(variant: &str) -> Option<Self> {
        match variant.to_lowercase().as_str() {
            "typescript" | "ts" => Some(Language::TypeScript),
            "javascript" | "js" => Some(Language::JavaScript),
            _ => None,
        }
    }

    /// Picker label for a variant: `js (JavaScript)`, or the bare name
    pub fn variant_label(variant: &str) -> String {
        match Self::from_variant(variant) {
            Some(lang) => format!("{} ({})", variant, lang.display_name()),
            None => variant.to_string(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tool detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// `git (2.43.0)` or `npm (not installed)`
    pub fn summary(&self) -> String {
        if self.available {
            format!("{} ({})", self.name, self.version.as_deref().unwrap_or("unknown"))
        } else {
            format!("{} (not installed)", self.name)
        }
    }
}

/// Run `<program> --version` and report whether it succeeded
fn probe(name: &'static str, program: &str) -> RuntimeInfo {
    match Command::new(program).arg("--version").output() {
        Ok(out) if out.status.success() => RuntimeInfo {
            name,
            version: Some(String::from_utf8_lossy(&out.stdout).trim().to_string()),
            available: true,
        },
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if git is available
pub fn check_git() -> RuntimeInfo {
    probe("git", "git")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", npm_program())
}

/// npm ships as a `.cmd` shim on Windows
pub(crate) fn npm_program() -> &'static str {
    if cfg!(windows) {
        "npm.cmd"
    } else {
        "npm"
    }
}

/// Check the tools a new project needs.
///
/// git is required. npm is only probed when dependencies will be installed,
/// and its absence is reported rather than treated as a failure.
pub fn check_runtimes(install_deps: bool) -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();

    let git = check_git();
    if !git.available {
        anyhow::bail!("Missing required tools:\n  - git (install from https://git-scm.com)");
    }
    results.push(git);

    if install_deps {
        results.push(check_npm());
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_mapping() {
        assert_eq!(Language::from_variant("js"), Some(Language::JavaScript));
        assert_eq!(Language::from_variant("TS"), Some(Language::TypeScript));
        assert_eq!(Language::from_variant("py"), None);
        assert_eq!(Language::from_variant("elm"), None);
    }

    #[test]
    fn test_variant_label() {
        assert_eq!(Language::variant_label("js"), "js (JavaScript)");
        assert_eq!(Language::variant_label("elm"), "elm");
        assert_eq!(Language::variant_label("py"), "py");
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let info = probe("nothing", "definitely-not-a-real-program-xyz");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert_eq!(info.summary(), "nothing (not installed)");
    }

    #[test]
    fn test_summary_with_version() {
        let info = RuntimeInfo {
            name: "git",
            version: Some("git version 2.43.0".to_string()),
            available: true,
        };
        assert_eq!(info.summary(), "git (git version 2.43.0)");
    }
}

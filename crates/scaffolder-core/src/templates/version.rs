//! Version validation for generated projects

use anyhow::Result;
use semver::{BuildMetadata, Version};

/// Parse an initial project version, accepting an optional leading `v`
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Validation message for a version prompt, or `None` when valid
pub fn validate_version(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        return Some("Version cannot be empty!".to_string());
    }
    parse_version(input).err().map(|e| e.to_string())
}

/// Drop `+build` metadata from a version string.
/// Non-semver strings are cut at the first `+`.
pub fn strip_build_metadata(version_str: &str) -> String {
    match Version::parse(version_str) {
        Ok(mut version) => {
            version.build = BuildMetadata::EMPTY;
            version.to_string()
        }
        Err(_) => version_str
            .split('+')
            .next()
            .unwrap_or(version_str)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_prefixed() {
        assert_eq!(parse_version("1.0.0").unwrap(), Version::new(1, 0, 0));
        assert_eq!(parse_version("v0.3.1").unwrap(), Version::new(0, 3, 1));
    }

    #[test]
    fn test_invalid_versions() {
        assert!(parse_version("1.0").is_err());
        assert!(validate_version("banana").unwrap().contains("banana"));
        assert!(validate_version("").is_some());
        assert!(validate_version("2.0.0-beta.1").is_none());
    }

    #[test]
    fn test_strip_build_metadata() {
        assert_eq!(strip_build_metadata("1.2.3+sha.abc"), "1.2.3");
        assert_eq!(strip_build_metadata("1.2.3-rc.1+b5"), "1.2.3-rc.1");
        assert_eq!(strip_build_metadata("1.2.3"), "1.2.3");
        assert_eq!(strip_build_metadata("dev+local"), "dev");
    }
}

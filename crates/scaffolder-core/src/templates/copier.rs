//! Template tree copying

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Copy every file under `source` into `target_dir`, keeping the relative
/// layout. Returns the relative paths of the copied files.
pub async fn copy_template(source: &Path, target_dir: &Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        anyhow::bail!("Template not found: {}", source.display());
    }

    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut copied_files = Vec::new();

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read template: {}", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("Template entry outside of template root")?;
        let target_path = target_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path)
                .await
                .with_context(|| format!("Failed to create directory: {}", target_path.display()))?;
            continue;
        }

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::copy(entry.path(), &target_path)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        copied_files.push(relative.to_path_buf());
    }

    Ok(copied_files)
}

/// Delete an existing project directory before regenerating it
pub async fn remove_existing(target_dir: &Path) -> Result<()> {
    fs::remove_dir_all(target_dir)
        .await
        .with_context(|| format!("Failed to delete directory: {}", target_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copies_nested_tree() {
        let src = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("src/utils")).unwrap();
        std::fs::create_dir_all(src.path().join("assets")).unwrap();
        std::fs::write(src.path().join("package.json"), "{}").unwrap();
        std::fs::write(src.path().join("src/main.js"), "main").unwrap();
        std::fs::write(src.path().join("src/utils/defaults.js"), "defaults").unwrap();

        let out = tempfile::tempdir().unwrap();
        let target = out.path().join("demo");
        let copied = copy_template(src.path(), &target).await.unwrap();

        assert_eq!(
            copied,
            vec![
                PathBuf::from("package.json"),
                PathBuf::from("src/main.js"),
                PathBuf::from("src/utils/defaults.js"),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(target.join("src/utils/defaults.js")).unwrap(),
            "defaults"
        );
        // Empty directories are recreated too
        assert!(target.join("assets").is_dir());
    }

    #[tokio::test]
    async fn test_missing_source() {
        let out = tempfile::tempdir().unwrap();
        let err = copy_template(&out.path().join("missing"), &out.path().join("demo"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Template not found"));
    }

    #[tokio::test]
    async fn test_remove_existing() {
        let out = tempfile::tempdir().unwrap();
        let target = out.path().join("demo");
        std::fs::create_dir_all(target.join("nested")).unwrap();
        std::fs::write(target.join("nested/file"), "x").unwrap();

        remove_existing(&target).await.unwrap();
        assert!(!target.exists());
    }
}

//! Corpus discovery - recursive walk selecting source files by suffix.

use crate::utils::ignore::{load_ignore_file, IgnoreSet};
use crate::utils::paths::display_path;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A source file selected for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path used to read the file
    pub path: PathBuf,
    /// Root-relative Unix-style name used inside records
    pub display_path: String,
}

/// Walk `root` and return regular files whose name ends with one of `suffixes`
///
/// Entries that cannot be read are logged and skipped. Files matched by
/// `exclude` or by `.callgraphignore` in the root are left out. The result is
/// sorted by display path so repeated runs emit records in the same order.
pub fn discover_source_files(root: &Path, suffixes: &[String], exclude: &[String]) -> Vec<SourceFile> {
    let mut patterns = exclude.to_vec();
    match load_ignore_file(root) {
        Ok(from_file) => patterns.extend(from_file),
        Err(e) => warn!("{}", e),
    }
    let ignore = IgnoreSet::new(&patterns);
    if !ignore.is_empty() {
        debug!("Excluding {} patterns under {}", patterns.len(), root.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error accessing path: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !suffixes.iter().any(|suffix| file_name.ends_with(suffix.as_str())) {
            continue;
        }

        let shown = display_path(entry.path(), root);
        if ignore.is_ignored(&shown) {
            debug!("Excluded {}", shown);
            continue;
        }

        files.push(SourceFile {
            path: entry.into_path(),
            display_path: shown,
        });
    }

    files.sort_by(|a, b| a.display_path.cmp(&b.display_path));
    debug!("Discovered {} source files under {}", files.len(), root.display());
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package main\n").unwrap();
    }

    fn names(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.display_path.as_str()).collect()
    }

    #[test]
    fn test_selects_suffix_recursively_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "z.go");
        touch(root, "pkg/a.go");
        touch(root, "README.md");
        fs::create_dir_all(root.join("dir.go")).unwrap();

        let files = discover_source_files(root, &[".go".to_string()], &[]);
        assert_eq!(names(&files), vec!["pkg/a.go", "z.go"]);
        assert!(files[0].path.ends_with("pkg/a.go"));
    }

    #[test]
    fn test_multiple_suffixes() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.go");
        touch(temp_dir.path(), "b.go.tmpl");

        let files = discover_source_files(
            temp_dir.path(),
            &[".go".to_string(), ".go.tmpl".to_string()],
            &[],
        );
        assert_eq!(names(&files), vec!["a.go", "b.go.tmpl"]);
    }

    #[test]
    fn test_exclude_and_ignore_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "main.go");
        touch(root, "main_test.go");
        touch(root, "vendor/dep/dep.go");
        fs::write(root.join(".callgraphignore"), "vendor/\n").unwrap();

        let files = discover_source_files(root, &[".go".to_string()], &["*_test.go".to_string()]);
        assert_eq!(names(&files), vec!["main.go"]);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let files = discover_source_files(&temp_dir.path().join("nope"), &[".go".to_string()], &[]);
        assert!(files.is_empty());
    }
}

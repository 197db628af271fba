// Path conversion utilities
//
// Record names embed the file they come from. Names use the path relative to
// the corpus root with `/` separators so output is identical across platforms.

use anyhow::{Context, Result};
use std::path::{Path, MAIN_SEPARATOR};

/// Convert a path below `root` to a relative Unix-style path (with `/` separators)
///
/// # Examples
/// ```text
/// to_relative_unix_style("/home/dev/project/pkg/main.go", "/home/dev/project")
/// // => "pkg/main.go"
/// ```
pub fn to_relative_unix_style(path: &Path, root: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).with_context(|| {
        format!(
            "File path '{}' is not within root '{}'",
            path.display(),
            root.display()
        )
    })?;

    let path_str = relative.to_str().context("Path contains invalid UTF-8")?;

    // On Unix, MAIN_SEPARATOR is already '/', so this is a no-op
    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.to_string()
    };

    Ok(unix_style.trim_start_matches("./").to_string())
}

/// Name used for `path` inside records; falls back to the lossy full path
pub fn display_path(path: &Path, root: &Path) -> String {
    to_relative_unix_style(path, root)
        .unwrap_or_else(|_| path.to_string_lossy().replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_nested_file() {
        let root = PathBuf::from("/home/dev/project");
        let path = PathBuf::from("/home/dev/project/pkg/server/main.go");

        assert_eq!(
            to_relative_unix_style(&path, &root).unwrap(),
            "pkg/server/main.go"
        );
    }

    #[test]
    fn test_relative_root() {
        let root = PathBuf::from(".");
        let path = PathBuf::from("./example.go");

        assert_eq!(to_relative_unix_style(&path, &root).unwrap(), "example.go");
    }

    #[test]
    fn test_unicode_and_spaces() {
        let root = PathBuf::from("/home/dev/my projects");
        let path = PathBuf::from("/home/dev/my projects/src/日本語.go");

        assert_eq!(to_relative_unix_style(&path, &root).unwrap(), "src/日本語.go");
    }

    #[test]
    fn test_outside_root_rejected() {
        let root = PathBuf::from("/home/dev/project");
        let outside = PathBuf::from("/etc/passwd");

        let err = to_relative_unix_style(&outside, &root).unwrap_err();
        assert!(err.to_string().contains("not within root"));
        assert_eq!(display_path(&outside, &root), "/etc/passwd");
    }
}

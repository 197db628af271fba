//! Exclusion patterns for corpus discovery
//!
//! Patterns come from the configuration and from an optional `.callgraphignore`
//! file in the corpus root. Supported forms:
//! - Directory patterns (ending with `/`): exclude every file below a directory
//!   with that name, at any depth
//! - Glob patterns (`*_test.go`, `gen/**/*.go`): matched against the
//!   root-relative Unix-style path and against the bare file name
//!
use anyhow::Result;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the per-corpus ignore file
pub const IGNORE_FILE_NAME: &str = ".callgraphignore";

/// Load ignore patterns from `.callgraphignore` in the corpus root
///
/// Empty lines and comments (lines starting with #) are skipped.
pub fn load_ignore_file(root: &Path) -> Result<Vec<String>> {
    let ignore_file = root.join(IGNORE_FILE_NAME);

    if !ignore_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&ignore_file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", IGNORE_FILE_NAME, e))?;

    let patterns: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect();

    if !patterns.is_empty() {
        debug!(
            "Loaded {} ignore patterns from {}",
            patterns.len(),
            IGNORE_FILE_NAME
        );
    }

    Ok(patterns)
}

/// Compiled set of exclusion patterns
#[derive(Debug, Default)]
pub struct IgnoreSet {
    directories: Vec<String>,
    globs: Vec<Pattern>,
}

impl IgnoreSet {
    /// Compile patterns; invalid globs are logged and dropped
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut set = IgnoreSet::default();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if let Some(dir_name) = pattern.strip_suffix('/') {
                set.directories.push(dir_name.trim_matches('/').to_string());
                continue;
            }
            match Pattern::new(pattern) {
                Ok(compiled) => set.globs.push(compiled),
                Err(e) => warn!("Ignoring invalid exclude pattern '{}': {}", pattern, e),
            }
        }

        set
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.globs.is_empty()
    }

    /// Whether a root-relative Unix-style path is excluded
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        let mut components: Vec<&str> = relative_path.split('/').collect();
        let file_name = components.pop().unwrap_or(relative_path);

        // Directory patterns match whole path components only
        if components
            .iter()
            .any(|component| self.directories.iter().any(|dir| dir == component))
        {
            return true;
        }

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.globs.iter().any(|glob| {
            glob.matches_with(relative_path, options) || glob.matches_with(file_name, options)
        })
    }
}

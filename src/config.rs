//! Run configuration with layered resolution.

use crate::errors::ConfigError;
use crate::extractors::base::{DuplicatePolicy, ExtractOptions};
use crate::sink::WriteMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the optional project config file looked up in the corpus root
pub const CONFIG_FILE_NAME: &str = "callgraph.toml";

/// Settings for one extraction run
///
/// Resolution order (highest priority first):
/// 1. CLI flags
/// 2. Environment variables (`CALLGRAPH_*`)
/// 3. Project config (`callgraph.toml` in the root)
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallgraphConfig {
    /// Corpus root; chosen before the project file is read, so not a file key
    #[serde(skip)]
    pub root: PathBuf,
    pub output: PathBuf,
    pub suffixes: Vec<String>,
    pub with_content: bool,
    pub write_mode: WriteMode,
    pub exclude: Vec<String>,
    /// Worker threads; `None` uses rayon's default
    pub threads: Option<usize>,
    pub duplicate_policy: DuplicatePolicy,
    pub include_unattached_comments: bool,
}

impl Default for CallgraphConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from("callgraph.json"),
            suffixes: vec![".go".to_string()],
            with_content: false,
            write_mode: WriteMode::Append,
            exclude: Vec::new(),
            threads: None,
            duplicate_policy: DuplicatePolicy::Overwrite,
            include_unattached_comments: false,
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Replaces the configured suffix list when non-empty
    pub suffixes: Vec<String>,
    /// Added to the configured exclude list
    pub exclude: Vec<String>,
    pub with_content: bool,
    pub replace: bool,
    pub threads: Option<usize>,
    pub include_unattached_comments: bool,
    pub reject_duplicates: bool,
}

impl CallgraphConfig {
    /// Resolve the configuration from CLI flags, the process environment and
    /// the project file.
    pub fn load(cli: &CliOverrides) -> Result<Self, ConfigError> {
        Self::load_with_env(cli, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an injectable environment lookup.
    pub fn load_with_env<F>(cli: &CliOverrides, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = cli
            .root
            .clone()
            .or_else(|| env("CALLGRAPH_ROOT").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let project_config_path = root.join(CONFIG_FILE_NAME);
        let mut config = if project_config_path.is_file() {
            debug!("Loading {}", project_config_path.display());
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };
        config.root = root;

        config.apply_env_overrides(&env)?;
        config.apply_cli_overrides(cli);

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn apply_env_overrides<F>(&mut self, env: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(output) = env("CALLGRAPH_OUTPUT") {
            self.output = PathBuf::from(output);
        }
        if let Some(value) = env("CALLGRAPH_WITH_CONTENT") {
            self.with_content = parse_bool("CALLGRAPH_WITH_CONTENT", &value)?;
        }
        if let Some(value) = env("CALLGRAPH_WRITE_MODE") {
            self.write_mode = value.parse().map_err(|message| ConfigError::Validation {
                field: "CALLGRAPH_WRITE_MODE".to_string(),
                message,
            })?;
        }
        if let Some(value) = env("CALLGRAPH_THREADS") {
            let threads = value.trim().parse::<usize>().map_err(|e| ConfigError::Validation {
                field: "CALLGRAPH_THREADS".to_string(),
                message: e.to_string(),
            })?;
            self.threads = Some(threads);
        }
        Ok(())
    }

    fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        if !cli.suffixes.is_empty() {
            self.suffixes = cli.suffixes.clone();
        }
        self.exclude.extend(cli.exclude.iter().cloned());
        if cli.with_content {
            self.with_content = true;
        }
        if cli.replace {
            self.write_mode = WriteMode::Replace;
        }
        if cli.threads.is_some() {
            self.threads = cli.threads;
        }
        if cli.include_unattached_comments {
            self.include_unattached_comments = true;
        }
        if cli.reject_duplicates {
            self.duplicate_policy = DuplicatePolicy::Reject;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suffixes.is_empty() || self.suffixes.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::Validation {
                field: "suffixes".to_string(),
                message: "must contain at least one non-empty suffix".to_string(),
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::Validation {
                field: "threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Per-file options derived from this configuration
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            with_content: self.with_content,
            duplicate_policy: self.duplicate_policy,
            include_unattached_comments: self.include_unattached_comments,
        }
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::Validation {
            field: field.to_string(),
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn cli_for(root: &Path) -> CliOverrides {
        CliOverrides {
            root: Some(root.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = CallgraphConfig::load_with_env(&cli_for(temp_dir.path()), env_from(&[])).unwrap();

        assert_eq!(config.root, temp_dir.path());
        assert_eq!(config.output, PathBuf::from("callgraph.json"));
        assert_eq!(config.suffixes, vec![".go".to_string()]);
        assert_eq!(config.write_mode, WriteMode::Append);
        assert!(!config.with_content);
        assert_eq!(config.threads, None);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Overwrite);
    }

    #[test]
    fn test_project_file_then_env_then_cli() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"
output = "from-file.json"
suffixes = [".go", ".gox"]
exclude = ["vendor/"]
threads = 2
with_content = true
"#,
        )
        .unwrap();

        let from_file =
            CallgraphConfig::load_with_env(&cli_for(temp_dir.path()), env_from(&[])).unwrap();
        assert_eq!(from_file.output, PathBuf::from("from-file.json"));
        assert_eq!(from_file.suffixes.len(), 2);
        assert_eq!(from_file.threads, Some(2));
        assert!(from_file.with_content);

        let env = env_from(&[
            ("CALLGRAPH_OUTPUT", "from-env.json"),
            ("CALLGRAPH_THREADS", "3"),
            ("CALLGRAPH_WRITE_MODE", "replace"),
            ("CALLGRAPH_WITH_CONTENT", "false"),
        ]);
        let from_env = CallgraphConfig::load_with_env(&cli_for(temp_dir.path()), &env).unwrap();
        assert_eq!(from_env.output, PathBuf::from("from-env.json"));
        assert_eq!(from_env.threads, Some(3));
        assert_eq!(from_env.write_mode, WriteMode::Replace);
        assert!(!from_env.with_content);

        let mut cli = cli_for(temp_dir.path());
        cli.output = Some(PathBuf::from("from-cli.json"));
        cli.threads = Some(4);
        cli.exclude = vec!["*_test.go".to_string()];
        let from_cli = CallgraphConfig::load_with_env(&cli, &env).unwrap();
        assert_eq!(from_cli.output, PathBuf::from("from-cli.json"));
        assert_eq!(from_cli.threads, Some(4));
        assert_eq!(from_cli.exclude, vec!["vendor/".to_string(), "*_test.go".to_string()]);
    }

    #[test]
    fn test_root_from_env() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_string_lossy().to_string();
        let config =
            CallgraphConfig::load_with_env(&CliOverrides::default(), env_from(&[("CALLGRAPH_ROOT", root.as_str())]))
                .unwrap();
        assert_eq!(config.root, temp_dir.path());
    }

    #[test]
    fn test_cli_flags_map_to_policies() {
        let temp_dir = TempDir::new().unwrap();
        let mut cli = cli_for(temp_dir.path());
        cli.replace = true;
        cli.reject_duplicates = true;
        cli.include_unattached_comments = true;
        cli.suffixes = vec![".gox".to_string()];

        let config = CallgraphConfig::load_with_env(&cli, env_from(&[])).unwrap();
        assert_eq!(config.write_mode, WriteMode::Replace);
        assert_eq!(config.suffixes, vec![".gox".to_string()]);

        let options = config.extract_options();
        assert_eq!(options.duplicate_policy, DuplicatePolicy::Reject);
        assert!(options.include_unattached_comments);
    }

    #[test]
    fn test_validation_failures() {
        let temp_dir = TempDir::new().unwrap();

        let mut cli = cli_for(temp_dir.path());
        cli.threads = Some(0);
        let err = CallgraphConfig::load_with_env(&cli, env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "threads"));

        let config = CallgraphConfig::from_toml("suffixes = []").unwrap();
        assert!(config.validate().is_err());

        let err = CallgraphConfig::load_with_env(
            &cli_for(temp_dir.path()),
            env_from(&[("CALLGRAPH_THREADS", "many")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_invalid_project_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "threads = \"two\"").unwrap();

        let err = CallgraphConfig::load_with_env(&cli_for(temp_dir.path()), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_toml_policies() {
        let config = CallgraphConfig::from_toml(
            "write_mode = \"replace\"\nduplicate_policy = \"reject\"\n",
        )
        .unwrap();
        assert_eq!(config.write_mode, WriteMode::Replace);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.suffixes, vec![".go".to_string()]);
    }
}

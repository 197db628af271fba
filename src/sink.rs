//! Output sink - one JSON array per run.
//!
//! In `Append` mode each run adds a new top-level array after the previous
//! ones, so the file as a whole is a stream of JSON values rather than one
//! JSON document. `read_sink` understands that stream.

use crate::errors::SinkError;
use crate::extractors::base::Declaration;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// How a run's output is combined with existing sink content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Add this run's array after whatever the sink already holds
    #[default]
    Append,
    /// Truncate the sink before writing
    Replace,
}

impl std::str::FromStr for WriteMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "append" => Ok(WriteMode::Append),
            "replace" | "overwrite" => Ok(WriteMode::Replace),
            other => Err(format!("expected 'append' or 'replace', got '{}'", other)),
        }
    }
}

/// Serialize `records` as one JSON array plus newline and write it in one call
///
/// Returns the number of bytes written. Serialization happens before the sink
/// is opened, so a failure leaves the sink untouched.
pub fn write_records(path: &Path, records: &[Declaration], mode: WriteMode) -> Result<usize, SinkError> {
    let mut payload = serde_json::to_vec(records)?;
    payload.push(b'\n');

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Append => options.append(true),
        WriteMode::Replace => options.write(true).truncate(true),
    };

    let mut file = options.open(path).map_err(|source| SinkError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&payload)
        .and_then(|_| file.flush())
        .map_err(|source| SinkError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "Wrote {} records ({} bytes) to {}",
        records.len(),
        payload.len(),
        path.display()
    );
    Ok(payload.len())
}

/// Read every run stored in a sink, oldest first
///
/// A `null` run (written by tools that encode an empty result that way)
/// reads as an empty run.
pub fn read_sink(path: &Path) -> Result<Vec<Vec<Declaration>>, SinkError> {
    let content = fs::read_to_string(path).map_err(|e| SinkError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    serde_json::Deserializer::from_str(&content)
        .into_iter::<Option<Vec<Declaration>>>()
        .map(|run| {
            run.map(Option::unwrap_or_default)
                .map_err(|e| SinkError::Read {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{DeclarationKind, LineRange};
    use tempfile::TempDir;

    fn record(name: &str) -> Declaration {
        Declaration::new(name.to_string(), DeclarationKind::Function, LineRange::new(1, 2))
    }

    #[test]
    fn test_append_twice_yields_two_arrays() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path().join("callgraph.json");

        write_records(&sink, &[record("a a.go:1")], WriteMode::Append).unwrap();
        write_records(&sink, &[record("b b.go:1"), record("c c.go:1")], WriteMode::Append).unwrap();

        let raw = fs::read_to_string(&sink).unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.starts_with('['));
        assert!(serde_json::from_str::<Vec<Declaration>>(&raw).is_err());

        let runs = read_sink(&sink).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![record("a a.go:1")]);
        assert_eq!(runs[1].len(), 2);
    }

    #[test]
    fn test_replace_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path().join("callgraph.json");

        write_records(&sink, &[record("a a.go:1")], WriteMode::Append).unwrap();
        write_records(&sink, &[record("b b.go:1")], WriteMode::Replace).unwrap();

        let runs = read_sink(&sink).unwrap();
        assert_eq!(runs, vec![vec![record("b b.go:1")]]);
    }

    #[test]
    fn test_empty_run_writes_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path().join("callgraph.json");

        write_records(&sink, &[], WriteMode::Append).unwrap();
        assert_eq!(fs::read_to_string(&sink).unwrap(), "[]\n");
    }

    #[test]
    fn test_reads_null_runs() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path().join("callgraph.json");
        fs::write(&sink, "null\n[]\n").unwrap();

        let runs = read_sink(&sink).unwrap();
        assert_eq!(runs, vec![Vec::new(), Vec::new()]);
    }

    #[test]
    fn test_unopenable_sink_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let sink = temp_dir.path().join("missing-dir").join("callgraph.json");

        let err = write_records(&sink, &[record("a a.go:1")], WriteMode::Append).unwrap_err();
        assert!(matches!(err, SinkError::Open { .. }));
    }

    #[test]
    fn test_write_mode_parsing() {
        assert_eq!("append".parse::<WriteMode>(), Ok(WriteMode::Append));
        assert_eq!("Replace".parse::<WriteMode>(), Ok(WriteMode::Replace));
        assert!("merge".parse::<WriteMode>().is_err());
    }
}

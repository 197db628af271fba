//! Error taxonomy for extraction runs.
//!
//! Per-file failures (`ExtractError`) are recovered by the aggregator: the file
//! is logged and dropped. Sink failures (`SinkError`) abort the run.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to extract declarations from a single source file
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    #[error("unsupported file extension for {path}")]
    UnsupportedLanguage { path: PathBuf },

    #[error("failed to set parser language for {language}: {message}")]
    ParserSetup { language: String, message: String },

    #[error("syntax error in {file} at {line}:{column}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
    },

    #[error("{file}:{line}: '{first}' and '{second}' start on the same line")]
    DuplicateStartLine {
        file: String,
        line: usize,
        first: String,
        second: String,
    },
}

/// Failure to open or write the output sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open output {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to read sink {path}: {message}")]
    Read { path: PathBuf, message: String },
}

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    Validation { field: String, message: String },
}

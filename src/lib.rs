// callgraph - declaration and call-reference extraction for Go source trees
//
// Parses each file with tree-sitter, records functions, top-level globals and
// struct types with their bare-name calls and attached comments, and appends
// one JSON array per run to callgraph.json.
//
// Layout:
// - extractors: per-file walker (Go) and the ExtractorManager entry point
// - comments: comment normalization and association
// - discovery / aggregator: corpus walk and parallel extraction
// - sink: JSON output
// - config / logging: ambient setup shared with the binary

pub mod aggregator;
pub mod comments;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod extractors;
pub mod language;
pub mod logging;
pub mod sink;
pub mod utils;

pub use aggregator::{run, CancellationToken, CorpusAggregator, CorpusReport, FileFailure};
pub use config::{CallgraphConfig, CliOverrides};
pub use discovery::{discover_source_files, SourceFile};
pub use errors::{ConfigError, ExtractError, SinkError};
pub use extractors::{
    Declaration, DeclarationKind, DuplicatePolicy, ExtractOptions, ExtractorManager, LineRange,
};
pub use sink::{read_sink, write_records, WriteMode};

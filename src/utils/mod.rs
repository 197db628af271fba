// Utilities shared by discovery, extraction and association.

/// Exclusion patterns (.callgraphignore support)
pub mod ignore;

/// Key-ordered views over per-file lookup maps
pub mod ordering;

/// Path conversion (absolute -> root-relative Unix-style)
pub mod paths;

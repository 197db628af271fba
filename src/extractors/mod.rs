//! Language extractors
//!
//! - `base` - declaration record types and shared extractor helpers
//! - `manager` - ExtractorManager, the per-file entry point
//! - `go` - Go declaration walker and call reference collector

pub mod base;
pub mod go;
pub mod manager;

pub use base::{Declaration, DeclarationKind, DuplicatePolicy, ExtractOptions, LineRange};
pub use manager::ExtractorManager;

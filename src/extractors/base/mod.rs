// Base extractor types and helpers
//
// - types.rs: the declaration record and per-file options
// - extractor.rs: BaseExtractor (node text, line ranges, record creation)
// - tree_methods.rs: tree navigation helpers

pub mod extractor;
pub mod tree_methods;
pub mod types;

pub use extractor::BaseExtractor;
pub use types::{
    CommentEntry, Declaration, DeclarationKind, DuplicatePolicy, ExtractOptions, LineRange,
};

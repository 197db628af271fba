//! Language Support - tree-sitter language configuration
//!
//! All grammar lookups go through this module so the extractor manager and
//! file discovery agree on what a supported source file is.

use anyhow::Result;

/// Languages with a declaration extractor
pub const SUPPORTED_LANGUAGES: &[&str] = &["go"];

/// Get tree-sitter language parser for a given language name
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "go" => Ok(tree_sitter_go::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: {}",
            language,
            SUPPORTED_LANGUAGES.join(", ")
        )),
    }
}

/// Detect language from file extension (without the leading dot)
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "go" => Some("go"),
        _ => None,
    }
}

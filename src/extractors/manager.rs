//! ExtractorManager - Public API for per-file declaration extraction
//!
//! Reads and parses one source file and delegates to the language-specific
//! extractor. Every failure is reported for that file only; callers decide
//! whether to skip it or abort.

use crate::errors::ExtractError;
use crate::extractors::base::{Declaration, ExtractOptions};
use crate::extractors::go::GoExtractor;
use std::fs;
use std::path::Path;
use tree_sitter::Parser;

/// Stateless manager delegating to language-specific extractors
pub struct ExtractorManager {}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self {}
    }

    /// Read `path` and extract its declarations
    ///
    /// `display_path` is the name used inside records (`<ident> <display_path>:<line>`).
    pub fn extract_file(
        &self,
        path: &Path,
        display_path: &str,
        options: &ExtractOptions,
    ) -> Result<Vec<Declaration>, ExtractError> {
        let content = read_source(path)?;
        self.extract_source(display_path, content, options)
    }

    /// Read `path` and extract it with an explicit language
    ///
    /// Used for corpus runs, where files are selected by configured suffix
    /// rather than by their extension.
    pub fn extract_file_as(
        &self,
        path: &Path,
        display_path: &str,
        language: &str,
        options: &ExtractOptions,
    ) -> Result<Vec<Declaration>, ExtractError> {
        let content = read_source(path)?;
        self.extract_source_as(display_path, content, language, options)
    }

    /// Extract declarations from in-memory source
    pub fn extract_source(
        &self,
        file_path: &str,
        content: String,
        options: &ExtractOptions,
    ) -> Result<Vec<Declaration>, ExtractError> {
        let language = self.get_language_from_extension(file_path)?;
        self.extract_source_as(file_path, content, language, options)
    }

    /// Extract declarations from in-memory source in the given language
    pub fn extract_source_as(
        &self,
        file_path: &str,
        content: String,
        language: &str,
        options: &ExtractOptions,
    ) -> Result<Vec<Declaration>, ExtractError> {
        let mut parser = Parser::new();
        let tree_sitter_language =
            crate::language::get_tree_sitter_language(language).map_err(|e| {
                ExtractError::ParserSetup {
                    language: language.to_string(),
                    message: e.to_string(),
                }
            })?;
        parser
            .set_language(&tree_sitter_language)
            .map_err(|e| ExtractError::ParserSetup {
                language: language.to_string(),
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(&content, None)
            .ok_or_else(|| ExtractError::Parse {
                file: file_path.to_string(),
                line: 1,
                column: 1,
            })?;

        let declarations = match language {
            "go" => GoExtractor::new(file_path.to_string(), content, options.clone())
                .extract_declarations(&tree)?,
            _ => {
                return Err(ExtractError::UnsupportedLanguage {
                    path: file_path.into(),
                })
            }
        };

        tracing::debug!(
            "Extracted {} declarations from {} file: {}",
            declarations.len(),
            language,
            file_path
        );
        Ok(declarations)
    }

    fn get_language_from_extension(&self, file_path: &str) -> Result<&'static str, ExtractError> {
        let extension = Path::new(file_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        crate::language::detect_language_from_extension(extension).ok_or_else(|| {
            ExtractError::UnsupportedLanguage {
                path: file_path.into(),
            }
        })
    }
}

fn read_source(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| ExtractError::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

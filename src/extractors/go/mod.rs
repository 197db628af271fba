mod calls;
mod comments;
mod functions;
mod helpers;
mod specs;
mod types;

pub use helpers::{TypeExpr, UNKNOWN_TYPE};

use crate::comments::{associate_comments, comment_record};
use crate::errors::ExtractError;
use crate::extractors::base::{BaseExtractor, Declaration, DuplicatePolicy, ExtractOptions};
use std::collections::HashMap;
use tracing::{debug, warn};
use tree_sitter::{Node, Tree};

/// Line -> declaration table for one file
type DeclarationTable = HashMap<usize, Declaration>;

/// Go language extractor producing declaration records:
/// - Functions and methods, with the bare-name calls made in their bodies
/// - Top-level `var` and `const` bindings, one record per identifier
/// - Struct types (top level or local), with their fields
///
/// Comments found anywhere in the file are absorbed into the declarations
/// before the records are returned.
pub struct GoExtractor {
    base: BaseExtractor,
}

impl GoExtractor {
    pub fn new(file_path: String, content: String, options: ExtractOptions) -> Self {
        Self {
            base: BaseExtractor::new(file_path, content, options),
        }
    }

    /// Extract the file's declarations, ascending by start line
    pub fn extract_declarations(&self, tree: &Tree) -> Result<Vec<Declaration>, ExtractError> {
        let root = tree.root_node();

        if let Some(error_node) = self.base.find_first_error(&root) {
            let position = error_node.start_position();
            return Err(ExtractError::Parse {
                file: self.base.file_path.clone(),
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        let mut table = DeclarationTable::new();
        self.walk_tree(root, &mut table)?;

        let comments = self.collect_comments(root);
        let comment_count = comments.len();
        let association = associate_comments(table, comments);

        let mut records = association.declarations;
        if self.base.options.include_unattached_comments {
            records.extend(
                association
                    .unattached
                    .into_iter()
                    .map(|(line, entry)| comment_record(&self.base.file_path, line, entry)),
            );
            records.sort_by_key(|record| record.start_line());
        }

        debug!(
            "Extracted {} records ({} comments) from {}",
            records.len(),
            comment_count,
            self.base.file_path
        );
        Ok(records)
    }

    /// Walk the whole tree, recording every declaration kind we know about
    fn walk_tree(&self, node: Node, table: &mut DeclarationTable) -> Result<(), ExtractError> {
        match node.kind() {
            "import_declaration" => return Ok(()),
            "function_declaration" | "method_declaration" => {
                let declaration = self.extract_function(node);
                self.record(table, declaration)?;
            }
            "var_declaration" | "const_declaration" if self.is_top_level(node) => {
                for declaration in self.extract_global_symbols(node) {
                    self.record(table, declaration)?;
                }
            }
            "type_declaration" => {
                for declaration in self.extract_struct_types(node) {
                    self.record(table, declaration)?;
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk_tree(child, table)?;
        }
        Ok(())
    }

    fn is_top_level(&self, node: Node) -> bool {
        node.parent()
            .is_some_and(|parent| parent.kind() == "source_file")
    }

    /// Insert a declaration keyed by its start line, applying the duplicate policy
    fn record(
        &self,
        table: &mut DeclarationTable,
        declaration: Declaration,
    ) -> Result<(), ExtractError> {
        let line = declaration.start_line();
        if let Some(previous) = table.get(&line) {
            match self.base.options.duplicate_policy {
                DuplicatePolicy::Overwrite => {
                    warn!(
                        "{}:{}: '{}' replaces '{}' (same start line)",
                        self.base.file_path, line, declaration.name, previous.name
                    );
                }
                DuplicatePolicy::Reject => {
                    return Err(ExtractError::DuplicateStartLine {
                        file: self.base.file_path.clone(),
                        line,
                        first: previous.name.clone(),
                        second: declaration.name,
                    });
                }
            }
        }
        table.insert(line, declaration);
        Ok(())
    }
}

// BaseExtractor implementation for callgraph
//
// Language-independent helpers shared by the declaration walker: node text
// slicing, 1-based line arithmetic and record construction.

use tree_sitter::Node;

use super::types::{Declaration, DeclarationKind, ExtractOptions, LineRange};

/// Base implementation for language extractors
pub struct BaseExtractor {
    /// Root-relative, Unix-style path used in record names
    pub file_path: String,
    pub content: String,
    pub options: ExtractOptions,
}

impl BaseExtractor {
    pub fn new(file_path: String, content: String, options: ExtractOptions) -> Self {
        Self {
            file_path,
            content,
            options,
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// 1-based line a node starts on
    pub fn start_line(&self, node: &Node) -> usize {
        node.start_position().row + 1
    }

    /// 1-based line a node ends on
    ///
    /// A node whose end point is column 0 of a later row finished on the row above.
    pub fn end_line(&self, node: &Node) -> usize {
        let start = node.start_position();
        let end = node.end_position();
        if end.column == 0 && end.row > start.row {
            end.row
        } else {
            end.row + 1
        }
    }

    pub fn line_range(&self, node: &Node) -> LineRange {
        LineRange::new(self.start_line(node), self.end_line(node))
    }

    /// `<identifier> <file>:<line>`
    pub fn qualified_name(&self, identifier: &str, line: usize) -> String {
        format!("{} {}:{}", identifier, self.file_path, line)
    }

    /// Verbatim source of `node` when content capture is on, empty otherwise
    pub fn capture_content(&self, node: &Node) -> String {
        if self.options.with_content {
            self.get_node_text(node)
        } else {
            String::new()
        }
    }

    /// Create a declaration record whose content is sliced from `content_node`
    pub fn create_declaration(
        &self,
        name: String,
        kind: DeclarationKind,
        range: LineRange,
        content_node: &Node,
    ) -> Declaration {
        let mut declaration = Declaration::new(name, kind, range);
        declaration.content = self.capture_content(content_node);
        declaration
    }
}

use crate::extractors::base::{Declaration, DeclarationKind, LineRange};
use tree_sitter::Node;

/// Function and method extraction for Go
impl super::GoExtractor {
    /// Build a `FUNCTION` record for a function or method declaration
    ///
    /// The range runs from the `func` keyword to the closing brace of the body.
    /// Methods are named by the method identifier alone, without the receiver.
    pub(super) fn extract_function(&self, node: Node) -> Declaration {
        let name = node
            .child_by_field_name("name")
            .map(|name_node| self.get_node_text(name_node))
            .unwrap_or_else(|| "anonymous".to_string());

        let start = self.base.start_line(&node);
        let body = node.child_by_field_name("body");
        // Body-less declarations (assembly-backed functions) end with their signature
        let end = match body {
            Some(block) => self.base.end_line(&block),
            None => self.base.end_line(&node),
        };

        let mut declaration = self.base.create_declaration(
            self.base.qualified_name(&name, start),
            DeclarationKind::Function,
            LineRange::new(start, end),
            &node,
        );

        if let Some(block) = body {
            declaration.calls = self.collect_calls(block);
        }

        declaration
    }
}

use super::helpers::UNKNOWN_TYPE;
use crate::extractors::base::{Declaration, DeclarationKind, LineRange};
use tree_sitter::Node;

/// Extraction of top-level variable and constant specifications
impl super::GoExtractor {
    /// One `GLOBAL` record per identifier declared by a `var` or `const` declaration
    ///
    /// Handles both the single form (`var x int`) and the grouped form
    /// (`var ( ... )`). Content is the text of the whole declaration.
    pub(super) fn extract_global_symbols(&self, node: Node) -> Vec<Declaration> {
        let spec_kind = if node.kind() == "var_declaration" {
            "var_spec"
        } else {
            "const_spec"
        };

        self.collect_specs(node, spec_kind)
            .into_iter()
            .flat_map(|spec| self.extract_value_spec(node, spec))
            .collect()
    }

    fn collect_specs<'a>(&self, node: Node<'a>, spec_kind: &str) -> Vec<Node<'a>> {
        let mut specs = Vec::new();
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            if child.kind() == spec_kind {
                specs.push(child);
            } else if child.kind().ends_with("_spec_list") {
                let mut nested_cursor = child.walk();
                specs.extend(
                    child
                        .children(&mut nested_cursor)
                        .filter(|nested| nested.kind() == spec_kind),
                );
            }
        }

        specs
    }

    fn extract_value_spec(&self, declaration: Node, spec: Node) -> Vec<Declaration> {
        let type_token = spec
            .child_by_field_name("type")
            .map(|type_node| self.render_type(type_node))
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
        let spec_end = self.base.end_line(&spec);

        let mut cursor = spec.walk();
        let identifiers: Vec<Node> = spec.children_by_field_name("name", &mut cursor).collect();

        identifiers
            .into_iter()
            .map(|identifier| {
                let line = self.base.start_line(&identifier);
                let name = format!(
                    "{} {}",
                    self.base
                        .qualified_name(&self.get_node_text(identifier), line),
                    type_token
                );
                self.base.create_declaration(
                    name,
                    DeclarationKind::Global,
                    LineRange::new(line, spec_end),
                    &declaration,
                )
            })
            .collect()
    }
}

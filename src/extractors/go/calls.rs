use tree_sitter::Node;

/// Call reference collection for function bodies
impl super::GoExtractor {
    /// Bare-name calls made anywhere inside `body`, in source pre-order
    ///
    /// Selector calls (`fmt.Println`), calls through computed or parenthesized
    /// expressions and explicitly instantiated generic calls are not captured.
    pub(super) fn collect_calls(&self, body: Node) -> Vec<String> {
        let mut calls = Vec::new();
        self.walk_tree_for_calls(body, &mut calls);
        calls
    }

    fn walk_tree_for_calls(&self, node: Node, calls: &mut Vec<String>) {
        if node.kind() == "call_expression" {
            if let Some(callee) = self.bare_callee(node) {
                let line = self.base.start_line(&node);
                calls.push(self.base.qualified_name(&callee, line));
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk_tree_for_calls(child, calls);
        }
    }

    fn bare_callee(&self, call: Node) -> Option<String> {
        if call.child_by_field_name("type_arguments").is_some() {
            return None;
        }
        let function = call.child_by_field_name("function")?;
        (function.kind() == "identifier").then(|| self.get_node_text(function))
    }
}

// Tree navigation methods for BaseExtractor

use super::extractor::BaseExtractor;
use tree_sitter::Node;

impl BaseExtractor {
    /// Find nodes by type anywhere below `node`, in pre-order
    pub fn find_nodes_by_type<'a>(&self, node: &Node<'a>, node_type: &str) -> Vec<Node<'a>> {
        let mut nodes = Vec::new();
        self.find_nodes_by_type_recursive(node, node_type, &mut nodes);
        nodes
    }

    #[allow(clippy::only_used_in_recursion)] // &self used in recursive calls
    fn find_nodes_by_type_recursive<'a>(
        &self,
        node: &Node<'a>,
        node_type: &str,
        nodes: &mut Vec<Node<'a>>,
    ) {
        if node.kind() == node_type {
            nodes.push(*node);
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.find_nodes_by_type_recursive(&child, node_type, nodes);
            }
        }
    }

    /// Find first child by type
    pub fn find_child_by_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Option<Node<'a>> {
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                if child.kind() == child_type {
                    return Some(child);
                }
            }
        }
        None
    }

    /// First `ERROR` or `MISSING` node in pre-order, if the tree has one
    pub fn find_first_error<'a>(&self, node: &Node<'a>) -> Option<Node<'a>> {
        if !node.has_error() {
            return None;
        }
        if node.is_error() || node.is_missing() {
            return Some(*node);
        }
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                if let Some(found) = self.find_first_error(&child) {
                    return Some(found);
                }
            }
        }
        // has_error() was set but no child carries it; report the node itself
        Some(*node)
    }
}

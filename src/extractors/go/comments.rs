use crate::comments::normalize_comment;
use crate::extractors::base::CommentEntry;
use std::collections::HashMap;
use tracing::debug;
use tree_sitter::Node;

/// Comment collection for Go
impl super::GoExtractor {
    /// Every comment in the file keyed by its starting line, normalized
    ///
    /// Two comments starting on one line keep only the later one.
    pub(super) fn collect_comments(&self, root: Node) -> HashMap<usize, CommentEntry> {
        let mut comments = HashMap::new();

        for node in self.base.find_nodes_by_type(&root, "comment") {
            let line = self.base.start_line(&node);
            let entry = CommentEntry {
                text: normalize_comment(&self.get_node_text(node)),
                range: self.base.line_range(&node),
            };
            if comments.insert(line, entry).is_some() {
                debug!(
                    "{}:{}: multiple comments on one line, keeping the last",
                    self.base.file_path, line
                );
            }
        }

        comments
    }
}

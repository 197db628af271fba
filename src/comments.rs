//! Comment normalization and association.
//!
//! Every comment of a file is collected as a standalone entry keyed by its
//! starting line, normalized to its readable body, and then absorbed by at
//! most one declaration. Declarations are visited in ascending start-line
//! order; each absorbs every unclaimed comment whose line lies strictly before
//! its end line. A comment therefore lands on the first declaration (by start
//! line) that ends below it: leading doc comments go to the declaration they
//! precede, interior comments to the declaration that encloses them.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::extractors::base::{CommentEntry, Declaration, DeclarationKind};
use crate::utils::ordering::sort_map_by_key;

/// Leading decoration of a block-comment line (` * text`, ` ** text`)
static LEADING_STAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\*+\s?").expect("leading-star pattern is valid"));

/// Strip comment delimiters and block-comment `*` gutters, then trim
///
/// Stripping repeats until the text no longer changes, so nested markers
/// (`//// banner`, `/* // note */`) are fully removed and the result is stable
/// under a second normalization.
pub fn normalize_comment(raw: &str) -> String {
    let mut current = strip_comment_markers(raw);
    loop {
        let next = strip_comment_markers(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One stripping pass: a `//` marker, or `/* */` delimiters plus the per-line gutter
fn strip_comment_markers(raw: &str) -> String {
    let text = raw.trim();
    if let Some(line) = text.strip_prefix("//") {
        return line.trim().to_string();
    }
    if let Some(block) = text.strip_prefix("/*") {
        let block = block.strip_suffix("*/").unwrap_or(block);
        return LEADING_STAR.replace_all(block, "").trim().to_string();
    }
    text.to_string()
}

/// Result of one association pass over a file
#[derive(Debug, Default)]
pub struct Association {
    /// Declarations in ascending start-line order, comments absorbed
    pub declarations: Vec<Declaration>,
    /// Comments no declaration claimed, ascending by line
    pub unattached: Vec<(usize, CommentEntry)>,
}

/// Attach each comment to exactly one declaration, or leave it unattached
pub fn associate_comments(
    declarations: HashMap<usize, Declaration>,
    comments: HashMap<usize, CommentEntry>,
) -> Association {
    let sorted_declarations = sort_map_by_key(declarations);
    let sorted_comments = sort_map_by_key(comments);

    let mut claimed: HashSet<usize> = HashSet::with_capacity(sorted_comments.len());
    let mut absorbed = Vec::with_capacity(sorted_declarations.len());

    for (_, mut declaration) in sorted_declarations {
        let end_line = declaration.end_line();
        for (line, comment) in sorted_comments.iter().take_while(|(line, _)| *line < end_line) {
            if claimed.insert(*line) {
                declaration.comments.push(comment.text.clone());
            }
        }
        absorbed.push(declaration);
    }

    let unattached = sorted_comments
        .into_iter()
        .filter(|(line, _)| !claimed.contains(line))
        .collect();

    Association {
        declarations: absorbed,
        unattached,
    }
}

/// Represent an unclaimed comment as a standalone `COMMENT` record
pub fn comment_record(file_path: &str, line: usize, comment: CommentEntry) -> Declaration {
    let mut record = Declaration::new(
        format!("{}:{}", file_path, line),
        DeclarationKind::Comment,
        comment.range,
    );
    record.comments.push(comment.text);
    record
}

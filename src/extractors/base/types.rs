// Base Extractor Types for callgraph
//
// The declaration record is the single unit of output. Its serialized shape
// (PascalCase keys, `Range` as a pair, `Type` as an upper-case tag) is the
// callgraph.json wire format and must stay stable across releases.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of declaration a record describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeclarationKind {
    /// Function or method declaration
    Function,
    /// Top-level `var` / `const` binding
    Global,
    /// Struct type definition
    Struct,
    /// Free-floating comment (before absorption, or left unattached)
    Comment,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Function => write!(f, "FUNCTION"),
            DeclarationKind::Global => write!(f, "GLOBAL"),
            DeclarationKind::Struct => write!(f, "STRUCT"),
            DeclarationKind::Comment => write!(f, "COMMENT"),
        }
    }
}

/// Closed, 1-based line interval `[start, end]`
///
/// Serialized as a two-element array to match the callgraph.json format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    /// Build a range, swapping the bounds if they arrive reversed
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }
}

impl Serialize for LineRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.start, self.end].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LineRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [start, end] = <[usize; 2]>::deserialize(deserializer)?;
        Ok(LineRange::new(start, end))
    }
}

/// One extracted declaration (function, global, struct) or raw comment
///
/// Records are built while walking a single file and are immutable once the
/// file's pass (including comment absorption) has finished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Declaration {
    /// `<identifier> <file>:<line>`, plus a type token for globals
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: DeclarationKind,
    /// Bare-name call references, `<callee> <file>:<line>`, in source order
    #[serde(rename = "Calls", default, deserialize_with = "null_as_default")]
    pub calls: Vec<String>,
    /// Normalized comment bodies absorbed by this declaration
    #[serde(rename = "Comments", default, deserialize_with = "null_as_default")]
    pub comments: Vec<String>,
    /// Verbatim source text; empty unless content capture is enabled
    #[serde(rename = "Content", default)]
    pub content: String,
    /// Field name -> type token, only populated for structs
    #[serde(rename = "Fields", default, deserialize_with = "null_as_default")]
    pub fields: BTreeMap<String, String>,
    #[serde(rename = "Range", default)]
    pub range: LineRange,
    /// Kept for format compatibility; claim tracking lives in the association engine
    #[serde(rename = "Processed", default)]
    pub processed: bool,
}

impl Declaration {
    pub fn new(name: String, kind: DeclarationKind, range: LineRange) -> Self {
        Self {
            name,
            kind,
            calls: Vec::new(),
            comments: Vec::new(),
            content: String::new(),
            fields: BTreeMap::new(),
            range,
            processed: false,
        }
    }

    /// Line the declaration is keyed by within its file
    pub fn start_line(&self) -> usize {
        self.range.start
    }

    pub fn end_line(&self) -> usize {
        self.range.end
    }
}

/// Go's encoder writes empty slices and maps as `null`; accept both forms.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A raw comment collected from one file, before association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEntry {
    /// Normalized comment body
    pub text: String,
    pub range: LineRange,
}

/// Policy for two declarations that start on the same line of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the later declaration and log a warning
    #[default]
    Overwrite,
    /// Fail the whole file
    Reject,
}

/// Per-file extraction options
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Capture verbatim source text for each declaration
    pub with_content: bool,
    pub duplicate_policy: DuplicatePolicy,
    /// Emit comments no declaration claimed as `COMMENT` records
    pub include_unattached_comments: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Declaration {
        let mut decl = Declaration::new(
            "Hello example.go:12".to_string(),
            DeclarationKind::Struct,
            LineRange::new(12, 14),
        );
        decl.fields.insert("Greet".to_string(), "int".to_string());
        decl.comments.push("Hello Comment".to_string());
        decl
    }

    #[test]
    fn test_serialized_keys_match_wire_format() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["Name"], "Hello example.go:12");
        assert_eq!(json["Type"], "STRUCT");
        assert_eq!(json["Range"], serde_json::json!([12, 14]));
        assert_eq!(json["Fields"]["Greet"], "int");
        assert_eq!(json["Processed"], false);
        assert_eq!(json["Calls"], serde_json::json!([]));
    }

    #[test]
    fn test_round_trip_preserves_record() {
        let original = sample();
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: Declaration = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_null_collections_from_reference_sinks() {
        let raw = r#"{"Name":"Greet a.go:3","Type":"FUNCTION","Calls":null,
            "Comments":null,"Content":"","Fields":null,"Range":[3,5],"Processed":false}"#;
        let decl: Declaration = serde_json::from_str(raw).unwrap();

        assert_eq!(decl.kind, DeclarationKind::Function);
        assert!(decl.calls.is_empty());
        assert!(decl.fields.is_empty());
        assert_eq!(decl.range, LineRange::new(3, 5));
    }

    #[test]
    fn test_line_range_normalizes_reversed_bounds() {
        let range = LineRange::new(9, 4);
        assert_eq!(range.start, 4);
        assert_eq!(range.end, 9);
    }
}

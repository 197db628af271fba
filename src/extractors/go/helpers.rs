use std::fmt;
use tree_sitter::Node;

/// Token used when a type expression has no textual rendering
pub const UNKNOWN_TYPE: &str = "unknown";

/// Renderable shape of a Go type expression
///
/// Only the shapes that read well as a single token are modelled; everything
/// else (function, channel, interface, anonymous struct types) is `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `int`, `Hello`
    Named(String),
    /// `pkg.Name`
    Qualified { package: String, name: String },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T`
    Array { length: String, element: Box<TypeExpr> },
    /// `map[K]V`
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// `Name[A, B]`
    Generic {
        base: Box<TypeExpr>,
        arguments: Vec<TypeExpr>,
    },
    Unknown,
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => write!(f, "{}", name),
            TypeExpr::Qualified { package, name } => write!(f, "{}.{}", package, name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Slice(element) => write!(f, "[]{}", element),
            TypeExpr::Array { length, element } => write!(f, "[{}]{}", length, element),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Generic { base, arguments } => {
                let rendered: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                write!(f, "{}[{}]", base, rendered.join(", "))
            }
            TypeExpr::Unknown => write!(f, "{}", UNKNOWN_TYPE),
        }
    }
}

/// Helper methods for Go-specific utilities and node text extraction
impl super::GoExtractor {
    /// Get node text (helper method)
    pub(super) fn get_node_text(&self, node: Node) -> String {
        self.base.get_node_text(&node)
    }

    /// Render a type node as a display token, `unknown` when it has no token form
    pub(super) fn render_type(&self, node: Node) -> String {
        self.parse_type_expr(node).to_string()
    }

    pub(super) fn parse_type_expr(&self, node: Node) -> TypeExpr {
        match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Named(self.get_node_text(node)),
            "qualified_type" => {
                match (
                    node.child_by_field_name("package"),
                    node.child_by_field_name("name"),
                ) {
                    (Some(package), Some(name)) => TypeExpr::Qualified {
                        package: self.get_node_text(package),
                        name: self.get_node_text(name),
                    },
                    _ => TypeExpr::Unknown,
                }
            }
            "pointer_type" => self.wrap_inner(node, TypeExpr::Pointer),
            "slice_type" => match node.child_by_field_name("element") {
                Some(element) => TypeExpr::Slice(Box::new(self.parse_type_expr(element))),
                None => TypeExpr::Unknown,
            },
            "array_type" => {
                match (
                    node.child_by_field_name("length"),
                    node.child_by_field_name("element"),
                ) {
                    (Some(length), Some(element)) => TypeExpr::Array {
                        length: self.get_node_text(length),
                        element: Box::new(self.parse_type_expr(element)),
                    },
                    _ => TypeExpr::Unknown,
                }
            }
            "map_type" => {
                match (
                    node.child_by_field_name("key"),
                    node.child_by_field_name("value"),
                ) {
                    (Some(key), Some(value)) => TypeExpr::Map {
                        key: Box::new(self.parse_type_expr(key)),
                        value: Box::new(self.parse_type_expr(value)),
                    },
                    _ => TypeExpr::Unknown,
                }
            }
            "generic_type" => {
                let base = node.child_by_field_name("type");
                let arguments = node.child_by_field_name("type_arguments");
                match (base, arguments) {
                    (Some(base), Some(arguments)) => {
                        let mut cursor = arguments.walk();
                        let arguments = arguments
                            .named_children(&mut cursor)
                            .map(|argument| self.parse_type_expr(argument))
                            .collect();
                        TypeExpr::Generic {
                            base: Box::new(self.parse_type_expr(base)),
                            arguments,
                        }
                    }
                    _ => TypeExpr::Unknown,
                }
            }
            // Single-term constraint elements and `(T)` unwrap to their inner type
            "type_elem" | "parenthesized_type" => {
                if node.named_child_count() == 1 {
                    node.named_child(0)
                        .map(|inner| self.parse_type_expr(inner))
                        .unwrap_or(TypeExpr::Unknown)
                } else {
                    TypeExpr::Unknown
                }
            }
            _ => TypeExpr::Unknown,
        }
    }

    fn wrap_inner(&self, node: Node, wrap: fn(Box<TypeExpr>) -> TypeExpr) -> TypeExpr {
        match node.named_child(0) {
            Some(inner) => wrap(Box::new(self.parse_type_expr(inner))),
            None => TypeExpr::Unknown,
        }
    }
}

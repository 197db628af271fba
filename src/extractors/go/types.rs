use super::helpers::UNKNOWN_TYPE;
use crate::extractors::base::{Declaration, DeclarationKind, LineRange};
use std::collections::BTreeMap;
use tree_sitter::Node;

/// Struct type extraction for Go
impl super::GoExtractor {
    /// One `STRUCT` record per struct-shaped spec of a `type` declaration
    ///
    /// Non-struct specs (interfaces, named basic types, function types) are skipped.
    pub(super) fn extract_struct_types(&self, node: Node) -> Vec<Declaration> {
        let mut cursor = node.walk();
        let specs: Vec<Node> = node
            .children(&mut cursor)
            .filter(|child| matches!(child.kind(), "type_spec" | "type_alias"))
            .collect();

        specs
            .into_iter()
            .filter_map(|spec| self.extract_struct_spec(node, spec))
            .collect()
    }

    fn extract_struct_spec(&self, declaration: Node, spec: Node) -> Option<Declaration> {
        let struct_type = spec
            .child_by_field_name("type")
            .filter(|type_node| type_node.kind() == "struct_type")?;
        let name_node = spec.child_by_field_name("name")?;
        let field_list = self
            .base
            .find_child_by_type(&struct_type, "field_declaration_list")?;

        let start = self.base.start_line(&spec);
        let end = self.base.end_line(&field_list);

        let mut record = self.base.create_declaration(
            self.base
                .qualified_name(&self.get_node_text(name_node), start),
            DeclarationKind::Struct,
            LineRange::new(start, end),
            &declaration,
        );
        record.fields = self.extract_fields(field_list);
        Some(record)
    }

    /// Field name -> type token; embedded fields carry no name and are skipped
    fn extract_fields(&self, field_list: Node) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        let mut cursor = field_list.walk();

        for field in field_list.children(&mut cursor) {
            if field.kind() != "field_declaration" {
                continue;
            }

            let type_token = field
                .child_by_field_name("type")
                .map(|type_node| self.render_type(type_node))
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string());

            let mut name_cursor = field.walk();
            for name in field.children_by_field_name("name", &mut name_cursor) {
                fields.insert(self.get_node_text(name), type_token.clone());
            }
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use crate::extractors::base::{Declaration, DeclarationKind, ExtractOptions};
    use crate::extractors::go::GoExtractor;
    use tree_sitter::Parser;

    fn structs_of(code: &str) -> Vec<Declaration> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        GoExtractor::new("types.go".to_string(), code.to_string(), ExtractOptions::default())
            .extract_declarations(&tree)
            .unwrap()
            .into_iter()
            .filter(|r| r.kind == DeclarationKind::Struct)
            .collect()
    }

    #[test]
    fn test_field_type_tokens() {
        let code = r#"package main

type Server struct {
	Name    string
	Port    int `json:"port"`
	Peers   []*Server
	Buffer  [4]byte
	Routes  map[string]Handler
	Logger  *log.Logger
	Cache   Store[string, int]
	OnClose func()
	Events  chan int
}
"#;
        let records = structs_of(code);
        assert_eq!(records.len(), 1);

        let fields = &records[0].fields;
        assert_eq!(fields["Name"], "string");
        assert_eq!(fields["Port"], "int");
        assert_eq!(fields["Peers"], "[]*Server");
        assert_eq!(fields["Buffer"], "[4]byte");
        assert_eq!(fields["Routes"], "map[string]Handler");
        assert_eq!(fields["Logger"], "*log.Logger");
        assert_eq!(fields["Cache"], "Store[string, int]");
        assert_eq!(fields["OnClose"], "unknown");
        assert_eq!(fields["Events"], "unknown");
    }

    #[test]
    fn test_embedded_fields_are_skipped() {
        let code = "package main\n\ntype Wrapper struct {\n\tsync.Mutex\n\t*Base\n\tcount int\n}\n";
        let records = structs_of(code);

        assert_eq!(records[0].fields.len(), 1);
        assert!(records[0].fields.contains_key("count"));
    }

    #[test]
    fn test_grouped_type_declaration() {
        let code = "package main\n\ntype (\n\tA struct {\n\t\tX int\n\t}\n\tID int64\n\tB struct{ Y string }\n)\n";
        let records = structs_of(code);

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A types.go:4", "B types.go:8"]);
        assert_eq!((records[0].range.start, records[0].range.end), (4, 6));
        assert_eq!((records[1].range.start, records[1].range.end), (8, 8));
    }

    #[test]
    fn test_interfaces_are_not_structs() {
        let code = "package main\n\ntype Reader interface {\n\tRead(p []byte) (int, error)\n}\n";
        assert!(structs_of(code).is_empty());
    }
}

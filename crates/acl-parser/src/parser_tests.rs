//! Unit tests for the recursive-descent parser.
//!
//! These tests verify that the parser handles every ACL construct, keeps
//! declaration order, and reports the first syntax error with the right
//! code and location.

use std::num::NonZeroUsize;

use acl_core::{Document, Id, Scope, Segment, TypeTag, Value};

use crate::{ErrorCode, parse, parser::MAX_NESTING_DEPTH};

/// Helper function to parse a source string and assert success
fn assert_parses_successfully(source: &str) -> Document {
    match parse(source) {
        Ok(document) => document,
        Err(e) => panic!("Expected parsing to succeed, but got error: {}", e),
    }
}

/// Helper to assert failure with a given code, returning the diagnostic's line and column
fn assert_parse_fails_with(source: &str, code: ErrorCode) -> (usize, usize) {
    let err = match parse(source) {
        Ok(_) => panic!("Expected parsing to fail, but it succeeded"),
        Err(err) => err,
    };
    assert_eq!(err.diagnostics().len(), 1, "syntax errors are reported singly");
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(code), "unexpected diagnostic: {diag}");
    assert!(!diag.labels().is_empty());
    let position = diag.position().expect("syntax errors carry a position");
    (position.line, position.column)
}

fn field_value<'a>(document: &'a Document, block: acl_core::BlockId, name: &str) -> &'a Value {
    document
        .block(block)
        .field(Id::new(name))
        .map(|field| field.value())
        .unwrap_or_else(|| panic!("field `{name}` not found"))
}

#[test]
fn test_empty_document() {
    let document = assert_parses_successfully("");
    assert!(document.is_empty());

    let document = assert_parses_successfully("  // nothing here\n/* or here */");
    assert!(document.roots().is_empty());
}

#[test]
fn test_empty_block() {
    let document = assert_parses_successfully("Server {}");
    let server = document.roots()[0];
    assert_eq!(document.block(server).name(), "Server");
    assert_eq!(document.block(server).label(), None);
    assert!(document.block(server).fields().is_empty());
}

#[test]
fn test_labeled_blocks() {
    let document = assert_parses_successfully(
        r#"
        Network {
            interface "eth0" { gateway = "1.1.1.1"; }
            interface "wlan0" { gateway = "2.2.2.2"; }
        }
        "#,
    );
    let network = document.roots()[0];
    let children = document.block(network).children();
    assert_eq!(children.len(), 2);
    assert_eq!(document.block(children[0]).label(), Some("eth0"));
    assert_eq!(document.block(children[1]).label(), Some("wlan0"));
    assert_eq!(
        field_value(&document, children[1], "gateway"),
        &Value::from("2.2.2.2")
    );
    // The label is not a field.
    assert_eq!(document.block(children[0]).fields().len(), 1);
}

#[test]
fn test_top_level_labeled_block() {
    let document = assert_parses_successfully(r#"Site "berlin" { id = 7; }"#);
    assert_eq!(document.block(document.roots()[0]).label(), Some("berlin"));
}

#[test]
fn test_typed_and_inferred_fields() {
    let document = assert_parses_successfully(
        r#"
        Server {
            int port = 8080;
            string host = "localhost";
            bool tls = true;
            float ratio = 1;
            retries = -3;
            sep = ',';
        }
        "#,
    );
    let server = document.roots()[0];
    let fields = document.block(server).fields();
    let types: Vec<_> = fields.iter().map(|f| f.ty()).collect();
    assert_eq!(
        types,
        vec![
            Some(TypeTag::Int),
            Some(TypeTag::String),
            Some(TypeTag::Bool),
            Some(TypeTag::Float),
            None,
            None,
        ]
    );
    assert_eq!(field_value(&document, server, "port"), &Value::Int(8080));
    assert_eq!(field_value(&document, server, "tls"), &Value::Bool(true));
    assert_eq!(field_value(&document, server, "retries"), &Value::Int(-3));
    assert_eq!(field_value(&document, server, "sep"), &Value::Char(','));
}

#[test]
fn test_declared_type_is_not_checked() {
    let document = assert_parses_successfully(r#"A { int name = "text"; }"#);
    let a = document.roots()[0];
    assert_eq!(document.block(a).fields()[0].ty(), Some(TypeTag::Int));
    assert_eq!(field_value(&document, a, "name"), &Value::from("text"));
}

#[test]
fn test_arrays() {
    let document = assert_parses_successfully(
        r#"A { empty = {}; nums = {1, 2, 3}; nested = {{true}, {"x", 'y'}}; }"#,
    );
    let a = document.roots()[0];
    assert_eq!(field_value(&document, a, "empty"), &Value::Array(Vec::new()));
    assert_eq!(
        field_value(&document, a, "nums"),
        &Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    assert_eq!(
        field_value(&document, a, "nested").to_string(),
        "[[true], [\"x\", 'y']]"
    );
}

#[test]
fn test_duplicate_names_keep_declaration_order() {
    let document = assert_parses_successfully("A { x = 1; x = 2; B {} B {} }");
    let a = document.roots()[0];
    assert_eq!(document.block(a).fields().len(), 2);
    assert_eq!(field_value(&document, a, "x"), &Value::Int(1));
    assert_eq!(document.block(a).children().len(), 2);
}

#[test]
fn test_fields_and_blocks_interleave() {
    let document = assert_parses_successfully("A { x = 1; B { y = 2; } z = 3; }");
    let a = document.roots()[0];
    let b = document.block(a).children()[0];
    assert_eq!(document.block(b).parent(), Some(a));
    assert_eq!(document.block(a).fields().len(), 2);
    assert_eq!(field_value(&document, b, "y"), &Value::Int(2));
}

#[test]
fn test_global_reference_with_label() {
    let document =
        assert_parses_successfully(r#"A { gw = $Network.interface["wlan0"].gateway; }"#);
    let Value::Reference(reference) = field_value(&document, document.roots()[0], "gw") else {
        panic!("expected a reference");
    };
    assert_eq!(reference.scope(), Scope::Global(Id::new("Network")));
    assert_eq!(
        reference.segments(),
        &[
            Segment::Labeled {
                name: Id::new("interface"),
                label: "wlan0".to_string(),
            },
            Segment::Name(Id::new("gateway")),
        ]
    );
}

#[test]
fn test_global_reference_with_index() {
    let document = assert_parses_successfully(r#"A { mtu = $Network["eth0"].mtu; }"#);
    let Value::Reference(reference) = field_value(&document, document.roots()[0], "mtu") else {
        panic!("expected a reference");
    };
    assert_eq!(
        reference.segments(),
        &[
            Segment::Index("eth0".to_string()),
            Segment::Name(Id::new("mtu")),
        ]
    );
}

#[test]
fn test_local_and_parent_references() {
    let document = assert_parses_successfully("A { x = $.y; B { v = ^^limits.max; } }");
    let a = document.roots()[0];
    let Value::Reference(local) = field_value(&document, a, "x") else {
        panic!("expected a reference");
    };
    assert_eq!(local.scope(), Scope::Local);
    assert_eq!(local.segments(), &[Segment::Name(Id::new("y"))]);

    let b = document.block(a).children()[0];
    let Value::Reference(parent) = field_value(&document, b, "v") else {
        panic!("expected a reference");
    };
    assert_eq!(parent.scope(), Scope::Parent(NonZeroUsize::new(2).unwrap()));
    assert_eq!(parent.to_string(), "^^limits.max");
}

#[test]
fn test_reference_spans_cover_expression() {
    let source = r#"A { x = $Net.iface["eth0"].gw; }"#;
    let document = assert_parses_successfully(source);
    let Value::Reference(reference) = field_value(&document, document.roots()[0], "x") else {
        panic!("expected a reference");
    };
    assert_eq!(
        &source[reference.span().range()],
        r#"$Net.iface["eth0"].gw"#
    );
}

#[test]
fn test_references_inside_arrays() {
    let document = assert_parses_successfully("A { xs = {1, $.y, ^z}; }");
    let xs = field_value(&document, document.roots()[0], "xs");
    assert_eq!(xs.references().len(), 2);
}

#[test]
fn test_missing_semicolon() {
    let (line, column) = assert_parse_fails_with("Server {\n  port = 8080\n}", ErrorCode::E100);
    assert_eq!((line, column), (3, 1));
}

#[test]
fn test_missing_closing_brace() {
    let (line, _) = assert_parse_fails_with("Server {\n  port = 8080;\n", ErrorCode::E101);
    assert_eq!(line, 3);
}

#[test]
fn test_unquoted_label_index() {
    assert_parse_fails_with(
        "A { gw = $Network.interface[eth0].gateway; }",
        ErrorCode::E103,
    );
}

#[test]
fn test_malformed_references() {
    assert_parse_fails_with("A { x = $; }", ErrorCode::E103);
    assert_parse_fails_with("A { x = ^; }", ErrorCode::E103);
    assert_parse_fails_with("A { x = $.; }", ErrorCode::E103);
    assert_parse_fails_with("A { x = $N.a[\"l\"; }", ErrorCode::E100);
}

#[test]
fn test_unknown_character() {
    let (line, column) = assert_parse_fails_with("A { x = @; }", ErrorCode::E002);
    assert_eq!((line, column), (1, 9));
}

#[test]
fn test_integer_out_of_range() {
    assert_parse_fails_with("A { x = 9223372036854775808; }", ErrorCode::E102);
    let document = assert_parses_successfully("A { x = -9223372036854775808; }");
    assert_eq!(
        field_value(&document, document.roots()[0], "x"),
        &Value::Int(i64::MIN)
    );
}

#[test]
fn test_invalid_members() {
    // A label without a body.
    assert_parse_fails_with(r#"A { b "x" = 1; }"#, ErrorCode::E100);
    // A bare identifier.
    assert_parse_fails_with("A { b; }", ErrorCode::E100);
    // A typed field needs a name.
    assert_parse_fails_with("A { int = 1; }", ErrorCode::E100);
    // Top level holds blocks only.
    assert_parse_fails_with("x = 1;", ErrorCode::E100);
    // Trailing comma in an array.
    assert_parse_fails_with("A { xs = {1,}; }", ErrorCode::E100);
}

#[test]
fn test_error_message_names_expected_and_found() {
    let err = parse("Server { port = 8080 }").unwrap_err();
    let diag = &err.diagnostics()[0];
    assert_eq!(diag.message(), "expected `;`, found `}`");
    assert_eq!(diag.help(), Some("every field ends with `;`"));
}

#[test]
fn test_nesting_depth_limit() {
    let nested = |depth: usize| {
        format!("A {{ xs = {}{}; }}", "{".repeat(depth), "}".repeat(depth))
    };
    // The block itself takes one level.
    assert_parses_successfully(&nested(MAX_NESTING_DEPTH - 1));
    assert_parse_fails_with(&nested(MAX_NESTING_DEPTH), ErrorCode::E104);

    let blocks = format!(
        "{}{}",
        "B { ".repeat(MAX_NESTING_DEPTH + 1),
        "}".repeat(MAX_NESTING_DEPTH + 1)
    );
    let (line, column) = assert_parse_fails_with(&blocks, ErrorCode::E104);
    assert_eq!((line, column), (1, 4 * MAX_NESTING_DEPTH + 3));
}

#[test]
fn test_deep_array_input_is_reported_not_overflowed() {
    let source = format!("A {{ xs = {}; }}", "{".repeat(50_000));
    assert_parse_fails_with(&source, ErrorCode::E104);
}

//! Integration tests for import maps.

use pak_json::{AddressIndex, ImportMap, JsonError, Specifier, is_url_like};
use quickcheck_macros::quickcheck;

/// Helper to parse an import map and unwrap
fn parse(input: &str) -> ImportMap {
    ImportMap::parse(input).unwrap()
}

fn shape_error(input: &str) -> (String, String) {
    match ImportMap::parse(input) {
        Err(JsonError::Shape { path, message }) => (path, message),
        other => panic!("expected a shape error, got {other:?}"),
    }
}

fn specifier(key: &str, addresses: &[&str], array: bool) -> Specifier {
    Specifier {
        key: key.to_string(),
        addresses: addresses.iter().map(|a| (*a).to_string()).collect(),
        array,
    }
}

#[test]
fn test_imports_in_document_order() {
    let map = parse(r#"{"imports": {"z": "/z.js", "a": ["./a.js", "https://cdn/a.js"]}}"#);
    assert_eq!(
        map.imports,
        [
            specifier("z", &["/z.js"], false),
            specifier("a", &["./a.js", "https://cdn/a.js"], true),
        ]
    );
    assert!(map.scopes.is_empty());
}

#[test]
fn test_scopes() {
    let map = parse(r#"{"scopes": {"/admin/": {"ui": "/admin/ui.js"}}}"#);
    assert_eq!(map.scopes.len(), 1);
    assert_eq!(map.scopes[0].prefix, "/admin/");
    assert_eq!(map.scopes[0].imports, [specifier("ui", &["/admin/ui.js"], false)]);
}

#[test]
fn test_addresses_and_rewrite() {
    let mut map = parse(r#"{"imports": {"a": "./a.js"}, "scopes": {"/s/": {"b": ["./b.js"]}}}"#);
    let addresses: Vec<(AddressIndex, String)> = map
        .addresses()
        .map(|(index, address)| (index, address.to_string()))
        .collect();
    let scoped = AddressIndex {
        scope: Some(0),
        specifier: 0,
        address: 0,
    };
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses[0].1, "./a.js");
    assert_eq!(addresses[1], (scoped, "./b.js".to_string()));

    assert!(map.set_address(scoped, "./dist/b.js"));
    assert_eq!(map.address(scoped), Some("./dist/b.js"));
    assert!(!map.set_address(
        AddressIndex {
            scope: Some(3),
            specifier: 0,
            address: 0,
        },
        "x"
    ));
}

#[test]
fn test_write_keeps_order_shape_and_extra_members() {
    let map = parse(
        r#"{"imports": {"b": "/b.js", "a": ["/a.js"]}, "integrity": {"/a.js": "sha384-x"}}"#,
    );
    let value: serde_json::Value = serde_json::from_str(&map.to_json()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "imports": {"b": "/b.js", "a": ["/a.js"]},
            "integrity": {"/a.js": "sha384-x"},
        })
    );
    let keys: Vec<&String> = value["imports"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["b", "a"]);
}

#[test]
fn test_top_level_must_be_object() {
    assert_eq!(
        shape_error("[]"),
        ("$".to_string(), "expected an object".to_string())
    );
}

#[test]
fn test_imports_must_be_object() {
    assert_eq!(
        shape_error(r#"{"imports": 1}"#),
        ("$.imports".to_string(), "expected an object".to_string())
    );
}

#[test]
fn test_address_shape_errors_carry_path() {
    assert_eq!(
        shape_error(r#"{"imports": {"./a": 1}}"#),
        (
            r#"$.imports["./a"]"#.to_string(),
            "expected a string or an array of strings".to_string()
        )
    );
    assert_eq!(
        shape_error(r#"{"scopes": {"/s/": {"x": ["/x.js", null]}}}"#),
        (
            r#"$.scopes["/s/"].x[1]"#.to_string(),
            "expected a string".to_string()
        )
    );
}

#[test]
fn test_json_syntax_error_offset() {
    match ImportMap::parse("{\"imports\": }") {
        Err(JsonError::Syntax(err)) => {
            assert_eq!(err.offset, 12);
            assert!(err.message.starts_with("expected value"), "{}", err.message);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_json_syntax_error_on_later_line() {
    match ImportMap::parse("{\n  \"a\": tru\n}") {
        Err(JsonError::Syntax(err)) => {
            assert!(err.offset >= 9 && err.offset <= 13, "{}", err.offset);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_url_like_addresses() {
    assert!(is_url_like("/a.js"));
    assert!(is_url_like("./a.js"));
    assert!(is_url_like("../a.js"));
    assert!(is_url_like("https://cdn.example/a.js"));
    assert!(!is_url_like("lodash"));
    assert!(!is_url_like("lodash/fp"));
}

#[quickcheck]
fn prop_rooted_addresses_are_url_like(path: String) -> bool {
    is_url_like(&format!("/{path}")) && is_url_like(&format!("./{path}"))
}

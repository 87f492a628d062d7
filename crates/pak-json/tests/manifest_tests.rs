//! Integration tests for web app manifests.

use pak_json::{ImageSource, JsonError, WebManifest};

/// Helper to parse a manifest and unwrap
fn parse(input: &str) -> WebManifest {
    WebManifest::parse(input).unwrap()
}

fn source(pointer: &str, src: &str) -> ImageSource {
    ImageSource {
        pointer: pointer.to_string(),
        src: src.to_string(),
    }
}

const MANIFEST: &str = r#"{
  "name": "Example",
  "icons": [{"src": "icon-192.png", "sizes": "192x192"}, {"sizes": "any"}],
  "screenshots": [{"src": "/shots/home.png"}],
  "shortcuts": [
    {"name": "Today", "url": "/today", "icons": [{"src": "today.png"}]},
    {"name": "Later", "url": "/later"}
  ]
}"#;

#[test]
fn test_image_sources() {
    assert_eq!(
        parse(MANIFEST).image_sources(),
        [
            source("/icons/0/src", "icon-192.png"),
            source("/screenshots/0/src", "/shots/home.png"),
            source("/shortcuts/0/icons/0/src", "today.png"),
        ]
    );
}

#[test]
fn test_rewrite_by_pointer() {
    let mut manifest = parse(MANIFEST);
    assert!(manifest.set("/shortcuts/0/icons/0/src", "img/today.png"));
    assert_eq!(manifest.get("/shortcuts/0/icons/0/src"), Some("img/today.png"));

    assert!(!manifest.set("/icons/1/src", "missing.png"));
    assert!(!manifest.set("/icons", "not a string"));
}

#[test]
fn test_write_keeps_unknown_members() {
    let manifest = parse(MANIFEST);
    let written = parse(&manifest.to_json());
    assert_eq!(written, manifest);
    assert_eq!(written.value["name"], "Example");
}

#[test]
fn test_manifest_must_be_object() {
    match WebManifest::parse("\"name\"") {
        Err(JsonError::Shape { path, message }) => {
            assert_eq!(path, "$");
            assert_eq!(message, "expected an object");
        }
        other => panic!("expected a shape error, got {other:?}"),
    }
}

#[test]
fn test_manifest_syntax_error() {
    assert!(matches!(
        WebManifest::parse("{,}"),
        Err(JsonError::Syntax(err)) if err.offset == 1
    ));
}

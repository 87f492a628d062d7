//! Integration tests for the HTML tree builder and serializer.

use pak_common::SyntaxError;
use pak_dom::query::has_name;
use pak_dom::{DomTree, NodeId};
use quickcheck_macros::quickcheck;

/// Helper to parse a document and unwrap
fn parse(input: &str) -> DomTree {
    pak_html::parse(input).unwrap()
}

fn error(input: &str) -> SyntaxError {
    pak_html::parse(input).unwrap_err()
}

fn tag_names(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&child| match tree.as_element(child) {
            Some(element) => element.tag_name.clone(),
            None => "#text".to_string(),
        })
        .collect()
}

fn html_children(tree: &DomTree) -> Vec<String> {
    tag_names(tree, tree.document_element().unwrap())
}

fn assert_round_trip(input: &str) {
    assert_eq!(pak_html::serialize(&parse(input)), input);
}

#[test]
fn test_doctype_only_document() {
    let tree = parse("<!doctype html>");
    assert_eq!(html_children(&tree), ["head", "body"]);
    assert!(tree.children(tree.head().unwrap()).is_empty());
    assert!(tree.children(tree.body().unwrap()).is_empty());
}

#[test]
fn test_title_text() {
    let tree = parse("<!doctype html><html><head><title>Foo</title></head></html>");
    assert_eq!(html_children(&tree), ["head", "body"]);

    let title = tree.find(NodeId::ROOT, has_name("title")).next().unwrap();
    let children = tree.children(title);
    assert_eq!(children.len(), 1);
    assert_eq!(tree.as_text(children[0]), Some("Foo"));
}

#[test]
fn test_missing_doctype() {
    let err = error("<p>");
    assert_eq!(err.offset, 0);
    assert_eq!(err.message, "expected <!doctype html>");

    assert_eq!(error("").message, "expected <!doctype html>");
}

#[test]
fn test_head_and_body_are_implied() {
    let tree = parse(
        "<!doctype html><link rel=stylesheet href=a.css><script src=a.js></script><p>hi</p>",
    );
    let head = tree.head().unwrap();
    let body = tree.body().unwrap();
    assert_eq!(tag_names(&tree, head), ["link", "script"]);
    assert_eq!(tag_names(&tree, body), ["p"]);

    let link = tree.children(head)[0];
    assert_eq!(
        tree.as_element(link).unwrap().attribute("href"),
        Some("a.css")
    );
    assert_eq!(tree.text(body), "hi");
}

#[test]
fn test_body_elements() {
    let tree = parse("<!doctype html><body><div><img src=x><br/><span>a</span></div>b</body>");
    let body = tree.body().unwrap();
    assert_eq!(tag_names(&tree, body), ["div", "#text"]);

    let div = tree.children(body)[0];
    assert_eq!(tag_names(&tree, div), ["img", "br", "span"]);
    assert_eq!(tree.text(body), "ab");
}

#[test]
fn test_end_tag_closes_nearest_open_element() {
    let tree = parse("<!doctype html><div><p>a</div>b");
    let body = tree.body().unwrap();
    assert_eq!(tag_names(&tree, body), ["div", "#text"]);
    let div = tree.children(body)[0];
    assert_eq!(tag_names(&tree, div), ["p"]);
}

#[test]
fn test_unmatched_end_tag() {
    let err = error("<!doctype html><div></span>");
    assert_eq!(err.offset, 20);
    assert_eq!(err.message, "unexpected end tag");
}

#[test]
fn test_content_after_html() {
    let err = error("<!doctype html><body></body></html>x");
    assert_eq!(err.offset, 35);
    assert_eq!(err.message, "unexpected token");
}

#[test]
fn test_nested_html_start_tag() {
    let err = error("<!doctype html><p><html>");
    assert_eq!(err.offset, 18);
    assert_eq!(err.message, "unexpected start tag");
}

#[test]
fn test_unterminated_script() {
    let err = error("<!doctype html><script>var a");
    assert_eq!(err.offset, 27);
    assert_eq!(err.message, "unexpected end of file");
}

#[test]
fn test_whitespace_keeps_skeleton() {
    let tree = parse(
        "\n<!doctype html>\n<html>\n<head>\n</head>\n<body>\n</body>\n</html>\n",
    );
    assert_eq!(html_children(&tree), ["head", "body"]);
}

#[test]
fn test_html_attributes() {
    let tree = parse("<!doctype html><html lang=en>");
    let html = tree.document_element().unwrap();
    assert_eq!(tree.as_element(html).unwrap().attribute("lang"), Some("en"));
}

#[test]
fn test_style_text_is_raw() {
    let tree = parse("<!doctype html><style>a>b{}</style>");
    let head = tree.head().unwrap();
    assert_eq!(tag_names(&tree, head), ["style"]);
    assert_eq!(tree.text(head), "a>b{}");
}

#[test]
fn test_late_head_element_goes_to_head() {
    let tree = parse("<!doctype html><head></head><link href=a.css><p>x</p>");
    assert_eq!(tag_names(&tree, tree.head().unwrap()), ["link"]);
    assert_eq!(tag_names(&tree, tree.body().unwrap()), ["p"]);
}

#[test]
fn test_serialize_round_trip() {
    assert_round_trip(concat!(
        r#"<!doctype html><html lang="en"><head><title>T</title>"#,
        r#"<link href="a.css" rel="stylesheet"></head>"#,
        r#"<body><p class='x"y'>a &amp; b</p><br><script>if (a<b) {}</script>"#,
        "</body></html>",
    ));
}

#[test]
fn test_serialize_implied_elements() {
    assert_eq!(
        pak_html::serialize(&parse("<!doctype html>")),
        "<!doctype html><html><head></head><body></body></html>"
    );
}

#[test]
fn test_serialize_empty_attribute() {
    assert_eq!(
        pak_html::serialize(&parse("<!doctype html><input disabled>")),
        "<!doctype html><html><head></head><body><input disabled></body></html>"
    );
}

#[quickcheck]
fn prop_document_element_has_head_and_body(body: String) -> bool {
    match pak_html::parse(&format!("<!doctype html>{body}")) {
        Ok(tree) => html_children(&tree) == ["head", "body"],
        Err(_) => true,
    }
}

//! Tests for tree building, text collection, walking and queries.

use pak_dom::query::{attribute_equals, has_attribute, has_name};
use pak_dom::{Attribute, DomTree, ElementData, NodeId, NodeType, Query};

/// Helper to append an element with attributes and return its NodeId.
fn element(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute::new(*name, *value))
        .collect();
    tree.append_element(parent, ElementData::with_attributes(tag, attrs))
}

/// html > (head > link, script) + (body > div > (img, "hi"))
fn sample() -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let html = element(&mut tree, NodeId::ROOT, "html", &[]);
    let head = element(&mut tree, html, "head", &[]);
    let body = element(&mut tree, html, "body", &[]);
    let _ = element(&mut tree, head, "link", &[("rel", "stylesheet"), ("href", "a.css")]);
    let _ = element(&mut tree, head, "script", &[("src", "a.js"), ("type", "module")]);
    let div = element(&mut tree, body, "div", &[]);
    let _ = element(&mut tree, div, "img", &[("src", "a.png")]);
    tree.append_text(div, "h");
    tree.append_text(div, "i");
    (tree, html)
}

fn names(tree: &DomTree, ids: impl Iterator<Item = NodeId>) -> Vec<String> {
    ids.map(|id| tree.as_element(id).unwrap().tag_name.clone())
        .collect()
}

#[test]
fn test_document_element_head_body() {
    let (tree, html) = sample();
    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.as_element(tree.head().unwrap()).unwrap().tag_name, "head");
    assert_eq!(tree.as_element(tree.body().unwrap()).unwrap().tag_name, "body");
}

#[test]
fn test_walk_is_breadth_first() {
    let (tree, html) = sample();
    assert_eq!(
        names(&tree, tree.walk(html)),
        ["head", "body", "link", "script", "div", "img"]
    );
}

#[test]
fn test_walk_is_restartable() {
    let (tree, html) = sample();
    let mut walk = tree.walk(html);
    let _ = walk.next();
    let restart = walk.clone();
    assert_eq!(names(&tree, walk), names(&tree, restart));
    assert_eq!(tree.walk(html).count(), 6);
}

#[test]
fn test_text_merges_adjacent_runs() {
    let (tree, html) = sample();
    let div = tree.find(html, has_name("div")).next().unwrap();
    assert_eq!(tree.children(div).len(), 2);
    assert_eq!(tree.text(div), "hi");
    assert_eq!(tree.text(html), "hi");
}

#[test]
fn test_find_with_combinators() {
    let (tree, html) = sample();
    let sources = tree.find(html, has_attribute("src"));
    assert_eq!(names(&tree, sources), ["script", "img"]);

    let module = has_name("script").and(attribute_equals("type", "module"));
    assert_eq!(tree.find(html, module).count(), 1);

    let either = has_name("link").or(has_name("img"));
    assert_eq!(names(&tree, tree.find(html, either)), ["link", "img"]);

    let closure = |e: &ElementData| e.tag_name.len() == 3;
    assert_eq!(names(&tree, tree.find(html, closure)), ["div", "img"]);
}

#[test]
fn test_attribute_first_match_and_set() {
    let mut data = ElementData::with_attributes(
        "a",
        vec![Attribute::new("href", "one"), Attribute::new("href", "two")],
    );
    assert_eq!(data.attribute("href"), Some("one"));
    data.set_attribute("href", "three");
    assert_eq!(data.attribute("href"), Some("three"));
    data.set_attribute("title", "x");
    assert_eq!(data.attrs.len(), 3);
}

#[test]
fn test_void_elements() {
    assert!(ElementData::new("img").is_void());
    assert!(ElementData::new("param").is_void());
    assert!(!ElementData::new("script").is_void());
}

#[test]
fn test_as_text() {
    let mut tree = DomTree::new();
    let text = tree.alloc(NodeType::Text("x".to_string()));
    assert_eq!(tree.as_text(text), Some("x"));
    assert!(tree.as_element(text).is_none());
}

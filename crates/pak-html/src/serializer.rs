//! [§ 13.3 Serialising HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Character references are never decoded by the tokenizer, so text and
//! attribute values are written back as they were read. Raw text elements
//! need no special casing for the same reason.

use pak_dom::{DomTree, ElementData, NodeId, NodeType};

/// Serialize a document, starting with `<!doctype html>`.
#[must_use]
pub fn serialize(tree: &DomTree) -> String {
    let mut out = String::from("<!doctype html>");
    for &child in tree.children(tree.root()) {
        write_node(tree, child, &mut out);
    }
    out
}

/// Serialize a single node and its descendants.
#[must_use]
pub fn serialize_node(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document => {
            for &child in &node.children {
                write_node(tree, child, out);
            }
        }
        NodeType::Text(data) => out.push_str(data),
        NodeType::Element(element) => write_element(tree, id, element, out),
    }
}

/// "If current node is an element ... Append a U+003C LESS-THAN SIGN character
/// (<), followed by tagname."
fn write_element(tree: &DomTree, id: NodeId, element: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag_name);
    for attribute in &element.attrs {
        out.push(' ');
        out.push_str(&attribute.name);
        if !attribute.value.is_empty() {
            out.push('=');
            write_attribute_value(&attribute.value, out);
        }
    }
    out.push('>');

    // "If current node is an area, base, basefont, bgsound, br, col, embed,
    // frame, hr, img, input, keygen, link, meta, param, source, track or wbr
    // element, then continue on to the next child node at this point."
    if element.is_void() {
        return;
    }

    for &child in tree.children(id) {
        write_node(tree, child, out);
    }

    out.push_str("</");
    out.push_str(&element.tag_name);
    out.push('>');
}

/// Quote with `"` unless the value contains one, then with `'`. A value
/// holding both marks is written double-quoted with `&quot;`.
fn write_attribute_value(value: &str, out: &mut String) {
    if !value.contains('"') {
        out.push('"');
        out.push_str(value);
        out.push('"');
    } else if !value.contains('\'') {
        out.push('\'');
        out.push_str(value);
        out.push('\'');
    } else {
        out.push('"');
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
}

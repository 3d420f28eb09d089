//! Write a [`Document`] back out as HTML.

use minicart_core::system::{Document, NodeId};

use crate::parse::{RAW_TEXT_ELEMENTS, VOID_ELEMENTS};

/// Serialize the whole document.
pub fn to_html(doc: &Document) -> String {
    let mut out = String::new();
    for &child in doc.children(doc.root()) {
        write_node(doc, child, false, &mut out);
    }
    out
}

/// Serialize one node and its subtree.
pub fn node_to_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, false, &mut out);
    out
}

fn write_node(doc: &Document, node: NodeId, raw: bool, out: &mut String) {
    if let Some(text) = doc.text(node) {
        if raw {
            out.push_str(text);
        } else {
            out.push_str(&html_escape::encode_text(text));
        }
        return;
    }
    let Some(tag) = doc.tag(node) else {
        return;
    };

    out.push('<');
    out.push_str(tag);
    for (name, value) in doc.attributes(node) {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
            out.push('"');
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return;
    }
    let raw_children = RAW_TEXT_ELEMENTS.contains(&tag);
    for &child in doc.children(node) {
        write_node(doc, child, raw_children, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

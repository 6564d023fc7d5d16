/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use lb_core::{Document, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize `node` and its subtree. For the document node this is the
/// serialization of its children.
pub fn to_html(document: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(document, node, &mut out);
    out
}

/// Serialize the children of `node` only.
pub fn inner_html(document: &Document, node: NodeId) -> String {
    let mut out = String::new();
    for &child in document.children(node) {
        write_node(document, child, &mut out);
    }
    out
}

fn write_node(document: &Document, node: NodeId, out: &mut String) {
    match document.kind(node) {
        NodeKind::Document => {
            for &child in document.children(node) {
                write_node(document, child, out);
            }
        }
        NodeKind::Text(text) => out.push_str(&escape_text(text)),
        NodeKind::Element { name, attributes } => {
            out.push('<');
            out.push_str(name);
            for attribute in attributes {
                out.push(' ');
                out.push_str(&attribute.name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(&attribute.value));
                out.push('"');
            }

            let children = document.children(node);
            if children.is_empty() && VOID_ELEMENTS.contains(&name.as_str()) {
                out.push_str("/>");
                return;
            }
            out.push('>');
            for &child in children {
                write_node(document, child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

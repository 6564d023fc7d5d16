/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use lb_core::{Document, NodeId};
use roxmltree::{Node, ParsingOptions};
use std::path::Path;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

use crate::MarkupError;

/// Parse an XHTML string into a new document.
pub fn parse(markup: &str) -> Result<Document, MarkupError> {
    let mut document = Document::new();
    let root = document.root();
    parse_into(&mut document, root, markup)?;
    Ok(document)
}

pub fn parse_file(path: &Path) -> Result<Document, MarkupError> {
    let markup = std::fs::read_to_string(path)?;
    parse(&markup)
}

/// Parse `markup` and append its root element under `parent`.
/// Returns the new element.
pub fn parse_into(
    document: &mut Document,
    parent: NodeId,
    markup: &str,
) -> Result<NodeId, MarkupError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let xml = roxmltree::Document::parse_with_options(markup, options)?;
    let element = build(document, xml.root_element());
    document.append_child(parent, element);
    Ok(element)
}

fn build(document: &mut Document, node: Node) -> NodeId {
    let tag = node.tag_name();
    let name = qualified_element_name(node, tag.namespace(), tag.name());
    let element = document.create_element(&name);

    // Declarations made on this element, not inherited ones.
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for namespace in node.namespaces() {
        let declared = (namespace.name(), namespace.uri());
        if declared.0 == Some("xml") || inherited.contains(&declared) {
            continue;
        }
        let name = match namespace.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        document.set_attribute(element, &name, namespace.uri());
    }

    for attr in node.attributes() {
        let name = qualified_attribute_name(node, attr.namespace(), attr.name());
        document.set_attribute(element, &name, attr.value());
    }

    for child in node.children() {
        if child.is_element() {
            let built = build(document, child);
            document.append_child(element, built);
        } else if child.is_text() {
            let text = document.create_text(child.text().unwrap_or_default());
            document.append_child(element, text);
        }
    }
    element
}

/// Element names in the default namespace stay bare, others get the prefix
/// bound to their namespace.
fn qualified_element_name(node: Node, namespace: Option<&str>, local: &str) -> String {
    let Some(uri) = namespace else {
        return local.to_string();
    };
    let is_default = node
        .namespaces()
        .any(|ns| ns.name().is_none() && ns.uri() == uri);
    match node.lookup_prefix(uri) {
        Some(prefix) if !is_default => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

/// Unprefixed attributes have no namespace, so any namespace means a prefix.
fn qualified_attribute_name(node: Node, namespace: Option<&str>, local: &str) -> String {
    let prefix = match namespace {
        None => None,
        Some(XML_NAMESPACE) => Some("xml"),
        Some(uri) => node.lookup_prefix(uri),
    };
    match prefix {
        Some(prefix) => format!("{prefix}:{local}"),
        None => local.to_string(),
    }
}

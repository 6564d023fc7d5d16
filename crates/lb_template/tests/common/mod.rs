/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use lb_core::{Document, NodeId};

/// Parse a fixture. Fixtures carry no whitespace between tags.
pub fn parse(markup: &str) -> Document {
    lb_markup::parse(markup).expect("fixture should be well-formed")
}

/// Serialize the whole document.
pub fn html(document: &Document) -> String {
    lb_markup::to_html(document, document.root())
}

/// The attached element with the given id.
pub fn by_id(document: &Document, id: &str) -> NodeId {
    document
        .element_by_id(id)
        .unwrap_or_else(|| panic!("no element with id {id}"))
}

/// The root element of the document.
pub fn body(document: &Document) -> NodeId {
    document
        .document_element()
        .expect("fixture should have a root element")
}

/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Reading templates into a [`Document`] and writing documents back as HTML.
//!
//! Templates are read as well-formed XHTML. Comments, processing instructions
//! and the doctype are dropped; elements, attributes and text are kept in
//! document order. Prefixed names such as `xml:lang` keep their prefix, and
//! namespace declarations are kept as `xmlns` attributes on the element that
//! declares them.

pub mod parser;
pub mod writer;

pub use parser::{parse, parse_file, parse_into};
pub use writer::{inner_html, to_html};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("malformed markup: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub use lb_core::Document;

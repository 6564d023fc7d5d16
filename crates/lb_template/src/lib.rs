/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! lb template engine
//!
//! Binds JSON data to HTML templates held in a [`Document`], in place.
//!
//! Three class markers drive the structure of a template:
//!
//! - `template`: a prototype subtree. [`Templates::add_clone`] copies it,
//!   binds the copy and inserts it after the prototype (or after the previous
//!   copy); [`Templates::remove_clones`] removes those copies again.
//! - `list`: the children of the element are repeated once per item of the
//!   array found in the data under the element's *full* class string.
//! - `optional`: the element is shown once its data is there, removed when
//!   its data is `null`, and left hidden while data is still missing.
//!
//! Parameters are written `#name#` in text and attribute values. The
//! [`i18n`] module resolves `#dotted.name#` parameters from the data first and
//! from [`LanguageProperties`](lb_core::LanguageProperties) next.
//!
//! # Example
//!
//! ```rust
//! use lb_template::Templates;
//! use serde_json::json;
//!
//! let mut doc = lb_markup::parse(
//!     r##"<body><div id="b" class="template"><h2>Title: #title#</h2></div></body>"##,
//! ).unwrap();
//! let root = doc.element_by_id("b").unwrap();
//!
//! let mut templates = Templates::default();
//! let clone = templates.add_clone(&mut doc, root, &json!({ "title": "Holidays" }));
//! assert!(clone.is_some());
//! assert_eq!(
//!     lb_markup::inner_html(&doc, doc.document_element().unwrap()),
//!     concat!(
//!         r##"<div id="b" class="template"><h2>Title: #title#</h2></div>"##,
//!         r#"<div class=""><h2>Title: Holidays</h2></div>"#,
//!     )
//! );
//! ```

pub mod clone;
pub mod engine;
pub mod error;
pub mod i18n;
pub mod status;
pub mod substitution;

pub use clone::CloneTracker;
pub use engine::{IdMap, TemplateEngine};
pub use error::TemplateError;
pub use i18n::{apply_filters, Filter, I18n, LanguageFilter, LanguageSetter, ParamFilter, Target};
pub use status::Status;
pub use substitution::{replace_params, Resolution};

use lb_core::{Data, Document, EngineConfig, NodeId};

/// Template engine and clone bookkeeping bundled together.
#[derive(Debug, Default)]
pub struct Templates {
    engine: TemplateEngine,
    clones: CloneTracker,
}

impl Templates {
    pub fn new(config: EngineConfig) -> Self {
        let clones = CloneTracker::new(&config.markers);
        Self {
            engine: TemplateEngine::new(config),
            clones,
        }
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// Bind `data` to `node` and its subtree in place. Template prototypes
    /// inside the subtree are left alone.
    pub fn process(&self, document: &mut Document, node: NodeId, data: &Data) -> Status {
        self.engine.process(document, node, data)
    }

    /// Clone the template `root`, bind the clone to `data` and insert it after
    /// the previous clone of `root`, or after `root` itself.
    ///
    /// Returns `None` when the clone was entirely optional and got removed.
    pub fn add_clone(
        &mut self,
        document: &mut Document,
        root: NodeId,
        data: &Data,
    ) -> Option<NodeId> {
        let engine = &self.engine;
        self.clones.add_clone(document, root, |document, clone| {
            engine.process_clone(document, clone, data, None)
        })
    }

    /// Like [`Templates::add_clone`], recording the ids stripped from the
    /// clone's elements into `ids`. Nothing is recorded for a dropped clone.
    pub fn add_clone_with_ids(
        &mut self,
        document: &mut Document,
        root: NodeId,
        data: &Data,
        ids: &mut IdMap,
    ) -> Option<NodeId> {
        let engine = &self.engine;
        let mut stripped = IdMap::new();
        let clone = self.clones.add_clone(document, root, |document, clone| {
            engine.process_clone(document, clone, data, Some(&mut stripped))
        })?;
        ids.extend(stripped);
        Some(clone)
    }

    /// Remove every clone inserted for `root` since the last removal.
    pub fn remove_clones(&mut self, document: &mut Document, root: NodeId) {
        self.clones.remove_clones(document, root);
    }
}

/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The template engine.
//!
//! A single depth-first pass over a subtree substitutes parameters, expands
//! list sections, decides the fate of optional sections and strips ids. Each
//! node reports a [`Status`]; an element's status is the maximum over its
//! attributes and children, which is what optional sections act upon:
//!
//! | status of an optional element          | outcome                          |
//! |----------------------------------------|----------------------------------|
//! | `Failed`, `OptionalNixed`              | removed, reports `OptionalNixed` |
//! | `NoChange`, `Success`, `OptionalKept`  | marker stripped, `OptionalKept`  |
//! | `Missing`                              | left hidden, reports `Missing`   |
//!
//! Since a removed optional reports `OptionalNixed`, an optional container
//! whose optional content was removed is removed in turn.
//!
//! Scanning the attributes, or the children, of an element stops at the first
//! `Failed`; what follows is left as it is, ids included.
//!
//! Template prototypes are never bound: an element carrying the template
//! marker is skipped, unless it is the fresh clone being bound by
//! [`TemplateEngine::process_clone`]. Removed optional sections and the
//! original children of an expanded list are freed with
//! [`Document::remove`].

use lb_core::data;
use lb_core::{Data, Document, EngineConfig, NodeId, NodeKind};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::status::Status;
use crate::substitution::{replace_params, Resolution, PARAM_PATTERN};

/// Ids stripped from bound elements, mapped to the element that carried them.
pub type IdMap = HashMap<String, NodeId>;

#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    config: EngineConfig,
}

impl TemplateEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bind `data` to `node` and its subtree, in place.
    pub fn process(&self, document: &mut Document, node: NodeId, data: &Data) -> Status {
        Binding {
            engine: self,
            ids: None,
            clone: None,
        }
        .node(document, node, data, Status::NoChange)
    }

    /// Like [`TemplateEngine::process`], recording stripped ids into `ids`.
    pub fn process_with_ids(
        &self,
        document: &mut Document,
        node: NodeId,
        data: &Data,
        ids: &mut IdMap,
    ) -> Status {
        Binding {
            engine: self,
            ids: Some(ids),
            clone: None,
        }
        .node(document, node, data, Status::NoChange)
    }

    /// Bind a fresh clone of a template prototype. The clone still carries
    /// the template marker, which would otherwise make the pass skip it.
    pub fn process_clone(
        &self,
        document: &mut Document,
        clone: NodeId,
        data: &Data,
        ids: Option<&mut IdMap>,
    ) -> Status {
        Binding {
            engine: self,
            ids,
            clone: Some(clone),
        }
        .node(document, clone, data, Status::NoChange)
    }
}

/// One pass of the engine over a subtree.
struct Binding<'e, 'i> {
    engine: &'e TemplateEngine,
    ids: Option<&'i mut IdMap>,
    clone: Option<NodeId>,
}

impl Binding<'_, '_> {
    fn node(
        &mut self,
        document: &mut Document,
        node: NodeId,
        data: &Data,
        parent: Status,
    ) -> Status {
        match document.kind(node) {
            NodeKind::Text(text) => {
                let (value, status) = substitute(text, data);
                if status != Status::NoChange {
                    document.set_text(node, &value);
                }
                parent.max(status)
            }
            NodeKind::Document => {
                let status = self.children(document, node, data, Status::NoChange);
                parent.max(status)
            }
            NodeKind::Element { .. } => self.element(document, node, data, parent),
        }
    }

    fn element(
        &mut self,
        document: &mut Document,
        node: NodeId,
        data: &Data,
        parent: Status,
    ) -> Status {
        let engine = self.engine;
        let markers = &engine.config.markers;

        if self.clone != Some(node) && document.has_class(node, &markers.template) {
            return parent;
        }

        let mut status = Status::NoChange;
        for name in document.attribute_names(node) {
            if status.is_failed() {
                break;
            }
            status = status.max(attribute(document, node, &name, data));
        }

        if document.has_class(node, &markers.list) {
            status = self.list(document, node, data, status);
        } else {
            status = self.children(document, node, data, status);
        }

        if document.has_class(node, &markers.optional) {
            match status {
                Status::Failed | Status::OptionalNixed => {
                    tracing::debug!(node = node.index(), ?status, "removing optional section");
                    self.forget_ids(document, node);
                    document.remove(node);
                    return parent.max(Status::OptionalNixed);
                }
                Status::NoChange | Status::Success | Status::OptionalKept => {
                    document.remove_class(node, &markers.optional);
                    status = Status::OptionalKept;
                }
                Status::Missing => {}
            }
        }

        self.anonymize(document, node);
        parent.max(status)
    }

    fn children(
        &mut self,
        document: &mut Document,
        node: NodeId,
        data: &Data,
        mut status: Status,
    ) -> Status {
        let children = document.children(node).to_vec();
        for child in children {
            if status.is_failed() {
                break;
            }
            status = self.node(document, child, data, status);
        }
        status
    }

    /// Repeat the children of `node` once per item of its data array. The
    /// array is found under the full class string of `node`.
    fn list(
        &mut self,
        document: &mut Document,
        node: NodeId,
        data: &Data,
        status: Status,
    ) -> Status {
        let key = document.class_name(node).unwrap_or_default().to_string();
        let items = match data::lookup(data, &key) {
            None => {
                tracing::debug!(key = %key, "list data not available yet");
                return status.max(Status::Missing);
            }
            Some(Value::Null) => return status.max(Status::Failed),
            Some(Value::Array(items)) => items,
            Some(other) => {
                tracing::debug!(key = %key, value = %other, "list data is not an array");
                return status.max(Status::Missing);
            }
        };

        let originals = document.children(node).to_vec();
        for &original in &originals {
            document.detach(original);
        }

        let mut status = status;
        for item in items {
            for &original in &originals {
                let clone = document.deep_clone(original);
                document.append_child(node, clone);
                status = self.node(document, clone, item, status);
            }
        }
        for original in originals {
            document.remove(original);
        }
        tracing::debug!(key = %key, items = items.len(), "expanded list");
        status
    }

    /// Drop recorded ids that point into a subtree about to be freed.
    fn forget_ids(&mut self, document: &Document, node: NodeId) {
        let Some(ids) = self.ids.as_deref_mut() else {
            return;
        };
        let removed: HashSet<NodeId> = document.descendants(node).collect();
        ids.retain(|_, id| !removed.contains(id));
    }

    fn anonymize(&mut self, document: &mut Document, node: NodeId) {
        let engine = self.engine;
        let Some(id) = document.remove_attribute(node, &engine.config.id_attribute) else {
            return;
        };
        if let Some(ids) = self.ids.as_deref_mut() {
            ids.insert(id, node);
        }
    }
}

fn substitute(value: &str, data: &Data) -> (String, Status) {
    replace_params(value, &PARAM_PATTERN, |name| {
        Resolution::from_value(data::lookup(data, name))
    })
}

fn attribute(document: &mut Document, node: NodeId, name: &str, data: &Data) -> Status {
    let Some(value) = document.attribute(node, name) else {
        return Status::NoChange;
    };
    let (value, status) = substitute(value, data);
    if status != Status::NoChange {
        document.set_attribute(node, name, &value);
    }
    status
}

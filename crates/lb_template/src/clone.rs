/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Insertion and removal of template clones.
//!
//! Clones of a template root are inserted as a contiguous run of siblings
//! right after the root. Only the last clone is remembered, which is enough
//! to remove the whole run later.

use lb_core::{Document, Markers, NodeId};
use std::collections::HashMap;

use crate::status::Status;

#[derive(Debug, Clone)]
pub struct CloneTracker {
    template_marker: String,
    last_clones: HashMap<NodeId, NodeId>,
}

impl Default for CloneTracker {
    fn default() -> Self {
        Self::new(&Markers::default())
    }
}

impl CloneTracker {
    pub fn new(markers: &Markers) -> Self {
        Self {
            template_marker: markers.template.clone(),
            last_clones: HashMap::new(),
        }
    }

    /// The clone of `root` inserted last, if any.
    pub fn last_clone(&self, root: NodeId) -> Option<NodeId> {
        self.last_clones.get(&root).copied()
    }

    /// Deep-clone `root`, run `bind` on the detached clone and insert it.
    ///
    /// A clone that `bind` reports as [`Status::OptionalNixed`] is freed
    /// and `None` returned. Otherwise the template marker is removed from the
    /// clone, which goes right after the previous clone of `root` (or after
    /// `root` for the first one).
    pub fn add_clone<F>(&mut self, document: &mut Document, root: NodeId, bind: F) -> Option<NodeId>
    where
        F: FnOnce(&mut Document, NodeId) -> Status,
    {
        let clone = document.deep_clone(root);
        if bind(document, clone) == Status::OptionalNixed {
            tracing::debug!(root = root.index(), "clone removed as optional");
            document.remove(clone);
            return None;
        }
        document.remove_class(clone, &self.template_marker);

        // A previous clone removed by other means no longer marks the run.
        let after = self
            .last_clone(root)
            .filter(|&last| document.parent(last).is_some())
            .unwrap_or(root);
        if !document.insert_after(after, clone) {
            tracing::warn!(root = root.index(), "template root is detached, clone not inserted");
            document.remove(clone);
            return None;
        }
        self.last_clones.insert(root, clone);
        Some(clone)
    }

    /// Remove and free the clones of `root`: every following sibling up to
    /// and including the last clone, or to the end when that clone is no
    /// longer among them. Does nothing when no clone was recorded.
    pub fn remove_clones(&mut self, document: &mut Document, root: NodeId) {
        let Some(last) = self.last_clones.remove(&root) else {
            return;
        };
        while let Some(sibling) = document.next_sibling(root) {
            document.remove(sibling);
            if sibling == last {
                break;
            }
        }
    }
}

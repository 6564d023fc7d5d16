/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! A small mutable document tree.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. [`Document::detach`] only takes a node out of the tree; the
//! handle stays valid, so a detached subtree can still be inspected or
//! reinserted. [`Document::remove`] frees the subtree instead, and its slots
//! are reused by nodes created later, so handles into a removed subtree must
//! not be used again. Attributes are stored inline on elements, in source
//! order.

/// Handle to a node of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document node at the root of the tree.
    Document,
    Element {
        name: String,
        attributes: Vec<Attribute>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    free: bool,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            free: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    // Slots of removed nodes, reused before the arena grows.
    free: Vec<usize>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only its document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Document)],
            free: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The first element child of the document node (`<html>` in a page).
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .iter()
            .copied()
            .find(|&child| self.is_element(child))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        if let Some(index) = self.free.pop() {
            self.nodes[index] = NodeData::new(kind);
            return NodeId(index);
        }
        self.nodes.push(NodeData::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    /// Number of live nodes, the document node included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeKind::Element {
            name: name.to_string(),
            attributes: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.kind(node), NodeKind::Element { .. })
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.kind(node), NodeKind::Text(_))
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match self.kind(node) {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.kind(node) {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Replace the value of a text node. Other nodes are left unchanged.
    pub fn set_text(&mut self, node: NodeId, value: &str) {
        if let NodeKind::Text(text) = &mut self.nodes[node.0].kind {
            *text = value.to_string();
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    fn position(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(node)?;
        let index = self.children(parent).iter().position(|&c| c == node)?;
        Some((parent, index))
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (parent, index) = self.position(node)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (parent, index) = self.position(node)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Ancestors of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            document: self,
            next: self.parent(node),
        }
    }

    /// Whether `node` is reachable from the document node.
    pub fn is_attached(&self, node: NodeId) -> bool {
        node == self.root() || self.ancestors(node).any(|a| a == self.root())
    }

    /// Detach `node` from its parent. Does nothing for a detached node.
    pub fn detach(&mut self, node: NodeId) {
        if let Some((parent, index)) = self.position(node) {
            self.nodes[parent.0].children.remove(index);
        }
        self.nodes[node.0].parent = None;
    }

    /// Detach `node` and free it together with its subtree. Does nothing for
    /// the document node or a node already removed.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root() || self.nodes[node.0].free {
            return;
        }
        self.detach(node);
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            let data = &mut self.nodes[current.0];
            pending.append(&mut data.children);
            data.kind = NodeKind::Text(String::new());
            data.parent = None;
            data.free = true;
            self.free.push(current.0);
        }
    }

    /// Append `child` as the last child of `parent`, moving it if needed.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Insert `node` right after `reference`.
    ///
    /// Returns `false`, leaving `node` untouched, when `reference` has no
    /// parent.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> bool {
        if self.parent(reference).is_none() {
            return false;
        }
        self.detach(node);
        let Some((parent, index)) = self.position(reference) else {
            return false;
        };
        self.nodes[parent.0].children.insert(index + 1, node);
        self.nodes[node.0].parent = Some(parent);
        true
    }

    /// Copy `node` and its whole subtree. The copy is detached.
    pub fn deep_clone(&mut self, node: NodeId) -> NodeId {
        let copy = self.push(self.kind(node).clone());
        let children = self.children(node).to_vec();
        for child in children {
            let child_copy = self.deep_clone(child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }

    pub fn attributes(&self, node: NodeId) -> &[Attribute] {
        match self.kind(node) {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Names of the attributes of `node`, in document order.
    pub fn attribute_names(&self, node: NodeId) -> Vec<String> {
        self.attributes(node)
            .iter()
            .map(|a| a.name.clone())
            .collect()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Set an attribute, appending it when absent. Ignored on non-elements.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            match attributes.iter_mut().find(|a| a.name == name) {
                Some(attribute) => attribute.value = value.to_string(),
                None => attributes.push(Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
            }
        }
    }

    /// Remove an attribute and return its former value.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Option<String> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => {
                let index = attributes.iter().position(|a| a.name == name)?;
                Some(attributes.remove(index).value)
            }
            _ => None,
        }
    }

    pub fn class_name(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "class")
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_name(node)
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let classes = match self.class_name(node) {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &classes);
    }

    /// Remove every occurrence of `class`. The `class` attribute itself is
    /// kept, possibly empty.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        let Some(existing) = self.class_name(node) else {
            return;
        };
        let remaining = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "class", &remaining);
    }

    /// Depth-first, document-order iterator over `node` and its descendants.
    pub fn descendants(&self, node: NodeId) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: vec![node],
        }
    }

    /// Find an attached element by its `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&node| self.attribute(node, "id") == Some(id))
    }

    /// Concatenated text of all text nodes below `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .filter_map(|n| self.text(n))
            .collect()
    }
}

pub struct Ancestors<'a> {
    document: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.document.parent(current);
        Some(current)
    }
}

pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.document.children(current).iter().rev().copied());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let root = doc.root();
        doc.append_child(root, body);
        let first = doc.create_element("p");
        let second = doc.create_element("p");
        doc.append_child(body, first);
        doc.append_child(body, second);
        (doc, body, first, second)
    }

    #[test]
    fn test_insert_after_and_siblings() {
        let (mut doc, body, first, second) = sample();
        let inserted = doc.create_element("div");
        assert!(doc.insert_after(first, inserted));
        assert_eq!(doc.children(body), &[first, inserted, second]);
        assert_eq!(doc.next_sibling(first), Some(inserted));
        assert_eq!(doc.previous_sibling(second), Some(inserted));
        assert_eq!(doc.next_sibling(second), None);
    }

    #[test]
    fn test_insert_after_detached_reference() {
        let mut doc = Document::new();
        let lonely = doc.create_element("p");
        let other = doc.create_element("p");
        assert!(!doc.insert_after(lonely, other));
        assert_eq!(doc.parent(other), None);
    }

    #[test]
    fn test_detach_keeps_subtree() {
        let (mut doc, body, first, second) = sample();
        let text = doc.create_text("hello");
        doc.append_child(first, text);
        doc.detach(first);
        assert_eq!(doc.children(body), &[second]);
        assert_eq!(doc.parent(first), None);
        assert!(!doc.is_attached(text));
        assert_eq!(doc.text_content(first), "hello");
    }

    #[test]
    fn test_remove_frees_subtree_slots() {
        let (mut doc, body, first, second) = sample();
        let text = doc.create_text("gone");
        doc.append_child(first, text);
        assert_eq!(doc.node_count(), 5);

        doc.remove(first);
        assert_eq!(doc.children(body), &[second]);
        assert_eq!(doc.node_count(), 3);

        // Removing twice, or removing the document node, changes nothing.
        doc.remove(first);
        doc.remove(doc.root());
        assert_eq!(doc.node_count(), 3);

        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let mut reused = vec![a.index(), b.index()];
        reused.sort();
        let mut freed = vec![first.index(), text.index()];
        freed.sort();
        assert_eq!(reused, freed);
        assert_eq!(doc.tag_name(a), Some("a"));
        assert!(doc.children(a).is_empty());
    }

    #[test]
    fn test_clone_and_remove_cycles_stay_bounded() {
        let (mut doc, body, first, _) = sample();
        let text = doc.create_text("row");
        doc.append_child(first, text);
        let size = doc.node_count();

        for _ in 0..1000 {
            let copy = doc.deep_clone(first);
            doc.append_child(body, copy);
            doc.remove(copy);
        }
        assert_eq!(doc.node_count(), size);
        assert!(doc.create_element("p").index() < size + 2);
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let (mut doc, _, first, _) = sample();
        doc.set_attribute(first, "id", "a");
        let text = doc.create_text("x");
        doc.append_child(first, text);

        let copy = doc.deep_clone(first);
        assert_eq!(doc.parent(copy), None);
        assert_eq!(doc.attribute(copy, "id"), Some("a"));

        let copied_text = doc.children(copy)[0];
        doc.set_text(copied_text, "y");
        assert_eq!(doc.text(text), Some("x"));
        assert_eq!(doc.parent(copied_text), Some(copy));
    }

    #[test]
    fn test_class_helpers() {
        let (mut doc, _, first, _) = sample();
        doc.set_attribute(first, "class", "template optional");
        assert!(doc.has_class(first, "optional"));
        assert!(!doc.has_class(first, "option"));

        doc.remove_class(first, "template");
        assert_eq!(doc.class_name(first), Some("optional"));
        doc.remove_class(first, "optional");
        assert_eq!(doc.class_name(first), Some(""));

        doc.add_class(first, "list");
        doc.add_class(first, "list");
        assert_eq!(doc.class_name(first), Some("list"));
    }

    #[test]
    fn test_element_by_id_ignores_detached() {
        let (mut doc, _, first, second) = sample();
        doc.set_attribute(first, "id", "one");
        doc.set_attribute(second, "id", "two");
        doc.detach(second);
        assert_eq!(doc.element_by_id("one"), Some(first));
        assert_eq!(doc.element_by_id("two"), None);
    }

    #[test]
    fn test_set_and_remove_attribute_preserves_order() {
        let (mut doc, _, first, _) = sample();
        doc.set_attribute(first, "id", "x");
        doc.set_attribute(first, "title", "t");
        doc.set_attribute(first, "id", "y");
        assert_eq!(doc.attribute_names(first), vec!["id", "title"]);
        assert_eq!(doc.remove_attribute(first, "id"), Some("y".to_string()));
        assert_eq!(doc.remove_attribute(first, "id"), None);
    }
}

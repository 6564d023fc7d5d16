/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Top-down filter pipeline over a subtree.

use lb_core::{contains, Data, Document, NodeId, NodeKind};

use super::I18n;
use crate::error::TemplateError;
use crate::status::Status;

/// A node handed to a [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Element(NodeId),
    Attribute { element: NodeId, name: String },
    Text(NodeId),
}

/// A transformation applied to each node of a subtree by [`apply_filters`].
pub trait Filter {
    fn apply(&self, document: &mut Document, target: &Target) -> Result<(), TemplateError>;
}

/// Apply `filters`, in order, to `node` and every element, attribute and
/// text node below it. Attributes of an element are filtered before its
/// children.
///
/// A filter that fails on a node is logged and skipped for that node only.
/// An element removed by a filter is not filtered further, and neither is
/// its subtree.
pub fn apply_filters(document: &mut Document, node: NodeId, filters: &[&dyn Filter]) {
    match document.kind(node) {
        NodeKind::Document => visit_children(document, node, filters),
        NodeKind::Text(_) => {
            let target = Target::Text(node);
            for filter in filters {
                run(*filter, document, &target);
            }
        }
        NodeKind::Element { .. } => {
            let parent = document.parent(node);
            let target = Target::Element(node);
            for filter in filters {
                run(*filter, document, &target);
                if document.parent(node) != parent {
                    return;
                }
            }

            for name in document.attribute_names(node) {
                let target = Target::Attribute {
                    element: node,
                    name,
                };
                for filter in filters {
                    run(*filter, document, &target);
                }
            }

            visit_children(document, node, filters);
        }
    }
}

fn visit_children(document: &mut Document, node: NodeId, filters: &[&dyn Filter]) {
    let children = document.children(node).to_vec();
    for child in children {
        // Skip children that an earlier filter moved or removed.
        if document.parent(child) == Some(node) {
            apply_filters(document, child, filters);
        }
    }
}

fn run(filter: &dyn Filter, document: &mut Document, target: &Target) {
    if let Err(err) = filter.apply(document, target) {
        tracing::warn!(?target, error = %err, "filter failed");
    }
}

/// Removes elements whose `lang` is not part of the requested language.
#[derive(Debug, Clone)]
pub struct LanguageFilter {
    language: String,
}

impl LanguageFilter {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }
}

impl Filter for LanguageFilter {
    fn apply(&self, document: &mut Document, target: &Target) -> Result<(), TemplateError> {
        let Target::Element(node) = *target else {
            return Ok(());
        };
        if let Some(lang) = document.attribute(node, "lang") {
            if !contains(&self.language, lang) {
                tracing::debug!(lang, language = %self.language, "removing element");
                document.remove(node);
            }
        }
        Ok(())
    }
}

/// Gives every element an explicit `lang`, inherited from the nearest
/// ancestor that has one, `""` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageSetter;

impl Filter for LanguageSetter {
    fn apply(&self, document: &mut Document, target: &Target) -> Result<(), TemplateError> {
        let Target::Element(node) = *target else {
            return Ok(());
        };
        if document.has_attribute(node, "lang") {
            return Ok(());
        }
        let inherited = document
            .ancestors(node)
            .find_map(|ancestor| document.attribute(ancestor, "lang"))
            .unwrap_or_default()
            .to_string();
        document.set_attribute(node, "lang", &inherited);
        Ok(())
    }
}

/// Replaces `#dotted.name#` parameters in attribute values and text.
///
/// Every node is resolved against the language given to
/// [`ParamFilter::new`], not against the `lang` that [`LanguageSetter`]
/// makes explicit on each element.
#[derive(Debug, Clone)]
pub struct ParamFilter<'a> {
    i18n: I18n<'a>,
    data: &'a Data,
    language: String,
}

impl<'a> ParamFilter<'a> {
    pub fn new(i18n: I18n<'a>, data: &'a Data, language: &str) -> Self {
        Self {
            i18n,
            data,
            language: language.to_string(),
        }
    }
}

impl Filter for ParamFilter<'_> {
    fn apply(&self, document: &mut Document, target: &Target) -> Result<(), TemplateError> {
        match target {
            Target::Element(_) => Ok(()),
            Target::Attribute { element, name } => {
                let value = document.attribute(*element, name).ok_or_else(|| {
                    TemplateError::MissingAttribute {
                        node: *element,
                        name: name.clone(),
                    }
                })?;
                let (value, status) = self.i18n.replace_params(value, self.data, &self.language);
                if status != Status::NoChange {
                    document.set_attribute(*element, name, &value);
                }
                Ok(())
            }
            Target::Text(node) => {
                let Some(text) = document.text(*node) else {
                    return Ok(());
                };
                let (value, status) = self.i18n.replace_params(text, self.data, &self.language);
                if status != Status::NoChange {
                    document.set_text(*node, &value);
                }
                Ok(())
            }
        }
    }
}

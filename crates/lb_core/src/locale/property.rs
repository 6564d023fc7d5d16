/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure raised by a function-valued property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HookError(pub String);

/// A computed property, typically a pluralization rule.
///
/// Called with the property key, the data being rendered and the language
/// code in use.
pub type PropertyFn = Arc<dyn Fn(&str, &Value, &str) -> Result<String, HookError> + Send + Sync>;

/// A node of a language property tree.
#[derive(Clone)]
pub enum Property {
    /// A string, possibly holding `#param#` tokens of its own.
    Text(String),
    Map(IndexMap<String, Property>),
    Function(PropertyFn),
}

impl Property {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str, &Value, &str) -> Result<String, HookError> + Send + Sync + 'static,
    {
        Property::Function(Arc::new(f))
    }

    /// Build a map property from `(key, property)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Property)>,
    {
        Property::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Convert JSON into a property tree.
    ///
    /// Scalars become text, arrays become maps keyed by index and `null`
    /// entries are dropped, so they read as absent.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Property::Text(s)),
            Value::Bool(b) => Some(Property::Text(b.to_string())),
            Value::Number(n) => Some(Property::Text(n.to_string())),
            Value::Array(items) => Some(Property::Map(
                items
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, v)| Some((i.to_string(), Property::from_json(v)?)))
                    .collect(),
            )),
            Value::Object(map) => Some(Property::Map(
                map.into_iter()
                    .filter_map(|(k, v)| Some((k, Property::from_json(v)?)))
                    .collect(),
            )),
        }
    }

    pub fn child(&self, key: &str) -> Option<&Property> {
        match self {
            Property::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Descend through `segments`. An empty path returns `self`.
    pub fn descend<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Property> {
        segments
            .iter()
            .try_fold(self, |current, segment| current.child(segment.as_ref()))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Property::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Property::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Property::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for Property {
    fn from(s: &str) -> Self {
        Property::Text(s.to_string())
    }
}

impl From<String> for Property {
    fn from(s: String) -> Self {
        Property::Text(s)
    }
}

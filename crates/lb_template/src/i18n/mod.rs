/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Internationalization of templates.
//!
//! Parameters are resolved from the data bound to the template first. A
//! parameter that the data does not define (as opposed to one it defines as
//! `null`) falls back to the language properties for the language in use.
//! A text property is itself a template whose parameters are resolved the
//! same way, with the same data and language; a function property is called
//! with the key, the data and the language.

mod filter;

pub use filter::{apply_filters, Filter, LanguageFilter, LanguageSetter, ParamFilter, Target};

use lb_core::data;
use lb_core::{Data, Document, LanguageProperties, NodeId, Property};
use serde_json::Value;

use crate::status::Status;
use crate::substitution::{replace_params, Resolution, DOTTED_PARAM_PATTERN};

const DEFAULT_MAX_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct I18n<'a> {
    properties: &'a LanguageProperties,
    max_depth: usize,
}

impl<'a> I18n<'a> {
    pub fn new(properties: &'a LanguageProperties) -> Self {
        Self {
            properties,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply properties may refer to other properties.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn properties(&self) -> &'a LanguageProperties {
        self.properties
    }

    /// Resolve a dotted parameter name from `data`, falling back to the
    /// language properties when `data` leaves it undefined.
    pub fn resolve(&self, key: &str, data: &Data, language: &str) -> Resolution {
        self.resolve_at(key, data, language, 0)
    }

    /// The final string of a language property, its own parameters
    /// replaced. `None` when the property is absent, not a string, or its
    /// function failed.
    pub fn get_string(&self, key: &str, data: &Data, language: &str) -> Option<String> {
        match self.property_at(key, data, language, 0) {
            Resolution::Found(value) => Some(value),
            Resolution::Undefined | Resolution::Null => None,
        }
    }

    /// Replace the `#dotted.name#` parameters of `value`.
    pub fn replace_params(&self, value: &str, data: &Data, language: &str) -> (String, Status) {
        self.expand(value, data, language, 0)
    }

    /// Run the standard filters over `node` and its subtree: drop elements
    /// in other languages, make inherited languages explicit and replace
    /// parameters.
    pub fn filter_html(&self, document: &mut Document, node: NodeId, data: &Data, language: &str) {
        let by_language = LanguageFilter::new(language);
        let set_language = LanguageSetter;
        let params = ParamFilter::new(*self, data, language);
        apply_filters(document, node, &[&by_language, &set_language, &params]);
    }

    fn expand(&self, value: &str, data: &Data, language: &str, depth: usize) -> (String, Status) {
        replace_params(value, &DOTTED_PARAM_PATTERN, |name| {
            self.resolve_at(name, data, language, depth)
        })
    }

    fn resolve_at(&self, key: &str, data: &Data, language: &str, depth: usize) -> Resolution {
        match data::lookup_path(data, key) {
            Some(Value::Null) => Resolution::Null,
            Some(value) => Resolution::Found(data::value_to_string(value)),
            None => self.property_at(key, data, language, depth),
        }
    }

    fn property_at(&self, key: &str, data: &Data, language: &str, depth: usize) -> Resolution {
        if depth >= self.max_depth {
            tracing::warn!(key, language, depth, "language property nesting too deep");
            return Resolution::Undefined;
        }
        match self.properties.get(key, language) {
            None => Resolution::Undefined,
            Some(Property::Text(template)) => {
                Resolution::Found(self.expand(template, data, language, depth + 1).0)
            }
            Some(Property::Function(function)) => match function(key, data, language) {
                Ok(value) => Resolution::Found(self.expand(&value, data, language, depth + 1).0),
                Err(err) => {
                    tracing::warn!(key, language, error = %err, "property function failed");
                    Resolution::Null
                }
            },
            Some(Property::Map(_)) => {
                tracing::debug!(key, language, "language property is not a string");
                Resolution::Undefined
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lb_core::HookError;
    use serde_json::json;

    fn properties() -> LanguageProperties {
        let mut props = LanguageProperties::new();
        props.add(
            "",
            Property::map([
                ("greeting", Property::from("Hello #user.name#")),
                ("site", Property::from("lb")),
                ("welcome", Property::from("#greeting#, welcome to #site#")),
                ("loop", Property::from("again #loop#")),
                ("menu", Property::map([("file", Property::from("File"))])),
                (
                    "items",
                    Property::function(|_, data, _| {
                        match data.get("count").and_then(Value::as_u64) {
                            Some(1) => Ok("one item".to_string()),
                            Some(n) => Ok(format!("{n} items")),
                            None => Err(HookError("count is not a number".to_string())),
                        }
                    }),
                ),
            ]),
        );
        props.add("fr", Property::map([("greeting", Property::from("Bonjour #user.name#"))]));
        props
    }

    #[test]
    fn test_data_wins_over_properties() {
        let props = properties();
        let i18n = I18n::new(&props);
        let data = json!({ "site": "custom" });
        assert_eq!(i18n.resolve("site", &data, ""), Resolution::Found("custom".into()));
    }

    #[test]
    fn test_null_data_does_not_fall_back() {
        let props = properties();
        let i18n = I18n::new(&props);
        let data = json!({ "site": null });
        assert_eq!(i18n.resolve("site", &data, ""), Resolution::Null);
    }

    #[test]
    fn test_nested_properties_use_same_data() {
        let props = properties();
        let i18n = I18n::new(&props);
        let data = json!({ "user": { "name": "Ada" } });
        assert_eq!(
            i18n.get_string("welcome", &data, "en").as_deref(),
            Some("Hello Ada, welcome to lb")
        );
        assert_eq!(
            i18n.get_string("greeting", &data, "fr-CA").as_deref(),
            Some("Bonjour Ada")
        );
    }

    #[test]
    fn test_function_property() {
        let props = properties();
        let i18n = I18n::new(&props);
        assert_eq!(
            i18n.get_string("items", &json!({ "count": 1 }), "").as_deref(),
            Some("one item")
        );
        let (value, status) = i18n.replace_params("#items#", &json!({ "count": 3 }), "");
        assert_eq!(value, "3 items");
        assert_eq!(status, Status::Success);
    }

    #[test]
    fn test_failing_function_is_null() {
        let props = properties();
        let i18n = I18n::new(&props);
        assert_eq!(i18n.resolve("items", &json!({}), ""), Resolution::Null);
        let (value, status) = i18n.replace_params("[#items#]", &json!({}), "");
        assert_eq!(value, "[null]");
        assert_eq!(status, Status::Failed);
    }

    #[test]
    fn test_missing_everywhere() {
        let props = properties();
        let i18n = I18n::new(&props);
        let (value, status) = i18n.replace_params("#nowhere# #menu#", &json!({}), "");
        assert_eq!(value, "#nowhere# #menu#");
        assert_eq!(status, Status::Missing);
        assert_eq!(i18n.get_string("menu", &json!({}), ""), None);
        assert_eq!(i18n.get_string("menu.file", &json!({}), "").as_deref(), Some("File"));
    }

    #[test]
    fn test_self_reference_is_bounded() {
        let props = properties();
        let i18n = I18n::new(&props).with_max_depth(3);
        assert_eq!(
            i18n.get_string("loop", &json!({}), "").as_deref(),
            Some("again again again #loop#")
        );
    }
}

/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Class names that give template nodes their structural meaning.
///
/// The defaults match the stylesheet convention `.template, .optional
/// { display: none }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Markers {
    /// Prototype subtree, cloned and never bound itself.
    pub template: String,
    /// Subtree repeated once per item of an array.
    pub list: String,
    /// Subtree hidden until its data is available, removed on `null`.
    pub optional: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            template: "template".to_string(),
            list: "list".to_string(),
            optional: "optional".to_string(),
        }
    }
}

impl Markers {
    /// Rename any subset of the markers, by default name.
    ///
    /// Keys other than `template`, `list` and `optional` are ignored.
    pub fn alias<'a, I>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (marker, alias) in aliases {
            match marker {
                "template" => self.template = alias.to_string(),
                "list" => self.list = alias.to_string(),
                "optional" => self.optional = alias.to_string(),
                _ => {}
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineConfig {
    pub markers: Markers,
    /// Attribute stripped from bound elements so clones never share an id.
    pub id_attribute: String,
    /// Nesting limit when language properties refer to other properties.
    pub max_resolution_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            id_attribute: "id".to_string(),
            max_resolution_depth: 16,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file, JSON when the extension says so and YAML
    /// otherwise.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_subset() {
        let mut markers = Markers::default();
        markers.alias([("list", "repeat"), ("unknown", "whatever")]);
        assert_eq!(markers.list, "repeat");
        assert_eq!(markers.template, "template");
        assert_eq!(markers.optional, "optional");
    }

    #[test]
    fn test_config_from_yaml_partial() {
        let config = EngineConfig::from_yaml_str(
            r#"
markers:
  optional: maybe
  colour: blue
max-resolution-depth: 4
"#,
        )
        .unwrap();
        assert_eq!(config.markers.optional, "maybe");
        assert_eq!(config.markers.template, "template");
        assert_eq!(config.id_attribute, "id");
        assert_eq!(config.max_resolution_depth, 4);
    }

    #[test]
    fn test_config_from_json() {
        let config = EngineConfig::from_json_str(r#"{"id-attribute": "data-id"}"#).unwrap();
        assert_eq!(config.id_attribute, "data-id");
        assert_eq!(config.markers, Markers::default());
    }
}

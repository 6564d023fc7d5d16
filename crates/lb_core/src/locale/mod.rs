/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Language properties with language-code fallback.
//!
//! Properties are stored per language code (`""`, `"fr"`, `"fr-CA"`, ...).
//! A lookup for a requested code picks the single most specific stored code
//! that the requested one *contains* and reads the property from that code's
//! tree only. There is no merging across codes: once `"fr"` is stored, a
//! request for `"fr-CA"` never reads from `""`, even for keys `"fr"` lacks.

pub mod property;
mod provider;

use std::collections::HashMap;
use std::path::Path;

use crate::dom::Document;
use crate::error::{CoreError, Result};
pub use property::{HookError, Property, PropertyFn};
pub use provider::{EnvLocale, FixedLocale, LocaleProvider};

/// Whether `language` contains `prefix` as a whole hyphen-separated prefix.
///
/// Comparison is case-insensitive; the empty prefix is contained in every
/// language. `"fr-CA-Quebec"` contains `"fr"` and `"fr-CA"`, but `"frable"`
/// does not contain `"fr"`.
pub fn contains(language: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    let language = language.to_lowercase();
    let prefix = prefix.to_lowercase();
    language == prefix
        || language
            .strip_prefix(&prefix)
            .is_some_and(|rest| rest.starts_with('-'))
}

/// Language code for a document: the `lang` attribute of its root element,
/// else the platform locale, else `""`.
pub fn default_language_code(document: &Document, provider: &dyn LocaleProvider) -> String {
    document
        .document_element()
        .and_then(|root| document.attribute(root, "lang"))
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
        .or_else(|| provider.language())
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
struct Entry {
    code: String,
    properties: Property,
}

/// Property trees keyed by language code.
#[derive(Debug, Clone, Default)]
pub struct LanguageProperties {
    // Keyed by lowercased code.
    entries: HashMap<String, Entry>,
}

impl LanguageProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the property tree of a language, replacing (not merging) any
    /// tree already stored for the same code in any casing.
    pub fn add(&mut self, code: &str, properties: Property) {
        self.entries.insert(
            code.to_lowercase(),
            Entry {
                code: code.to_string(),
                properties,
            },
        );
    }

    /// Stored codes, as last added, sorted.
    pub fn language_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.entries.values().map(|e| e.code.clone()).collect();
        codes.sort();
        codes
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most specific stored code contained in `language`.
    pub fn matching_code(&self, language: &str) -> Option<&str> {
        self.entry_for(language).map(|e| e.code.as_str())
    }

    fn entry_for(&self, language: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .filter(|(key, _)| contains(language, key))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, entry)| entry)
    }

    /// Get a property by dotted key, e.g. `"messages.welcome"`.
    ///
    /// Function-valued properties are returned as they are; calling them is
    /// up to the caller.
    pub fn get(&self, key: &str, language: &str) -> Option<&Property> {
        let segments: Vec<&str> = key.split('.').collect();
        self.get_path(&segments, language)
    }

    /// Get a property by explicit path segments, which may contain dots.
    pub fn get_path<S: AsRef<str>>(&self, segments: &[S], language: &str) -> Option<&Property> {
        self.entry_for(language)?.properties.descend(segments)
    }

    /// Load one language file (YAML, or JSON by extension). The language
    /// code is the file stem, so `fr-CA.yaml` holds `"fr-CA"` and
    /// `root.yaml` holds the neutral `""` language. Returns the code.
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CoreError::InvalidLanguageFile(path.display().to_string()))?;
        let code = if stem == "root" { "" } else { stem }.to_string();

        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        let properties =
            Property::from_json(value).unwrap_or_else(|| Property::Map(Default::default()));
        tracing::debug!(code = %code, path = %path.display(), "loaded language properties");
        self.add(&code, properties);
        Ok(code)
    }

    /// Load every `.yaml`, `.yml` and `.json` file of a directory.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<String>> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("yaml" | "yml" | "json")
                )
            })
            .collect();
        paths.sort();

        let mut codes = Vec::new();
        for path in paths {
            codes.push(self.load_file(&path)?);
        }
        Ok(codes)
    }
}

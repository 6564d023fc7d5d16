/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

/// Source of the platform language, used when a document does not declare
/// one.
pub trait LocaleProvider {
    fn language(&self) -> Option<String>;
}

/// Reads the POSIX locale variables `LC_ALL`, `LC_MESSAGES` and `LANG`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvLocale;

impl LocaleProvider for EnvLocale {
    fn language(&self) -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| posix_to_language_code(&value))
    }
}

/// A provider with a fixed answer.
#[derive(Debug, Default, Clone)]
pub struct FixedLocale(Option<String>);

impl FixedLocale {
    pub fn new(code: &str) -> Self {
        Self(Some(code.to_string()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl LocaleProvider for FixedLocale {
    fn language(&self) -> Option<String> {
        self.0.clone()
    }
}

/// `fr_CA.UTF-8@euro` becomes `fr-CA`; `C` and `POSIX` carry no language.
fn posix_to_language_code(value: &str) -> Option<String> {
    let code = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-");
    match code.as_str() {
        "" | "C" | "POSIX" => None,
        _ => Some(code),
    }
}

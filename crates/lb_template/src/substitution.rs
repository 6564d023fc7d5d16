/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Replacement of `#name#` parameters in a single string.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::status::Status;

/// Parameters bound by the template engine: `#name#`.
pub static PARAM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([a-zA-Z0-9_-]+)#").expect("invalid param regex"));

/// Parameters resolved by the i18n layer, which may be dotted: `#a.b.c#`.
pub static DOTTED_PARAM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([a-zA-Z0-9_.-]+)#").expect("invalid dotted param regex"));

/// What a lookup found for one parameter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    /// No value yet; the parameter stays as written.
    Undefined,
    /// Explicitly `null`.
    Null,
}

impl Resolution {
    /// `None` is undefined, `Some(Value::Null)` is null.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Resolution::Undefined,
            Some(Value::Null) => Resolution::Null,
            Some(value) => Resolution::Found(lb_core::data::value_to_string(value)),
        }
    }
}

/// Replace every parameter matched by `pattern` in `value`.
///
/// Found values are substituted (`Success`), undefined parameters are left
/// verbatim (`Missing`) and null ones become `null` (`Failed`). The status of
/// the string is the most severe of its parameters, or `NoChange` when there
/// are none.
pub fn replace_params<F>(value: &str, pattern: &Regex, mut lookup: F) -> (String, Status)
where
    F: FnMut(&str) -> Resolution,
{
    let mut status = Status::NoChange;
    let replaced = pattern.replace_all(value, |caps: &Captures| {
        let (replacement, param_status) = match lookup(&caps[1]) {
            Resolution::Found(found) => (found, Status::Success),
            Resolution::Undefined => (caps[0].to_string(), Status::Missing),
            Resolution::Null => ("null".to_string(), Status::Failed),
        };
        status = status.max(param_status);
        replacement
    });
    (replaced.into_owned(), status)
}

/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Data bound to templates.
//!
//! Data is plain JSON. A key that is absent is *undefined* (the value is not
//! available yet), while an explicit `null` asks for the enclosing optional
//! section to be removed. Lookups therefore return `Option<&Value>` and the
//! two cases stay distinct: `None` versus `Some(Value::Null)`.

use serde_json::Value;

pub type Data = Value;

/// Look up a top-level key. Anything other than an object has no keys.
pub fn lookup<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    match data {
        Value::Object(map) => map.get(key),
        _ => None,
    }
}

/// Look up a dot-separated path such as `user.name` or `items.0`.
///
/// Any missing segment, including descending through `null` or a scalar,
/// makes the whole path undefined.
pub fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// String form of a value as it appears once substituted into markup.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_distinguishes_null_and_absent() {
        let data = json!({ "a": null, "b": "x" });
        assert_eq!(lookup(&data, "a"), Some(&Value::Null));
        assert_eq!(lookup(&data, "b"), Some(&json!("x")));
        assert_eq!(lookup(&data, "c"), None);
        assert_eq!(lookup(&json!("scalar"), "a"), None);
    }

    #[test]
    fn test_lookup_path() {
        let data = json!({
            "user": { "name": "Ada", "tags": ["x", "y"], "nothing": null }
        });
        assert_eq!(lookup_path(&data, "user.name"), Some(&json!("Ada")));
        assert_eq!(lookup_path(&data, "user.tags.1"), Some(&json!("y")));
        assert_eq!(lookup_path(&data, "user.nothing"), Some(&Value::Null));
        assert_eq!(lookup_path(&data, "user.nothing.deeper"), None);
        assert_eq!(lookup_path(&data, "user.missing"), None);
        assert_eq!(lookup_path(&data, "user.name.first"), None);
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("text")), "text");
        assert_eq!(value_to_string(&json!(3)), "3");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&Value::Null), "null");
        assert_eq!(value_to_string(&json!([1, "a", null])), "1,a,");
    }
}

// Tolerant JSON field extraction
//
// ACOS list responses are loosely typed across firmware releases: ports
// arrive as numbers or strings, nested lists go missing, and entries are
// occasionally not objects at all. These helpers never fail on shape; they
// fall back to empty values and leave a debug trace instead.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Error;

pub type Object = Map<String, Value>;

/// String value at `key`, or `""` when missing or not a string.
pub fn get_str(obj: &Object, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            debug!(key, value = %other, "non-string value");
            String::new()
        }
        None => {
            debug!(key, "key not found");
            String::new()
        }
    }
}

/// Any value at `key` rendered as text, or `""` when missing or null.
///
/// Numbers render without quotes (`80`), strings without quotes (`tcp`),
/// and containers as compact JSON.
pub fn get_value(obj: &Object, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) => {
            debug!(key, "key is null");
            String::new()
        }
        None => {
            debug!(key, "key not found");
            String::new()
        }
        Some(other) => other.to_string(),
    }
}

/// Parse `body` and return the array stored under the top-level `key`.
///
/// Invalid JSON is an error; a missing key or a non-array value is not.
pub fn extract_list(body: &[u8], key: &str) -> Result<Vec<Value>, Error> {
    let mut root: Value = serde_json::from_slice(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
    })?;

    match root.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => {
            debug!(list = key, "not an array");
            Ok(Vec::new())
        }
        None => {
            debug!(list = key, "list not found");
            Ok(Vec::new())
        }
    }
}

/// Nested array under `key`, empty when missing or not an array.
pub fn get_list<'a>(obj: &'a Object, key: &str) -> &'a [Value] {
    match obj.get(key) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            debug!(list = key, "nested value is not an array");
            &[]
        }
        None => {
            debug!(list = key, "nested list not found");
            &[]
        }
    }
}

/// The entries of `items` that are objects; everything else is skipped.
pub fn objects<'a>(items: &'a [Value], what: &'static str) -> impl Iterator<Item = &'a Object> {
    items.iter().filter_map(move |item| {
        let obj = item.as_object();
        if obj.is_none() {
            debug!(entry = what, value = %item, "skipping non-object entry");
        }
        obj
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(v: Value) -> Object {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn get_str_rejects_non_strings() {
        let o = obj(json!({ "name": "web01", "port": 80 }));
        assert_eq!(get_str(&o, "name"), "web01");
        assert_eq!(get_str(&o, "port"), "");
        assert_eq!(get_str(&o, "missing"), "");
    }

    #[test]
    fn get_value_renders_scalars() {
        let o = obj(json!({
            "num": 8080,
            "text": "2",
            "flag": true,
            "nothing": null,
            "nested": { "a": 1 }
        }));
        assert_eq!(get_value(&o, "num"), "8080");
        assert_eq!(get_value(&o, "text"), "2");
        assert_eq!(get_value(&o, "flag"), "true");
        assert_eq!(get_value(&o, "nothing"), "");
        assert_eq!(get_value(&o, "missing"), "");
        assert_eq!(get_value(&o, "nested"), r#"{"a":1}"#);
    }

    #[test]
    fn extract_list_tolerates_shape_problems() {
        let body = br#"{ "server_list": [ {"name": "a"}, 7 ] }"#;
        assert_eq!(extract_list(body, "server_list").unwrap().len(), 2);

        assert!(extract_list(br#"{ "other": [] }"#, "server_list").unwrap().is_empty());
        assert!(extract_list(br#"{ "server_list": {} }"#, "server_list").unwrap().is_empty());
        assert!(extract_list(br"[1, 2]", "server_list").unwrap().is_empty());
    }

    #[test]
    fn extract_list_fails_on_invalid_json() {
        let err = extract_list(b"<html>", "server_list").unwrap_err();
        assert!(matches!(err, Error::Deserialization { ref body, .. } if body == "<html>"));
    }

    #[test]
    fn objects_skips_non_objects() {
        let items = vec![json!({"name": "a"}), json!("junk"), json!(null), json!({"name": "b"})];
        let names: Vec<String> = objects(&items, "server").map(|o| get_str(o, "name")).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn get_list_defaults_to_empty() {
        let o = obj(json!({ "port_list": "none", "member_list": [1] }));
        assert!(get_list(&o, "port_list").is_empty());
        assert!(get_list(&o, "vport_list").is_empty());
        assert_eq!(get_list(&o, "member_list").len(), 1);
    }
}

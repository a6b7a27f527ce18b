//! Deterministic JSON handling for token segments

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Rebuild `value` with every object's keys in ascending order, at every depth
pub(crate) fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Compact serialization with sorted keys
pub(crate) fn to_canonical_string(value: &Value) -> Result<String> {
    serde_json::to_string(&sort_keys(value))
        .map_err(|e| Error::InvalidJson(format!("serialization failed: {e}")))
}

/// Indented serialization with sorted keys, for display
pub(crate) fn to_pretty_string(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(&sort_keys(value))
        .map_err(|e| Error::InvalidJson(format!("serialization failed: {e}")))
}

/// Parse `bytes` as a JSON object
///
/// `part` names the segment in error messages.
pub(crate) fn parse_object(bytes: &[u8], part: &str) -> Result<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::InvalidJson(format!("{part} is not a JSON object"))),
        Err(e) => Err(Error::InvalidJson(format!("Failed to parse {part}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_keys_nested() {
        let value = json!({"z": 1, "a": {"y": [ {"b": 1, "a": 2} ], "x": null}});
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"{"a":{"x":null,"y":[{"a":2,"b":1}]},"z":1}"#
        );
    }

    #[test]
    fn test_pretty_output() {
        let pretty = to_pretty_string(&json!({"b": true, "a": "x"})).unwrap();
        assert_eq!(pretty, "{\n  \"a\": \"x\",\n  \"b\": true\n}");
    }

    #[test]
    fn test_parse_object() {
        let map = parse_object(br#"{"sub":"1234567890"}"#, "payload").unwrap();
        assert_eq!(map["sub"], "1234567890");
    }

    #[test]
    fn test_parse_object_rejects_non_objects() {
        for input in [&b"[1,2]"[..], b"\"text\"", b"42", b"{", b"\xff\xfe"] {
            assert!(matches!(
                parse_object(input, "payload"),
                Err(Error::InvalidJson(_))
            ));
        }
    }
}

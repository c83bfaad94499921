//! Permissive deserializers for records written by the model.
//!
//! The model is asked for a schema but not held to it: numbers show up where
//! strings were requested and single ids show up where lists were. These
//! helpers accept any reasonable shape and fall back to "absent" otherwise,
//! leaving the renderer to substitute placeholder text.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(&other).into_iter().collect(),
        None => Vec::new(),
    })
}

pub fn opt_step<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Deserializes a list. Falsy values (`null`, `false`, `""`, `0`, `{}`) read
/// as an empty list, the same as a missing key.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => {
            serde_json::from_value(Value::Array(items)).map_err(D::Error::custom)
        }
        Some(value) if is_falsy(&value) => Ok(Vec::new()),
        Some(value) => Err(D::Error::custom(format!("expected a list, got {}", value))),
        None => Ok(Vec::new()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct LooseRecord {
        #[serde(default, deserialize_with = "opt_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "string_list")]
        ids: Vec<String>,
        #[serde(default, deserialize_with = "opt_step")]
        step: Option<i64>,
    }

    #[test]
    fn test_accepts_loose_shapes() {
        let record: LooseRecord =
            serde_json::from_value(json!({"text": 42, "ids": "fr_1", "step": "3"})).unwrap();
        assert_eq!(record.text.as_deref(), Some("42"));
        assert_eq!(record.ids, vec!["fr_1".to_string()]);
        assert_eq!(record.step, Some(3));
    }

    #[test]
    fn test_mixed_list_and_missing_keys() {
        let record: LooseRecord = serde_json::from_value(json!({"ids": [1, "pp_2", null]})).unwrap();
        assert_eq!(record.text, None);
        assert_eq!(record.ids, vec!["1".to_string(), "pp_2".to_string()]);
        assert_eq!(record.step, None);
    }

    #[test]
    fn test_unparseable_step_is_absent() {
        let record: LooseRecord = serde_json::from_value(json!({"step": "first", "text": {}})).unwrap();
        assert_eq!(record.step, None);
        assert_eq!(record.text, None);
    }
}

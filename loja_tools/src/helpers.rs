//! Lenient field decoders. Catalog records are hand-edited in the store admin, so any field can turn up as `null`,
//! missing, or with the wrong JSON type, and none of that should cost us the whole record.

use catalog_common::is_truthy;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through, `null` becomes `""` and any other value is kept in its JSON text form.
pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where D: Deserializer<'de> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    })
}

pub(crate) fn flag_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where D: Deserializer<'de> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(is_truthy))
}

/// Identifiers are integers, but a numeric string is accepted as well.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where D: Deserializer<'de> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders a JSON value for console output: strings without their quotes, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod test {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "string_or_empty")]
        text: String,
        #[serde(default, deserialize_with = "flag_or_false")]
        flag: bool,
        #[serde(default, deserialize_with = "optional_id")]
        id: Option<i64>,
    }

    #[test]
    fn lenient_fields() {
        let s: Sample = serde_json::from_value(json!({"text": null, "flag": null, "id": "42"})).unwrap();
        assert_eq!(s.text, "");
        assert!(!s.flag);
        assert_eq!(s.id, Some(42));

        let s: Sample = serde_json::from_value(json!({})).unwrap();
        assert_eq!(s.text, "");
        assert!(!s.flag);
        assert_eq!(s.id, None);

        let s: Sample = serde_json::from_value(json!({"text": 7891234, "flag": true, "id": 365654272})).unwrap();
        assert_eq!(s.text, "7891234");
        assert!(s.flag);
        assert_eq!(s.id, Some(365654272));

        let s: Sample = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert_eq!(s.id, None);
    }

    #[test]
    fn type_names() {
        assert_eq!(json_type_name(&json!(1)), "integer");
        assert_eq!(json_type_name(&json!(1.5)), "number");
        assert_eq!(json_type_name(&json!("x")), "string");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(display_value(&json!("Drone")), "Drone");
        assert_eq!(display_value(&json!(19.5)), "19.5");
    }
}

//! JSON object descriptions accepted by the CLI
//!
//! `{"type": "Article", "attributes": {"id": 1, "slug": "example-article"}}`

use anyhow::{anyhow, bail, Context, Result};
use permalink::Record;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn load_record(path: &Path) -> Result<Record> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read object file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    record_from_json(&value)
}

/// Scalars are stringified; `null` leaves the attribute absent
pub fn record_from_json(value: &Value) -> Result<Record> {
    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("object description must be a JSON object"))?;
    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("object description needs a non-empty \"type\" string"))?;

    let mut record = Record::new(type_name);
    let Some(attributes) = object.get("attributes") else {
        return Ok(record);
    };
    let attributes = attributes
        .as_object()
        .ok_or_else(|| anyhow!("\"attributes\" must be a JSON object"))?;

    for (name, value) in attributes {
        match value {
            Value::Null => {}
            Value::String(s) => record.set(name.as_str(), s),
            Value::Number(n) => record.set(name.as_str(), n),
            Value::Bool(b) => record.set(name.as_str(), b),
            Value::Array(_) | Value::Object(_) => {
                bail!("attribute \"{name}\" must be a string, number, boolean or null")
            }
        }
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use permalink::Linkable;
    use serde_json::json;

    #[test]
    fn test_scalars_are_stringified() {
        let record = record_from_json(&json!({
            "type": "Article",
            "attributes": {"id": 1, "slug": "example-article", "draft": false, "category": null}
        }))
        .unwrap();

        assert_eq!(record.type_name(), "Article");
        assert_eq!(record.attribute("id").as_deref(), Some("1"));
        assert_eq!(record.attribute("slug").as_deref(), Some("example-article"));
        assert_eq!(record.attribute("draft").as_deref(), Some("false"));
        assert_eq!(record.attribute("category"), None);
    }

    #[test]
    fn test_attributes_are_optional() {
        let record = record_from_json(&json!({"type": "Page"})).unwrap();
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn test_rejects_missing_type() {
        assert!(record_from_json(&json!({"attributes": {}})).is_err());
        assert!(record_from_json(&json!({"type": ""})).is_err());
    }

    #[test]
    fn test_rejects_nested_values() {
        let err = record_from_json(&json!({"type": "Article", "attributes": {"tags": ["a"]}}))
            .unwrap_err();
        assert!(err.to_string().contains("tags"));
    }
}

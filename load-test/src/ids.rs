//! Identifiers handed out by the services under test.
use std::fmt;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
/// An id as returned by a service: numeric ids stay numbers when sent back.
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// reads an id from a json value, null, floats and empty strings are not ids
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(EntityId::Number),
            Value::String(s) if !s.trim().is_empty() => Some(EntityId::Text(s.trim().to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_numbers_and_strings() {
        assert_eq!(EntityId::from_json(&json!(12)), Some(EntityId::Number(12)));
        assert_eq!(
            EntityId::from_json(&json!(" a-1 ")),
            Some(EntityId::Text("a-1".to_string()))
        );
        assert_eq!(EntityId::from_json(&json!(null)), None);
        assert_eq!(EntityId::from_json(&json!("")), None);
        assert_eq!(EntityId::from_json(&json!(1.5)), None);
        assert_eq!(EntityId::from_json(&json!({"id": 1})), None);
    }

    #[test]
    fn keeps_json_shape() {
        assert_eq!(json!(EntityId::Number(3)), json!(3));
        assert_eq!(json!(EntityId::Text("x".into())), json!("x"));
        assert_eq!(EntityId::Text("sku-9".into()).to_string(), "sku-9");
    }
}

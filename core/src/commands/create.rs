use std::sync::Arc;

use serde_json::{Value, json};

use super::fragments;
use crate::QuerySchema;
use crate::error::Result;

pub const TS_CREATE: &str = "TS.CREATE";

/// `TS.CREATE key [RETENTION retentionTime] [UNCOMPRESSED] [LABELS field value..]`
pub fn create() -> Result<QuerySchema> {
    let mut schema = QuerySchema::create(TS_CREATE)?;
    schema
        .merge_data(json!({ "executable": true }))?
        .set_method_name("create")?
        .add_param_with("key", is_key)?
        .add_subquery(Arc::new(fragments::retention()?), false)?
        .add_subquery(Arc::new(fragments::uncompressed()?), false)?
        .add_subquery(Arc::new(fragments::labels()?), false)?;
    Ok(schema)
}

fn is_key(_schema: &QuerySchema, value: &Value) -> bool {
    value.as_str().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_shape() {
        let schema = create().unwrap();
        assert_eq!(schema.command(), "TS.CREATE");
        assert_eq!(schema.method_name(), "create");
        assert_eq!(schema.data()["executable"], true);
        assert_eq!(
            schema.template_string(),
            "TS.CREATE key [RETENTION retentionTime] [UNCOMPRESSED] [LABELS field value..]"
        );
        assert!(schema.subqueries().iter().all(|sub| !sub.is_required()));
    }

    #[test]
    fn test_create_collects_fragment_exports() {
        let schema = create().unwrap();
        let keys: Vec<&str> = schema.exports().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3);
        for key in ["retention", "uncompressed", "labels"] {
            assert!(keys.contains(&key), "missing export {key}");
        }
    }

    #[test]
    fn test_create_key_validation_and_serialization() {
        let schema = create().unwrap();
        assert_eq!(schema.check_param("key", &json!("temp:1")), Some(true));
        assert_eq!(schema.check_param("key", &json!(1)), Some(false));
        assert_eq!(schema.check_param("key", &Value::Null), Some(false));
        assert_eq!(schema.to_command(&[json!("key1")]), "TS.CREATE key1");
    }
}

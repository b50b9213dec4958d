//! Serializable snapshots of query schemas.
//!
//! Validators and serializers are functions and cannot round-trip, so a
//! [`SchemaDescriptor`] keeps only the declarative parts of a schema. It is
//! what the CLI prints for `describe`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::QuerySchema;

/// Declarative view of a [`QuerySchema`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use query_schema_core::QuerySchema;
///
/// let mut schema = QuerySchema::create("CMD").unwrap();
/// schema
///     .add_param("key").unwrap()
///     .add_subquery(Arc::new(QuerySchema::create("OPT").unwrap()), false).unwrap();
///
/// let descriptor = schema.describe();
/// assert_eq!(descriptor.template, "CMD key [OPT]");
/// assert_eq!(descriptor.params, vec!["key"]);
/// assert!(!descriptor.subqueries[0].required);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    /// Command keyword (e.g. "TS.CREATE").
    pub command: String,
    /// Human-facing method name.
    pub method_name: String,
    /// Rendered template string.
    pub template: String,
    /// Param names in positional order.
    pub params: Vec<String>,
    /// Nested schemas in attach order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subqueries: Vec<SubqueryDescriptor>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    /// Exported fields, including those merged from subqueries.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub exports: Map<String, Value>,
}

/// A nested schema together with its `required` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubqueryDescriptor {
    pub required: bool,
    pub schema: SchemaDescriptor,
}

impl SchemaDescriptor {
    pub(crate) fn from_schema(schema: &QuerySchema) -> Self {
        Self {
            command: schema.command().to_string(),
            method_name: schema.method_name().to_string(),
            template: schema.template_string(),
            params: schema
                .params()
                .iter()
                .map(|param| param.name().to_string())
                .collect(),
            subqueries: schema
                .subqueries()
                .iter()
                .map(|sub| SubqueryDescriptor {
                    required: sub.is_required(),
                    schema: Self::from_schema(sub.schema()),
                })
                .collect(),
            data: schema.data().clone(),
            exports: schema.exports().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_descriptor_captures_nested_shape() {
        let mut child = QuerySchema::create("RETENTION").unwrap();
        child
            .add_param("retentionTime")
            .unwrap()
            .merge_exports(json!({ "retention": "RETENTION" }))
            .unwrap();

        let mut parent = QuerySchema::create("TS.CREATE").unwrap();
        parent
            .merge_data(json!({ "executable": true }))
            .unwrap()
            .add_param("key")
            .unwrap()
            .add_subquery(Arc::new(child), true)
            .unwrap();

        let descriptor = parent.describe();
        assert_eq!(descriptor.method_name, "ts.create");
        assert_eq!(descriptor.template, "TS.CREATE key RETENTION retentionTime");
        assert_eq!(descriptor.data["executable"], true);
        assert_eq!(descriptor.exports["retention"], "RETENTION");

        let sub = &descriptor.subqueries[0];
        assert!(sub.required);
        assert_eq!(sub.schema.params, vec!["retentionTime"]);
        assert!(sub.schema.data.is_empty());
    }

    #[test]
    fn test_descriptor_json_skips_empty_collections() {
        let schema = QuerySchema::create("PING").unwrap();
        let value = serde_json::to_value(schema.describe()).unwrap();

        assert_eq!(
            value,
            json!({
                "command": "PING",
                "method_name": "ping",
                "template": "PING",
                "params": [],
            })
        );

        let back: SchemaDescriptor = serde_json::from_value(value).unwrap();
        assert_eq!(back, schema.describe());
    }
}

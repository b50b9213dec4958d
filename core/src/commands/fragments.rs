//! Optional sub-command shapes shared by the `TS.*` command family.

use serde_json::json;

use crate::error::Result;
use crate::{QuerySchema, validators};

/// `RETENTION retentionTime`, with the retention period in milliseconds.
pub fn retention() -> Result<QuerySchema> {
    let mut schema = QuerySchema::create("RETENTION")?;
    schema
        .add_param_with("retentionTime", validators::is_non_negative_integer)?
        .merge_exports(json!({ "retention": "RETENTION" }))?;
    Ok(schema)
}

/// `UNCOMPRESSED`, a bare flag.
pub fn uncompressed() -> Result<QuerySchema> {
    let mut schema = QuerySchema::create("UNCOMPRESSED")?;
    schema.merge_exports(json!({ "uncompressed": "UNCOMPRESSED" }))?;
    Ok(schema)
}

/// `LABELS field value..`
pub fn labels() -> Result<QuerySchema> {
    let mut schema = QuerySchema::create("LABELS")?;
    schema
        .add_param_with("field", validators::is_string)?
        .add_param_with("value..", validators::is_string)?
        .merge_exports(json!({ "labels": "LABELS" }))?;
    Ok(schema)
}

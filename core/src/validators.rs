//! Reusable param validators.
//!
//! Each function has the validator shape `(schema, value) -> bool` and can be
//! passed straight to [`QuerySchema::add_param_with`].
//!
//! ```
//! use query_schema_core::{QuerySchema, validators};
//! use serde_json::json;
//!
//! let mut schema = QuerySchema::create("RETENTION").unwrap();
//! schema.add_param_with("retentionTime", validators::is_non_negative_integer).unwrap();
//!
//! assert_eq!(schema.check_param("retentionTime", &json!(60000)), Some(true));
//! assert_eq!(schema.check_param("retentionTime", &json!(-1)), Some(false));
//! ```

use serde_json::Value;

use crate::QuerySchema;

/// Accepts anything except `null`.
pub fn is_defined(_schema: &QuerySchema, value: &Value) -> bool {
    !value.is_null()
}

pub fn is_string(_schema: &QuerySchema, value: &Value) -> bool {
    value.is_string()
}

pub fn is_number(_schema: &QuerySchema, value: &Value) -> bool {
    value.is_number()
}

/// Accepts whole numbers, including floats with no fractional part.
pub fn is_integer(_schema: &QuerySchema, value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
        _ => false,
    }
}

pub fn is_non_negative_integer(schema: &QuerySchema, value: &Value) -> bool {
    is_integer(schema, value) && value.as_f64().is_some_and(|f| f >= 0.0)
}

pub fn is_boolean(_schema: &QuerySchema, value: &Value) -> bool {
    value.is_boolean()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> QuerySchema {
        QuerySchema::create("TEST").unwrap()
    }

    #[test]
    fn test_is_defined() {
        let s = schema();
        assert!(is_defined(&s, &json!("")));
        assert!(is_defined(&s, &json!(0)));
        assert!(!is_defined(&s, &Value::Null));
    }

    #[test]
    fn test_is_string_and_number() {
        let s = schema();
        assert!(is_string(&s, &json!("key")));
        assert!(!is_string(&s, &json!(1)));
        assert!(is_number(&s, &json!(1.5)));
        assert!(!is_number(&s, &json!("1")));
        assert!(is_boolean(&s, &json!(false)));
        assert!(!is_boolean(&s, &json!("true")));
    }

    #[test]
    fn test_integers() {
        let s = schema();
        assert!(is_integer(&s, &json!(-3)));
        assert!(is_integer(&s, &json!(4.0)));
        assert!(!is_integer(&s, &json!(4.5)));
        assert!(!is_integer(&s, &json!("4")));

        assert!(is_non_negative_integer(&s, &json!(0)));
        assert!(is_non_negative_integer(&s, &json!(u64::MAX)));
        assert!(!is_non_negative_integer(&s, &json!(-1)));
        assert!(!is_non_negative_integer(&s, &json!(1.25)));
    }
}

//! Built-in command definitions.
//!
//! Each definition is plain configuration data: a command keyword, its
//! params with validators, and the fragments it embeds.

mod create;
pub mod fragments;

pub use create::{TS_CREATE, create};

use crate::QuerySchema;
use crate::error::Result;

/// Every built-in definition, in a stable order.
pub fn all() -> Result<Vec<QuerySchema>> {
    Ok(vec![create()?])
}

/// Looks a definition up by command keyword (case-insensitive) or method
/// name.
///
/// # Examples
///
/// ```
/// use query_schema_core::commands;
///
/// let by_command = commands::find("ts.create").unwrap().unwrap();
/// let by_method = commands::find("create").unwrap().unwrap();
/// assert_eq!(by_command.command(), by_method.command());
/// assert!(commands::find("TS.NOPE").unwrap().is_none());
/// ```
pub fn find(name: &str) -> Result<Option<QuerySchema>> {
    Ok(all()?.into_iter().find(|schema| {
        schema.command().eq_ignore_ascii_case(name) || schema.method_name() == name
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_all_definitions_have_unique_method_names() {
        let schemas = all().unwrap();
        let mut seen = HashSet::new();
        for schema in &schemas {
            assert!(seen.insert(schema.method_name().to_string()));
        }
    }

    #[test]
    fn test_find_by_method_name() {
        let schema = find("create").unwrap().unwrap();
        assert_eq!(schema.command(), TS_CREATE);
    }
}

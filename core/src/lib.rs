//! Declarative schemas for composable store commands.
//!
//! A [`QuerySchema`] describes how one command is shaped and serialized:
//!
//! - a command keyword and a derived method name,
//! - ordered positional params, each with a [`Validator`],
//! - nested subqueries (themselves full schemas) marked required or optional,
//! - free-form metadata ([`QuerySchema::data`]) and exported fields
//!   ([`QuerySchema::exports`]) that bubble up from subqueries when attached,
//! - a [`Serializer`] producing the final command string.
//!
//! The crate performs no I/O and executes nothing. Command definitions such
//! as [`commands::create()`] are plain configuration built on top of the
//! schema.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use query_schema_core::*;
//! use serde_json::json;
//!
//! let mut sub = QuerySchema::create("SUB")?;
//! sub.add_param("x")?.merge_exports(json!({ "foo": 1 }))?;
//! let mut opt = QuerySchema::create("OPT")?;
//! opt.add_param("y")?;
//!
//! let mut schema = QuerySchema::create("CMD")?;
//! schema
//!     .add_param("a")?
//!     .add_param("b")?
//!     .add_subquery(Arc::new(sub), true)?
//!     .add_subquery(Arc::new(opt), false)?;
//!
//! assert_eq!(schema.template_string(), "CMD a b SUB x [OPT y]");
//! assert_eq!(schema.exports()["foo"], 1);
//! # Ok::<(), SchemaError>(())
//! ```

pub mod commands;
mod descriptor;
mod error;
mod schema;
pub mod validators;

pub use descriptor::{SchemaDescriptor, SubqueryDescriptor};
pub use error::{Result, SchemaError};
pub use schema::{
    ParamSpec, QuerySchema, Serializer, Subquery, Validator, default_serializer, render_value,
};

//! Error types for schema construction.
//!
//! Every builder call validates its argument before touching the schema, so
//! an `Err` always leaves the schema exactly as it was.

use thiserror::Error;

/// Errors raised while configuring a [`QuerySchema`](crate::QuerySchema).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A builder call received a missing, empty, or wrong-shaped argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SchemaError {
    pub(crate) fn invalid(reason: &str) -> Self {
        Self::InvalidArgument(reason.to_string())
    }
}

/// Convenience alias for results with [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;

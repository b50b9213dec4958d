//! The query schema builder.
//!
//! A [`QuerySchema`] describes one command's shape: its name, ordered
//! positional params, nested subqueries, free-form metadata, exported fields,
//! and the function that turns argument values into the final command string.
//!
//! Builder calls take `&mut self` and return `Result<&mut Self>`, so a schema
//! is configured with a `?`-chain and a rejected call leaves it untouched.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use query_schema_core::{QuerySchema, validators};
//! use serde_json::json;
//!
//! let mut retention = QuerySchema::create("RETENTION")?;
//! retention
//!     .add_param_with("retentionTime", validators::is_non_negative_integer)?
//!     .merge_exports(json!({ "retention": "RETENTION" }))?;
//!
//! let mut create = QuerySchema::create("TS.CREATE")?;
//! create
//!     .merge_data(json!({ "executable": true }))?
//!     .set_method_name("create")?
//!     .add_param_with("key", validators::is_string)?
//!     .add_subquery(Arc::new(retention), false)?;
//!
//! assert_eq!(create.template_string(), "TS.CREATE key [RETENTION retentionTime]");
//! assert_eq!(create.exports()["retention"], "RETENTION");
//! assert_eq!(create.to_command(&[json!("temp:1")]), "TS.CREATE temp:1");
//! # Ok::<(), query_schema_core::SchemaError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::descriptor::SchemaDescriptor;
use crate::error::{Result, SchemaError};

const SEPARATOR: &str = " ";

/// Predicate deciding whether a value is acceptable for a param.
///
/// The schema owning the param is passed as the first argument so the
/// predicate can consult other schema state.
pub type Validator = Arc<dyn Fn(&QuerySchema, &Value) -> bool + Send + Sync>;

/// Function producing the final command string from the command name and
/// the argument values, in order.
pub type Serializer = Arc<dyn Fn(&QuerySchema, &str, &[Value]) -> String + Send + Sync>;

/// A positional parameter: a name plus its validator.
#[derive(Clone)]
pub struct ParamSpec {
    name: String,
    validation: Validator,
}

impl ParamSpec {
    /// Param name as it appears in the template string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validator installed for this param.
    pub fn validation(&self) -> &Validator {
        &self.validation
    }

    /// Runs the validator against `value` with `schema` as context.
    pub fn accepts(&self, schema: &QuerySchema, value: &Value) -> bool {
        (self.validation)(schema, value)
    }
}

impl fmt::Debug for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A nested schema attached to a parent, optional unless marked required.
#[derive(Debug, Clone)]
pub struct Subquery {
    schema: Arc<QuerySchema>,
    required: bool,
}

impl Subquery {
    /// The nested schema.
    pub fn schema(&self) -> &Arc<QuerySchema> {
        &self.schema
    }

    /// Whether the parent template renders this subquery without brackets.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Declarative description of one command.
#[derive(Clone)]
pub struct QuerySchema {
    command: String,
    method_name: String,
    params: Vec<ParamSpec>,
    subqueries: Vec<Subquery>,
    data: Map<String, Value>,
    exports: Map<String, Value>,
    serializer: Serializer,
}

impl QuerySchema {
    /// Creates a schema for `command`.
    ///
    /// The method name defaults to the lowercased command.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if `command` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_schema_core::QuerySchema;
    ///
    /// let schema = QuerySchema::create("TS.CREATE").unwrap();
    /// assert_eq!(schema.command(), "TS.CREATE");
    /// assert_eq!(schema.method_name(), "ts.create");
    ///
    /// assert!(QuerySchema::create("").is_err());
    /// ```
    pub fn create(command: impl Into<String>) -> Result<Self> {
        let command = command.into();
        if command.is_empty() {
            return Err(SchemaError::invalid("command is required to create a query"));
        }

        Ok(Self {
            method_name: command.to_lowercase(),
            command,
            params: Vec::new(),
            subqueries: Vec::new(),
            data: Map::new(),
            exports: Map::new(),
            serializer: Arc::new(default_serializer),
        })
    }

    /// Overrides the derived method name. Spaces become underscores.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if `name` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_schema_core::QuerySchema;
    ///
    /// let mut schema = QuerySchema::create("X").unwrap();
    /// schema.set_method_name("a b").unwrap();
    /// assert_eq!(schema.method_name(), "a_b");
    /// ```
    pub fn set_method_name(&mut self, name: &str) -> Result<&mut Self> {
        if name.is_empty() {
            return Err(SchemaError::invalid("method name is required"));
        }
        self.method_name = name.replace(SEPARATOR, "_");
        Ok(self)
    }

    /// Merges `fields` into the metadata map. Existing keys are overwritten,
    /// never removed.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] unless `fields` is a JSON
    /// object.
    pub fn merge_data(&mut self, fields: Value) -> Result<&mut Self> {
        let Value::Object(fields) = fields else {
            return Err(SchemaError::invalid("data should be an object"));
        };
        self.data.extend(fields);
        Ok(self)
    }

    /// Merges `fields` into the exports map.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] unless `fields` is a JSON
    /// object.
    pub fn merge_exports(&mut self, fields: Value) -> Result<&mut Self> {
        let Value::Object(fields) = fields else {
            return Err(SchemaError::invalid("exported data should be an object"));
        };
        self.exports.extend(fields);
        Ok(self)
    }

    /// Appends a positional param that accepts any value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if `name` is empty.
    pub fn add_param(&mut self, name: &str) -> Result<&mut Self> {
        self.add_param_with(name, |_: &QuerySchema, _: &Value| true)
    }

    /// Appends a positional param checked by `validation`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if `name` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_schema_core::QuerySchema;
    /// use serde_json::json;
    ///
    /// let mut schema = QuerySchema::create("CMD").unwrap();
    /// schema
    ///     .add_param("key").unwrap()
    ///     .add_param_with("count", |_, v| v.as_f64().is_some_and(|n| n > 0.0)).unwrap();
    ///
    /// let count = &schema.params()[1];
    /// assert!(count.accepts(&schema, &json!(3)));
    /// assert!(!count.accepts(&schema, &json!(0)));
    /// ```
    pub fn add_param_with<F>(&mut self, name: &str, validation: F) -> Result<&mut Self>
    where
        F: Fn(&QuerySchema, &Value) -> bool + Send + Sync + 'static,
    {
        if name.is_empty() {
            return Err(SchemaError::invalid("param name is required"));
        }

        trace!(command = %self.command, param = name, "appending param");
        self.params.push(ParamSpec {
            name: name.to_string(),
            validation: Arc::new(validation),
        });
        Ok(self)
    }

    /// Attaches a nested schema and merges its current exports into this
    /// schema's exports.
    ///
    /// The merge is a snapshot: exports added to `schema` afterwards are not
    /// seen by the parent. `required` only changes template decoration.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidArgument`] if `schema` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use query_schema_core::QuerySchema;
    ///
    /// let mut parent = QuerySchema::create("CMD").unwrap();
    /// parent.add_subquery(Arc::new(QuerySchema::create("SUB").unwrap()), true).unwrap();
    /// assert_eq!(parent.template_string(), "CMD SUB");
    ///
    /// assert!(parent.add_subquery(None, false).is_err());
    /// ```
    pub fn add_subquery(
        &mut self,
        schema: impl Into<Option<Arc<QuerySchema>>>,
        required: bool,
    ) -> Result<&mut Self> {
        let schema: Option<Arc<QuerySchema>> = schema.into();
        let Some(schema) = schema else {
            return Err(SchemaError::invalid("subquery is required"));
        };

        debug!(
            command = %self.command,
            subquery = %schema.command,
            required,
            exported = schema.exports.len(),
            "attaching subquery"
        );
        self.exports
            .extend(schema.exports.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.subqueries.push(Subquery { schema, required });
        Ok(self)
    }

    /// Replaces the serializer. The last call wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_schema_core::QuerySchema;
    /// use serde_json::json;
    ///
    /// let mut schema = QuerySchema::create("PING").unwrap();
    /// schema.set_serializer(|_, command, args| format!("{command}({})", args.len()));
    /// assert_eq!(schema.to_command(&[json!(1), json!(2)]), "PING(2)");
    /// ```
    pub fn set_serializer<F>(&mut self, serializer: F) -> &mut Self
    where
        F: Fn(&QuerySchema, &str, &[Value]) -> String + Send + Sync + 'static,
    {
        debug!(command = %self.command, "replacing serializer");
        self.serializer = Arc::new(serializer);
        self
    }

    /// Renders the human-readable shape of the command.
    ///
    /// Command, param names, then subquery templates, space separated.
    /// Optional subqueries are wrapped in brackets.
    pub fn template_string(&self) -> String {
        let mut template = self.command.clone();

        let params: Vec<&str> = self.params.iter().map(ParamSpec::name).collect();
        if !params.is_empty() {
            template.push_str(SEPARATOR);
            template.push_str(&params.join(SEPARATOR));
        }

        let subqueries: Vec<String> = self
            .subqueries
            .iter()
            .map(|sub| {
                if sub.required {
                    sub.schema.template_string()
                } else {
                    format!("[{}]", sub.schema.template_string())
                }
            })
            .collect();
        if !subqueries.is_empty() {
            template.push_str(SEPARATOR);
            template.push_str(&subqueries.join(SEPARATOR));
        }

        template
    }

    /// Serializes `args` with the current serializer and this schema's
    /// command.
    pub fn to_command(&self, args: &[Value]) -> String {
        (self.serializer)(self, &self.command, args)
    }

    /// Runs the validator of the param called `name`.
    ///
    /// Returns `None` when the schema has no such param.
    pub fn check_param(&self, name: &str, value: &Value) -> Option<bool> {
        self.params
            .iter()
            .find(|param| param.name == name)
            .map(|param| param.accepts(self, value))
    }

    /// Serializable snapshot of this schema and its subqueries.
    pub fn describe(&self) -> SchemaDescriptor {
        SchemaDescriptor::from_schema(self)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn subqueries(&self) -> &[Subquery] {
        &self.subqueries
    }

    pub fn exports(&self) -> &Map<String, Value> {
        &self.exports
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }
}

impl fmt::Debug for QuerySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySchema")
            .field("command", &self.command)
            .field("method_name", &self.method_name)
            .field("params", &self.params)
            .field("subqueries", &self.subqueries)
            .field("data", &self.data)
            .field("exports", &self.exports)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for QuerySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template_string())
    }
}

/// Joins the command and the rendered args with single spaces.
///
/// # Examples
///
/// ```
/// use query_schema_core::{QuerySchema, default_serializer};
/// use serde_json::json;
///
/// let schema = QuerySchema::create("TS.CREATE").unwrap();
/// assert_eq!(default_serializer(&schema, "TS.CREATE", &[json!("key1")]), "TS.CREATE key1");
/// ```
pub fn default_serializer(_schema: &QuerySchema, command: &str, args: &[Value]) -> String {
    std::iter::once(command.to_string())
        .chain(args.iter().map(render_value))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Renders one argument value as a command token.
///
/// Strings are emitted verbatim, `null` as the empty string, arrays as their
/// rendered elements joined by `,`, and everything else as JSON text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

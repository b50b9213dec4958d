use clap::{Args, Parser, Subcommand};
use query_schema_core::{QuerySchema, commands};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for `describe`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "query-schema")]
#[command(about = "Inspect built-in command schemas without executing anything")]
struct Cli {
    /// Log builder activity at debug level (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every built-in command with its template string.
    List,
    /// Print the shape of one command.
    Describe(DescribeArgs),
    /// Validate positional arguments and print the serialized command.
    Serialize(SerializeArgs),
}

#[derive(Debug, Args)]
struct DescribeArgs {
    /// Command keyword (e.g. TS.CREATE) or method name (e.g. create).
    name: String,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct SerializeArgs {
    /// Command keyword or method name.
    name: String,
    /// Argument values. Each is parsed as JSON when possible, otherwise
    /// taken as a plain string.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::List => run_list(),
        Command::Describe(args) => run_describe(args),
        Command::Serialize(args) => run_serialize(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_list() -> Result<(), String> {
    let schemas = commands::all().map_err(|e| format!("Failed to build definitions: {e}"))?;
    for schema in schemas {
        println!("{}\t{}", schema.method_name(), schema.template_string());
    }
    Ok(())
}

fn run_describe(args: DescribeArgs) -> Result<(), String> {
    let schema = lookup(&args.name)?;
    let descriptor = schema.describe();

    let rendered = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&descriptor)
            .map_err(|e| format!("Failed to serialize descriptor: {e}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&descriptor)
            .map_err(|e| format!("Failed to serialize descriptor: {e}"))?,
        CliOutputFormat::Text => descriptor.template,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn run_serialize(args: SerializeArgs) -> Result<(), String> {
    let schema = lookup(&args.name)?;
    let values: Vec<Value> = args.args.iter().map(|raw| parse_arg(raw)).collect();

    check_positional(&schema, &values)?;
    println!("{}", schema.to_command(&values));
    Ok(())
}

fn lookup(name: &str) -> Result<QuerySchema, String> {
    commands::find(name)
        .map_err(|e| format!("Failed to build definitions: {e}"))?
        .ok_or_else(|| format!("Unknown command '{name}'"))
}

/// Checks the leading values against the schema's params, in order.
///
/// Values past the last param are passed through untouched; they belong to
/// subqueries, which the schema does not validate.
fn check_positional(schema: &QuerySchema, values: &[Value]) -> Result<(), String> {
    for (index, param) in schema.params().iter().enumerate() {
        let Some(value) = values.get(index) else {
            return Err(format!("Missing value for param '{}'", param.name()));
        };
        debug!(param = param.name(), %value, "checking argument");
        if !param.accepts(schema, value) {
            return Err(format!(
                "Value {value} rejected by param '{}' of {}",
                param.name(),
                schema.command()
            ));
        }
    }
    Ok(())
}

fn parse_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_arg_prefers_json() {
        assert_eq!(parse_arg("60000"), json!(60000));
        assert_eq!(parse_arg("\"quoted\""), json!("quoted"));
        assert_eq!(parse_arg("temp:1"), json!("temp:1"));
        assert_eq!(parse_arg("RETENTION"), json!("RETENTION"));
    }

    #[test]
    fn test_check_positional_reports_missing_and_rejected() {
        let schema = commands::create().unwrap();

        assert_eq!(
            check_positional(&schema, &[]),
            Err("Missing value for param 'key'".to_string())
        );
        assert!(check_positional(&schema, &[json!(5)]).is_err());
        assert!(check_positional(&schema, &[json!("k"), json!("RETENTION"), json!(10)]).is_ok());
    }
}

pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// What a command produced, with any computation envelope unwrapped.
pub(crate) enum Shape<'a> {
    /// Sweep or comparison table
    Rows(&'a [Value]),
    /// Single result record
    Record(&'a Map<String, Value>),
    Scalar(&'a Value),
}

pub(crate) fn shape(value: &Value) -> Shape<'_> {
    let payload = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    match payload {
        Value::Array(rows) => Shape::Rows(rows),
        Value::Object(map) => Shape::Record(map),
        other => Shape::Scalar(other),
    }
}

/// Warnings recorded in a computation envelope.
pub(crate) fn warnings(value: &Value) -> Vec<&str> {
    value
        .get("warnings")
        .and_then(Value::as_array)
        .map(|ws| ws.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Column headers taken from the first row.
pub(crate) fn headers(rows: &[Value]) -> Vec<String> {
    rows.first()
        .and_then(Value::as_object)
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default()
}

pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

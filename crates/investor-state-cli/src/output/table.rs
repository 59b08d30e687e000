use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cell_text, headers, shape, warnings, Shape};

/// Format output as a table using the tabled crate, followed by any
/// warnings and the methodology line from the envelope.
pub fn print_table(value: &Value) {
    match shape(value) {
        Shape::Rows(rows) if rows.is_empty() => println!("(no rows)"),
        Shape::Rows(rows) => {
            let columns = headers(rows);
            let mut builder = Builder::default();
            builder.push_record(columns.clone());
            for row in rows {
                builder.push_record(
                    columns
                        .iter()
                        .map(|c| row.get(c).map(cell_text).unwrap_or_default()),
                );
            }
            println!("{}", Table::from(builder));
        }
        Shape::Record(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                builder.push_record([key.clone(), cell_text(val)]);
            }
            println!("{}", Table::from(builder));
        }
        Shape::Scalar(v) => println!("{}", cell_text(v)),
    }

    let warnings = warnings(value);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in warnings {
            println!("  - {}", w);
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

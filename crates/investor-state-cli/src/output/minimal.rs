use serde_json::Value;

use super::{cell_text, shape, Shape};

/// Headline fields, most specific first.
const HEADLINE_KEYS: [&str; 4] = ["lroma", "fmip", "breakeven_points", "base_lroma"];

/// Print just the headline number: the first headline field of a record,
/// or one `parameter=value: metric` line per table row.
pub fn print_minimal(value: &Value) {
    match shape(value) {
        Shape::Record(map) => {
            for key in HEADLINE_KEYS {
                if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                    println!("{}", headline(val));
                    return;
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, cell_text(val));
            }
        }
        Shape::Rows(rows) => {
            for row in rows {
                let label = match (row.get("parameter"), row.get("value")) {
                    (Some(p), Some(v)) => format!("{}={}", cell_text(p), cell_text(v)),
                    _ => row.get("scenario").map(cell_text).unwrap_or_default(),
                };
                let metric = HEADLINE_KEYS
                    .iter()
                    .find_map(|k| row.get(*k))
                    .map(cell_text)
                    .unwrap_or_default();
                println!("{}: {}", label, metric);
            }
        }
        Shape::Scalar(v) => println!("{}", cell_text(v)),
    }
}

fn headline(value: &Value) -> String {
    match value {
        // Breakeven points: show the estimated freight rate, or note that
        // the target is already met
        Value::Object(points) => points
            .get("freight_rate")
            .map(cell_text)
            .unwrap_or_else(|| "target met".to_string()),
        other => cell_text(other),
    }
}

use serde_json::Value;
use std::io;

use super::{cell_text, headers, shape, Shape};

/// Write output as CSV to stdout: one line per row for tables, otherwise
/// `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match shape(value) {
        Shape::Rows(rows) => {
            let columns = headers(rows);
            if !columns.is_empty() {
                let _ = wtr.write_record(&columns);
            }
            for row in rows {
                let record: Vec<String> = columns
                    .iter()
                    .map(|c| row.get(c).map(cell_text).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&record);
            }
        }
        Shape::Record(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &cell_text(val)]);
            }
        }
        Shape::Scalar(v) => {
            let _ = wtr.write_record([&cell_text(v)]);
        }
    }

    let _ = wtr.flush();
}

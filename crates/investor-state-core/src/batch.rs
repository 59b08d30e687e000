use tracing::warn;

use crate::InvestorStateResult;

/// Split per-row outcomes into the rows that computed and one warning per
/// row that did not.
///
/// Batch entry points evaluate every point independently and never abort
/// on a single failure. Each failure is logged at warn level and returned
/// as a message so callers can surface it in the output envelope.
pub fn partition_rows<T, I>(operation: &str, outcomes: I) -> (Vec<T>, Vec<String>)
where
    I: IntoIterator<Item = (String, InvestorStateResult<T>)>,
{
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (label, outcome) in outcomes {
        match outcome {
            Ok(row) => rows.push(row),
            Err(e) => {
                warn!(operation, point = %label, error = %e, "skipping row");
                warnings.push(format!("Could not calculate {operation} for {label}: {e}"));
            }
        }
    }

    (rows, warnings)
}

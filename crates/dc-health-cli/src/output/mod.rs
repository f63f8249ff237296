pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use chrono::NaiveDate;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to serialise output: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The result object inside the envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// First day of a daily revenue series, from `start_date` or `found_date`.
pub(crate) fn series_start(result: &serde_json::Map<String, Value>) -> Option<NaiveDate> {
    ["start_date", "found_date"]
        .iter()
        .filter_map(|k| result.get(*k).and_then(Value::as_str))
        .find_map(|s| s.parse().ok())
}

/// Day count of a reached payback, if any.
pub(crate) fn payback_days(result: &serde_json::Map<String, Value>) -> Option<u64> {
    if let Some(days) = result.get("payback_days").and_then(Value::as_u64) {
        return Some(days);
    }
    result
        .get("payback")
        .and_then(|p| p.get("days"))
        .and_then(Value::as_u64)
}

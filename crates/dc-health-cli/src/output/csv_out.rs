use serde_json::{Map, Value};
use std::io;

use super::{payback_days, result_of, series_start};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(result) => {
            if let Some(Value::Array(series)) = result.get("cumulative_revenue") {
                write_series_csv(&mut wtr, series, result);
            } else if let Some(Value::Array(rows)) = ["points", "months", "sites"]
                .iter()
                .find_map(|k| result.get(*k))
            {
                write_array_csv(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in result {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        other => {
            let _ = wtr.write_record([&format_csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

/// One row per day: the crossover chart data.
fn write_series_csv(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    series: &[Value],
    result: &Map<String, Value>,
) {
    let Some(start) = series_start(result) else {
        return;
    };
    let cost = result
        .get("repair_cost_usd")
        .map(format_csv_value)
        .unwrap_or_default();
    let payback = payback_days(result);

    let _ = wtr.write_record(["day", "date", "cumulative_revenue", "repair_cost_usd", "paid_back"]);
    for (date, (idx, cum)) in start.iter_days().zip(series.iter().enumerate()) {
        let day = idx as u64 + 1;
        let paid_back = payback.is_some_and(|p| day >= p);
        let _ = wtr.write_record([
            day.to_string(),
            date.to_string(),
            format_csv_value(cum),
            cost.clone(),
            paid_back.to_string(),
        ]);
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Object(map) => match map.get("days") {
            Some(days) => days.to_string(),
            None => map
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
        Value::Array(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

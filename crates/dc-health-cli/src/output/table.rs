use chrono::Datelike;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{payback_days, result_of, series_start};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let result = result_of(value);
    match result {
        Value::Object(map) => print_result_table(map),
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", result),
    }

    let Some(envelope) = value.as_object() else {
        return;
    };
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_result_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if val.is_array() {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));

    for (key, val) in map {
        let Value::Array(arr) = val else { continue };
        if key == "cumulative_revenue" {
            print_series_summary(arr, map);
        } else if !arr.is_empty() {
            println!("\n{}:", key);
            print_array_table(arr);
        }
    }
}

/// Daily series are long; show month starts, the payback day and the last day.
fn print_series_summary(series: &[Value], result: &Map<String, Value>) {
    let Some(start) = series_start(result) else {
        return;
    };
    let payback = payback_days(result);

    let mut builder = Builder::default();
    builder.push_record(["Day", "Date", "Cumulative revenue", ""]);
    for (date, (idx, cum)) in start.iter_days().zip(series.iter().enumerate()) {
        let day = idx as u64 + 1;
        let is_payback = payback == Some(day);
        if day == 1 || date.day() == 1 || is_payback || idx + 1 == series.len() {
            builder.push_record([
                day.to_string(),
                date.to_string(),
                format_value(cum),
                if is_payback { "payback".into() } else { String::new() },
            ]);
        }
    }
    println!("\ncumulative_revenue:");
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(map) => format_object(map),
    }
}

/// Payback objects read better as "66 days" than as raw JSON.
fn format_object(map: &Map<String, Value>) -> String {
    match (map.get("status").and_then(Value::as_str), map.get("days")) {
        (Some("reached"), Some(days)) => format!("{} days", days),
        (Some("unreached"), _) => "unreached".to_string(),
        _ => serde_json::to_string(map).unwrap_or_default(),
    }
}

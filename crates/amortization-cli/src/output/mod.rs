pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter, rounding decimal strings to
/// `precision` places first when requested.
pub fn format_output(format: &OutputFormat, value: &Value, precision: Option<u32>) {
    let rounded;
    let value = match precision {
        Some(dp) => {
            rounded = round_decimals(value, dp);
            &rounded
        }
        None => value,
    };

    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Decimals travel as strings; round every string that parses as a
/// fractional decimal and leave everything else untouched.
pub fn round_decimals(value: &Value, dp: u32) -> Value {
    match value {
        Value::String(s) if s.contains('.') => match Decimal::from_str(s) {
            Ok(d) => Value::String(format!("{:.*}", dp as usize, d.round_dp(dp))),
            Err(_) => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(|v| round_decimals(v, dp)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), round_decimals(v, dp)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// A non-empty array whose first element is an object renders as rows.
fn as_record_array(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) if matches!(items.first(), Some(Value::Object(_))) => Some(items),
        _ => None,
    }
}

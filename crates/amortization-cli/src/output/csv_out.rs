use serde_json::{Map, Value};
use std::io;

use super::{as_record_array, scalar_text};

/// Write output as CSV to stdout.
///
/// A result carrying `rows` (schedules, chart series) is written as one
/// record per row; otherwise a two-column field,value listing. Nested
/// schedules (`compare --include-schedules`) follow the listing as record
/// blocks whose first column names the schedule.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());
    write_value(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_value<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) {
    match value {
        Value::Object(map) => {
            let result = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            match result.get("rows").and_then(as_record_array) {
                Some(rows) => write_records(wtr, None, rows),
                None => write_fields(wtr, result),
            }
        }
        Value::Array(arr) => write_records(wtr, None, arr),
        _ => {
            let _ = wtr.write_record([&scalar_text(value)]);
        }
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) {
    let mut blocks: Vec<(&str, &[Value])> = Vec::new();

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (field, v) in inner {
                    if let Some(rows) = as_record_array(v) {
                        blocks.push((key.as_str(), rows.as_slice()));
                        continue;
                    }
                    let _ = wtr.write_record([format!("{key}.{field}"), scalar_text(v)]);
                }
            }
            _ => {
                let _ = wtr.write_record([key.as_str(), &scalar_text(val)]);
            }
        }
    }

    for (label, rows) in blocks {
        write_records(wtr, Some(label), rows);
    }
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, label: Option<&str>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&scalar_text(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let prefix: Vec<String> = label.map(str::to_string).into_iter().collect();

    let header_row: Vec<&str> = label
        .map(|_| "schedule")
        .into_iter()
        .chain(headers.iter().copied())
        .collect();
    let _ = wtr.write_record(&header_row);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = prefix
                .iter()
                .cloned()
                .chain(
                    headers
                        .iter()
                        .map(|h| map.get(*h).map(scalar_text).unwrap_or_default()),
                )
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(&mut buf);
            write_value(&mut wtr, value);
            wtr.flush().unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_rows_become_records() {
        let text = render(&json!({"result": {"rows": [
            {"balance": "90", "month": 1},
            {"balance": "80", "month": 2},
        ]}}));
        assert_eq!(text, "balance,month\n90,1\n80,2\n");
    }

    #[test]
    fn test_nested_schedules_become_labelled_blocks() {
        let text = render(&json!({"result": {
            "metrics": {"months_saved": 7, "interest_saved": "12.5"},
            "baseline_schedule": {
                "final_month_count": 2,
                "rows": [{"balance": "50", "month": 1}, {"balance": "0", "month": 2}],
            },
            "prepayment_schedule": {
                "final_month_count": 1,
                "rows": [{"balance": "0", "month": 1}],
            },
        }}));

        assert!(!text.contains('{'), "schedule serialized as a blob:\n{text}");
        assert!(text.contains("baseline_schedule.final_month_count,2\n"));
        assert!(text.contains("metrics.months_saved,7\n"));
        assert!(text.contains("schedule,balance,month\nbaseline_schedule,50,1\nbaseline_schedule,0,2\n"));
        assert!(text.contains("schedule,balance,month\nprepayment_schedule,0,1\n"));
    }
}

use serde_json::Value;

use super::scalar_text;

/// Key answer fields, most specific first.
const PRIORITY_KEYS: [&str; 8] = [
    "interest_saved",
    "months_saved",
    "monthly_payment",
    "remaining_balance",
    "new_installment",
    "monthly_rate",
    "final_month_count",
    "with_prepayment_file",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields (also inside a nested `metrics`
/// object), then falls back to the first field of the result.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        let nested = map.get("metrics").and_then(Value::as_object);
        for key in PRIORITY_KEYS {
            let found = map
                .get(key)
                .or_else(|| nested.and_then(|m| m.get(key)));
            if let Some(val) = found.filter(|v| !v.is_null()) {
                println!("{}", scalar_text(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result_obj));
}

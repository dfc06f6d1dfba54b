//! Lenient JSON field access and currency handling.
//!
//! Upstream extractors disagree on key names and scalar types for the same
//! concept ("patient_info.name" vs "patientName", numbers vs "$1,234.00"
//! strings). These helpers take the first present key and coerce without
//! failing the document: a field that cannot be read contributes its default.

use serde_json::Value;

/// First non-empty string found at any of `keys`.
pub fn first_str(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    })
}

/// First monetary amount found at any of `keys`. Accepts JSON numbers and
/// currency strings; anything unreadable or negative contributes 0.0.
pub fn first_amount(value: &Value, keys: &[&str]) -> f64 {
    for key in keys {
        match value.get(key) {
            Some(Value::Number(n)) => {
                return n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0);
            }
            Some(Value::String(s)) => return parse_currency(s),
            _ => continue,
        }
    }
    0.0
}

/// String list at `key`: a JSON array keeps its string items, a scalar string
/// becomes a one-element list, anything else is empty.
pub fn str_list(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Descend a dotted path ("policy_info.insurance_company").
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// Render a scalar as display text: strings pass through trimmed, numbers are
/// stringified (vehicle years arrive both ways). Anything else is None.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a currency string ("$6,290.00", "1,234"). Failures and negatives
/// contribute 0.0, never an error, a negative sum term, or NaN.
pub fn parse_currency(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    let parsed = cleaned.parse::<f64>().unwrap_or(0.0);
    if parsed.is_finite() {
        parsed.max(0.0)
    } else {
        0.0
    }
}

/// "$6,290.00" style: two decimal places, thousands separators.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.max(0.0) * 100.0).round() as u64;
    format!("${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// "$100,000" style: whole dollars, used for policy limits.
pub fn format_dollars(amount: f64) -> String {
    format!("${}", group_thousands(amount.max(0.0).round() as u64))
}

/// "$100,000/300,000" style: per-person/per-accident declarations format.
pub fn format_limit_pair(per_person: f64, per_accident: f64) -> String {
    format!(
        "${}/{}",
        group_thousands(per_person.max(0.0).round() as u64),
        group_thousands(per_accident.max(0.0).round() as u64)
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

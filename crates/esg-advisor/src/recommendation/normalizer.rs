use super::profile::CompanyProfile;
use serde_json::{Map, Value};

/// Coerces an untrusted request body into a [`CompanyProfile`]. Never fails.
pub fn normalize(input: &Value) -> CompanyProfile {
    let empty = Map::new();
    let fields = input.as_object().unwrap_or(&empty);

    CompanyProfile {
        sector: string_field(fields, "sector"),
        size: string_field(fields, "size"),
        state: string_field(fields, "state"),
        udyam: string_field(fields, "udyam"),
        turnover_cr: fields.get("turnoverCr").and_then(coerce_turnover),
        compliance: fields
            .get("compliance")
            .map(coerce_compliance)
            .unwrap_or_default(),
    }
}

/// Splits a comma-separated compliance field as submitted by forms and CSV rows.
pub fn split_compliance(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn coerce_turnover(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        // Booleans, arrays and objects are not turnover figures, even when they hold one number.
        _ => None,
    };

    parsed.filter(|amount| amount.is_finite())
}

fn coerce_compliance(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

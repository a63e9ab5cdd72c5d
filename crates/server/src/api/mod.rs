use serde_json::{Map, Value};
use shared::{
    error::{ProcessError, StatusError},
    protocol::StatusChangeRequest,
    status::MachineStatus,
};

/// Extracts the value to process from a raw request body.
///
/// The body is read as JSON whatever its declared content type. A falsy
/// body counts as an empty object and a missing `value` as zero.
pub fn value_from_body(body: &[u8]) -> Result<f64, ProcessError> {
    let data: Value =
        serde_json::from_slice(body).map_err(|e| ProcessError::malformed_body(e.to_string()))?;

    let empty = Map::new();
    let fields = match &data {
        Value::Object(fields) => fields,
        other if is_falsy(other) => &empty,
        other => return Err(ProcessError::NotAnObject(json_type_name(other))),
    };

    match fields.get("value") {
        None => Ok(0.0),
        Some(value) => coerce_float(value),
    }
}

pub fn double_value(value: f64) -> f64 {
    value * 2.0
}

/// Reads the requested status from a status change body. Legacy names are
/// refused here; they are only understood when reading old logs.
pub fn status_from_body(body: &[u8]) -> Result<MachineStatus, StatusError> {
    let request: StatusChangeRequest = serde_json::from_slice(body)
        .map_err(|e| StatusError::MalformedBody(e.to_string()))?;
    MachineStatus::from_label(&request.status).ok_or(StatusError::UnknownStatus(request.status))
}

fn coerce_float(value: &Value) -> Result<f64, ProcessError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ProcessError::InvalidNumber(n.to_string())),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_float(s),
        other => Err(ProcessError::UnsupportedType(json_type_name(other))),
    }
}

/// Accepts surrounding whitespace, `inf`/`nan` spellings and `_` between
/// digits.
fn parse_float(raw: &str) -> Result<f64, ProcessError> {
    let trimmed = raw.trim();
    let invalid = || ProcessError::InvalidNumber(raw.to_string());

    let bytes = trimmed.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if !separators_ok {
        return Err(invalid());
    }

    trimmed.replace('_', "").parse::<f64>().map_err(|_| invalid())
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;

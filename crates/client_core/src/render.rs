//! Turns a settled processing call into the text shown to the user.
//!
//! The payload is read loosely: `ok` and `error` are judged by truthiness and
//! any JSON value is accepted as `result`.

use serde_json::{Number, Value};

use crate::error::TransportError;

pub const PENDING_STATUS: &str = "Kjører...";
pub const RESULT_PREFIX: &str = "Resultat: ";
pub const ERROR_PREFIX: &str = "Feil: ";
pub const NETWORK_ERROR_PREFIX: &str = "Nettverksfeil: ";
pub const UNKNOWN_ERROR: &str = "Ukjent feil";

const NULL_PAYLOAD_MESSAGE: &str = "Cannot read properties of null (reading 'ok')";

pub fn render_outcome(outcome: &Result<Value, TransportError>) -> String {
    match outcome {
        Err(err) => format!("{NETWORK_ERROR_PREFIX}{err}"),
        Ok(Value::Null) => format!("{NETWORK_ERROR_PREFIX}{NULL_PAYLOAD_MESSAGE}"),
        Ok(payload) => render_payload(payload),
    }
}

fn render_payload(payload: &Value) -> String {
    if is_truthy(payload.get("ok")) {
        return format!("{RESULT_PREFIX}{}", display_value(payload.get("result")));
    }

    let error = payload.get("error");
    let message = if is_truthy(error) {
        display_value(error)
    } else {
        UNKNOWN_ERROR.to_string()
    };
    format!("{ERROR_PREFIX}{message}")
}

/// `None` stands for an absent field.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Renders a value the way string interpolation in the page would.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => format_number(n),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

fn format_number(number: &Number) -> String {
    match number.as_f64() {
        Some(value) => format_f64(value),
        None => number.to_string(),
    }
}

fn format_f64(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    value.to_string()
}

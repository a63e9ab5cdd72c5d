use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::{
    coerce::coerce_number,
    error::{ProcessError, StatusError},
    status::{MachineStatus, Period},
};

/// Largest integer a JSON number can carry without losing precision on the
/// receiving side.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub fn process_route() -> &'static str {
    "/api/process"
}

pub fn health_route() -> &'static str {
    "/health"
}

pub fn status_route() -> &'static str {
    "/api/status"
}

/// Body of `POST /api/process`.
///
/// `value` is written the way a browser serialises numbers: integral values
/// carry no fractional part and NaN or the infinities become `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessRequest {
    #[serde(
        serialize_with = "serialize_json_number",
        deserialize_with = "deserialize_json_number"
    )]
    pub value: f64,
}

impl ProcessRequest {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Builds the request from raw input text using numeric coercion. Input
    /// that is not a number yields NaN and is sent anyway.
    pub fn from_input(raw_input: &str) -> Self {
        Self::new(coerce_number(raw_input))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessResponse {
    pub fn success(result: f64) -> Self {
        Self {
            ok: true,
            result: Some(Number::from_f64(result).map_or(Value::Null, Value::Number)),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(message.into()),
        }
    }
}

impl From<ProcessError> for ProcessResponse {
    fn from(value: ProcessError) -> Self {
        Self::failure(value.to_string())
    }
}

impl From<StatusError> for ProcessResponse {
    fn from(value: StatusError) -> Self {
        Self::failure(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
        }
    }
}

/// Body of `POST /api/status`. The label must match a current status exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

/// Answer to `GET /api/status` and to an accepted status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub current: MachineStatus,
    pub color: String,
    pub since: String,
    pub periods: Vec<PeriodSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub title: String,
    pub total_seconds: u64,
    pub slices: Vec<StatusSlice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub status: MachineStatus,
    pub color: String,
    pub seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<u64>,
}

fn serialize_json_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        serializer.serialize_none()
    } else if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn deserialize_json_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_input_is_sent_without_fraction() {
        let body = serde_json::to_string(&ProcessRequest::from_input("7")).expect("json");
        assert_eq!(body, r#"{"value":7}"#);
    }

    #[test]
    fn fractional_and_negative_zero_values_serialize_like_a_browser() {
        let body = serde_json::to_string(&ProcessRequest::new(2.5)).expect("json");
        assert_eq!(body, r#"{"value":2.5}"#);

        let body = serde_json::to_string(&ProcessRequest::new(-0.0)).expect("json");
        assert_eq!(body, r#"{"value":0}"#);
    }

    #[test]
    fn non_numeric_input_is_sent_as_null() {
        let request = ProcessRequest::from_input("abc");
        assert!(request.value.is_nan());
        let body = serde_json::to_string(&request).expect("json");
        assert_eq!(body, r#"{"value":null}"#);

        let body = serde_json::to_string(&ProcessRequest::new(f64::INFINITY)).expect("json");
        assert_eq!(body, r#"{"value":null}"#);
    }

    #[test]
    fn null_value_reads_back_as_nan() {
        let request: ProcessRequest = serde_json::from_str(r#"{"value":null}"#).expect("json");
        assert!(request.value.is_nan());
    }

    #[test]
    fn failure_response_omits_result() {
        let body = serde_json::to_value(ProcessResponse::failure("bad input")).expect("json");
        assert_eq!(body, serde_json::json!({ "ok": false, "error": "bad input" }));
    }

    #[test]
    fn success_response_keeps_float_result() {
        let body = serde_json::to_string(&ProcessResponse::success(14.0)).expect("json");
        assert_eq!(body, r#"{"ok":true,"result":14.0}"#);

        let body = serde_json::to_value(ProcessResponse::success(f64::NAN)).expect("json");
        assert_eq!(body, serde_json::json!({ "ok": true, "result": null }));
    }
}

use super::*;

#[test]
fn numeric_value_is_read_as_float() {
    assert_eq!(value_from_body(br#"{"value": 7}"#), Ok(7.0));
    assert_eq!(value_from_body(br#"{"value": -2.5}"#), Ok(-2.5));
}

#[test]
fn missing_value_and_falsy_bodies_default_to_zero() {
    assert_eq!(value_from_body(br#"{}"#), Ok(0.0));
    assert_eq!(value_from_body(br#"{"other": 3}"#), Ok(0.0));
    assert_eq!(value_from_body(b"null"), Ok(0.0));
    assert_eq!(value_from_body(b"[]"), Ok(0.0));
    assert_eq!(value_from_body(b"0"), Ok(0.0));
}

#[test]
fn strings_and_booleans_are_converted() {
    assert_eq!(value_from_body(br#"{"value": " 3.5 "}"#), Ok(3.5));
    assert_eq!(value_from_body(br#"{"value": "1_000"}"#), Ok(1000.0));
    assert_eq!(value_from_body(br#"{"value": "1e3"}"#), Ok(1000.0));
    assert_eq!(value_from_body(br#"{"value": true}"#), Ok(1.0));
    assert_eq!(
        value_from_body(br#"{"value": "-inf"}"#),
        Ok(f64::NEG_INFINITY)
    );
}

#[test]
fn unconvertible_values_are_rejected() {
    assert_eq!(
        value_from_body(br#"{"value": "abc"}"#),
        Err(ProcessError::InvalidNumber("abc".into()))
    );
    assert_eq!(
        value_from_body(br#"{"value": "1__0"}"#),
        Err(ProcessError::InvalidNumber("1__0".into()))
    );
    assert_eq!(
        value_from_body(br#"{"value": null}"#),
        Err(ProcessError::UnsupportedType("null"))
    );
    assert_eq!(
        value_from_body(br#"{"value": [1]}"#),
        Err(ProcessError::UnsupportedType("array"))
    );
}

#[test]
fn malformed_or_non_object_bodies_are_rejected() {
    assert!(matches!(
        value_from_body(b"not json"),
        Err(ProcessError::MalformedBody(_))
    ));
    assert!(matches!(
        value_from_body(b""),
        Err(ProcessError::MalformedBody(_))
    ));
    assert_eq!(
        value_from_body(b"[1, 2]"),
        Err(ProcessError::NotAnObject("array"))
    );
    assert_eq!(
        value_from_body(br#""seven""#),
        Err(ProcessError::NotAnObject("string"))
    );
}

#[test]
fn doubles_the_value() {
    assert_eq!(double_value(7.0), 14.0);
    assert_eq!(double_value(-0.25), -0.5);
    assert!(double_value(f64::NAN).is_nan());
}

#[test]
fn status_change_accepts_current_labels_only() {
    assert_eq!(
        status_from_body(br#"{"status":"Minor issue"}"#),
        Ok(MachineStatus::MinorIssue)
    );
    assert_eq!(
        status_from_body(br#"{"status":"No issues"}"#),
        Err(StatusError::UnknownStatus("No issues".into()))
    );
    assert!(matches!(
        status_from_body(br#"{"state":"Alarm"}"#),
        Err(StatusError::MalformedBody(_))
    ));
}

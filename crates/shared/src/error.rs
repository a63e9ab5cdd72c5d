use thiserror::Error;

/// Reasons the processing endpoint rejects a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(String),
    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("could not convert string to float: '{0}'")]
    InvalidNumber(String),
    #[error("value must be a number or a numeric string, got {0}")]
    UnsupportedType(&'static str),
}

impl ProcessError {
    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self::MalformedBody(message.into())
    }
}

/// Reasons a status change is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(String),
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
}

use thiserror::Error;

/// Failure to obtain a parsed payload from the backend. The display text is
/// the bare failure message; callers add their own prefix.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    /// Failure reported by a [`ProcessTransport`](crate::ProcessTransport)
    /// that is not built on HTTP, such as an in-process or scripted backend.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Builds [`TransportError::Other`]; the message is shown verbatim after
    /// the network error prefix.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

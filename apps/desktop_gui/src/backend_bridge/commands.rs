//! Backend commands queued from UI to backend worker.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// The send button was pressed with this input text.
    Click { raw_input: String },
}

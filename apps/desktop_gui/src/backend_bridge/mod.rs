//! Bridge between the UI thread and the tokio runtime that performs clicks.

pub mod commands;
pub mod runtime;

use std::sync::Arc;

use shared::protocol::ProcessRequest;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub mod error;
pub mod output;
pub mod render;
pub mod transport;

pub use error::TransportError;
pub use output::{OutputSink, WatchOutput};
pub use render::PENDING_STATUS;
pub use transport::{HttpTransport, ProcessTransport};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Wires a click to one processing call and reports the outcome into an
/// output cell.
///
/// Each click is independent: the output shows [`PENDING_STATUS`] until that
/// click settles. Overlapping clicks are neither cancelled nor ordered, so
/// whichever settles last owns the output.
#[derive(Clone)]
pub struct ClickHandler {
    transport: Arc<dyn ProcessTransport>,
    output: Arc<dyn OutputSink>,
}

impl ClickHandler {
    pub fn new(transport: Arc<dyn ProcessTransport>, output: Arc<dyn OutputSink>) -> Self {
        Self { transport, output }
    }

    /// Runs one click with the current input text and returns the text it
    /// left in the output cell.
    pub async fn click(&self, raw_input: &str) -> String {
        self.output.set_text(PENDING_STATUS);

        let request = ProcessRequest::from_input(raw_input);
        debug!(raw_input, value = request.value, "sending value for processing");

        let outcome = self.transport.process(&request).await;
        if let Err(err) = &outcome {
            warn!(%err, "processing request failed");
        }

        let text = render::render_outcome(&outcome);
        self.output.set_text(&text);
        text
    }

    /// Starts a click on the current runtime without waiting for it.
    pub fn spawn_click(&self, raw_input: impl Into<String>) -> JoinHandle<String> {
        let handler = self.clone();
        let raw_input = raw_input.into();
        tokio::spawn(async move { handler.click(&raw_input).await })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

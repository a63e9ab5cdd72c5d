use std::sync::Arc;

use tokio::sync::watch;

/// The single text cell a click reports into. Every call replaces the
/// previous text; concurrent writers are not ordered.
pub trait OutputSink: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Output cell backed by a watch channel so front ends can observe the
/// latest text without polling the handler.
#[derive(Clone)]
pub struct WatchOutput {
    tx: Arc<watch::Sender<String>>,
}

impl WatchOutput {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }
}

impl Default for WatchOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for WatchOutput {
    fn set_text(&self, text: &str) {
        self.tx.send_replace(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_and_subscribers_see_it() {
        let output = WatchOutput::new();
        let rx = output.subscribe();
        output.set_text("first");
        output.set_text("second");
        assert_eq!(output.current(), "second");
        assert_eq!(*rx.borrow(), "second");
    }
}

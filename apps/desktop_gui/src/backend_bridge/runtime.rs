//! Runtime bridge between UI command queue and the click handler.

use std::{sync::Arc, thread};

use client_core::{ClickHandler, HttpTransport, OutputSink, WatchOutput};
use crossbeam_channel::Receiver;

use crate::backend_bridge::commands::BackendCommand;

/// Starts the backend worker thread. Every click runs as its own task, so a
/// slow response never holds back a later click.
pub fn launch(cmd_rx: Receiver<BackendCommand>, server_url: String, output: WatchOutput) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                output.set_text(&format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                ));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let transport = match HttpTransport::new(&server_url) {
            Ok(transport) => transport,
            Err(err) => {
                output.set_text(&format!(
                    "backend worker startup failure: invalid server url '{server_url}': {err}"
                ));
                tracing::error!(%server_url, "invalid server url: {err}");
                return;
            }
        };
        tracing::info!(endpoint = %transport.endpoint(), "backend worker ready");

        let handler = ClickHandler::new(Arc::new(transport), Arc::new(output));
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Click { raw_input } => {
                    let handler = handler.clone();
                    runtime.spawn(async move {
                        handler.click(&raw_input).await;
                    });
                }
            }
        }
        tracing::debug!("ui command queue closed; backend worker exiting");
    });
}

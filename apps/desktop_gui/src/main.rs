mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{WatchOutput, DEFAULT_SERVER_URL};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::ui::ProcessApp;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let output = WatchOutput::new();
    let output_rx = output.subscribe();
    backend_bridge::runtime::launch(cmd_rx, args.server_url, output);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Value Processor")
            .with_inner_size([420.0, 200.0])
            .with_min_inner_size([320.0, 160.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Value Processor",
        options,
        Box::new(|_cc| Ok(Box::new(ProcessApp::new(cmd_tx, output_rx)))),
    )
}

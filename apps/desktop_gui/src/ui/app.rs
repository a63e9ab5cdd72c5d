//! The processing form: a value input, a send button and an output line.

use std::time::Duration;

use crossbeam_channel::Sender;
use eframe::egui;
use tokio::sync::watch;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::orchestration::dispatch_backend_command;

pub const VALUE_INPUT_ID: &str = "value";
pub const SEND_BUTTON_ID: &str = "sendBtn";
pub const OUTPUT_ID: &str = "output";

pub struct ProcessApp {
    cmd_tx: Sender<BackendCommand>,
    output_rx: watch::Receiver<String>,
    input: String,
    status: String,
}

impl ProcessApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, output_rx: watch::Receiver<String>) -> Self {
        Self {
            cmd_tx,
            output_rx,
            input: String::new(),
            status: String::new(),
        }
    }

    fn on_send_clicked(&mut self) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Click {
                raw_input: self.input.clone(),
            },
            &mut self.status,
        );
    }

    fn output_text(&self) -> String {
        self.output_rx.borrow().clone()
    }
}

impl eframe::App for ProcessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Process value");
            ui.add_space(8.0);

            let mut clicked = false;
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .id_salt(VALUE_INPUT_ID)
                        .hint_text("Value"),
                );
                clicked = ui
                    .push_id(SEND_BUTTON_ID, |ui| ui.button("Send"))
                    .inner
                    .clicked();
            });
            if clicked {
                self.on_send_clicked();
            }

            ui.add_space(8.0);
            let text = self.output_text();
            ui.push_id(OUTPUT_ID, |ui| ui.label(text));

            if !self.status.is_empty() {
                let warn_color = ui.visuals().warn_fg_color;
                ui.colored_label(warn_color, &self.status);
            }
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

use eframe::egui;
use pdf_async_runtime::PdfCommand;
use tokio::sync::mpsc;

use crate::app::AppController;
use crate::ui_components::{SliderBuilder, labeled_drag_clamped};

pub fn show(
    ui: &mut egui::Ui,
    controller: &mut AppController,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    egui::CollapsingHeader::new("⚙ Output Options")
        .default_open(false)
        .show(ui, |ui| {
            let options = &mut controller.options;

            SliderBuilder::new(&mut options.jpeg_quality, 1..=100)
                .text("Page quality")
                .show(ui);
            SliderBuilder::new(&mut options.crop_quality, 1..=100)
                .text("Crop quality")
                .show(ui);
            labeled_drag_clamped(
                ui,
                "Resolution:",
                &mut options.assumed_dpi,
                1.0..=1200.0,
                " dpi",
            );

            ui.horizontal(|ui| {
                ui.label("File name:");
                ui.text_edit_singleline(&mut options.output_file_name);
            });
            ui.horizontal(|ui| {
                ui.label("Title:");
                ui.text_edit_singleline(&mut options.title);
            });

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.button("💾 Save Configuration").clicked() {
                    save_configuration(controller);
                }
                if ui.button("📂 Load Configuration").clicked() {
                    load_configuration(command_tx);
                }
            });
        });
}

fn save_configuration(controller: &AppController) {
    if let Some(path) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .set_file_name("compose_config.json")
        .save_file()
    {
        let options = controller.options.clone();
        tokio::spawn(async move {
            if let Err(e) = options.save(&path).await {
                log::error!("Failed to save configuration: {}", e);
            } else {
                log::info!("Configuration saved to {}", path.display());
            }
        });
    }
}

fn load_configuration(command_tx: &mpsc::UnboundedSender<PdfCommand>) {
    if let Some(path) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .pick_file()
    {
        let _ = command_tx.send(PdfCommand::ComposeLoadConfig { path });
    }
}

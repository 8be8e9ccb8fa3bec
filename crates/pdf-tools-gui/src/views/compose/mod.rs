mod actions_section;
mod input_section;
mod options_section;

use eframe::egui;
use pdf_async_runtime::PdfCommand;
use tokio::sync::mpsc;

use super::CropDialog;
use crate::app::AppController;

pub fn show_compose(
    ui: &mut egui::Ui,
    controller: &mut AppController,
    crop_dialog: &mut Option<CropDialog>,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    egui::SidePanel::left("compose_controls")
        .min_width(280.0)
        .show_inside(ui, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Images to PDF");
                ui.separator();

                options_section::show(ui, controller, command_tx);
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                actions_section::show(ui, controller, command_tx);
            });
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            input_section::show(ui, controller, crop_dialog, command_tx);
        });
    });
}

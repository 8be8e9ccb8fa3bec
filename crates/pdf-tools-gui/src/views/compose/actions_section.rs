use eframe::egui;
use pdf_async_runtime::PdfCommand;
use tokio::sync::mpsc;

use crate::app::AppController;

pub fn show(
    ui: &mut egui::Ui,
    controller: &mut AppController,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    let count = controller.store().len();
    ui.label(match count {
        0 => "No pages yet".to_string(),
        1 => "1 page".to_string(),
        n => format!("{n} pages"),
    });

    ui.add_space(5.0);

    if ui
        .add_enabled(!controller.is_busy(), egui::Button::new("📄 Create PDF"))
        .clicked()
    {
        if let Some(cmd) = controller.request_compose() {
            let _ = command_tx.send(cmd);
        }
    }

    if controller.is_busy() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Working...");
        });
    }
}

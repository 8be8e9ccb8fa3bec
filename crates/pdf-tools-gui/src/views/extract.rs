use eframe::egui;
use pdf_async_runtime::PdfCommand;
use tokio::sync::mpsc;

use crate::app::AppController;

pub fn show_extract(
    ui: &mut egui::Ui,
    controller: &mut AppController,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    ui.heading("Extract Pages");
    ui.separator();

    let busy = controller.is_busy();

    egui::CollapsingHeader::new("📄 Source PDF")
        .default_open(true)
        .show(ui, |ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("📂 Open PDF..."))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .pick_file()
                {
                    log::info!("Loading {}", path.display());
                    let _ = command_tx.send(PdfCommand::ExtractLoad { path });
                }
            }

            match controller.source() {
                Some(source) => {
                    ui.label(format!("{} ({} pages)", source.file_name, source.page_count));
                }
                None => {
                    ui.label("No PDF selected. A PDF can also be dropped onto the window.");
                }
            }
        });

    ui.add_space(10.0);

    egui::CollapsingHeader::new("🔢 Pages")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Page ranges:");
                ui.add(
                    egui::TextEdit::singleline(&mut controller.range_expression)
                        .hint_text("e.g. 1-3,5,7-9"),
                );
            });
            ui.weak("Pages are numbered from 1 and copied in the order given.");
        });

    ui.add_space(10.0);

    if ui
        .add_enabled(!busy, egui::Button::new("✂ Extract Pages"))
        .clicked()
    {
        if let Some(cmd) = controller.request_extract() {
            let _ = command_tx.send(cmd);
        }
    }
}

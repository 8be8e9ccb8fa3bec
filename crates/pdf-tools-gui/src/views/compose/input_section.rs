use eframe::egui;
use pdf_async_runtime::PdfCommand;
use tokio::sync::mpsc;

use crate::app::AppController;
use crate::ui_components::{IMAGE_EXTENSIONS, ImageListEditor, ListAction};
use crate::views::CropDialog;

pub fn show(
    ui: &mut egui::Ui,
    controller: &mut AppController,
    crop_dialog: &mut Option<CropDialog>,
    command_tx: &mpsc::UnboundedSender<PdfCommand>,
) {
    egui::CollapsingHeader::new("🖼 Images")
        .default_open(true)
        .show(ui, |ui| {
            let busy = controller.is_busy();

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!busy, egui::Button::new("➕ Add Images"))
                    .clicked()
                {
                    if let Some(paths) = rfd::FileDialog::new()
                        .add_filter("Images", IMAGE_EXTENSIONS)
                        .pick_files()
                    {
                        log::info!("Loading {} images", paths.len());
                        let _ = command_tx.send(PdfCommand::ImagesLoad { paths });
                    }
                }

                let can_clear = !busy && !controller.store().is_empty();
                if ui
                    .add_enabled(can_clear, egui::Button::new("🗑 Clear"))
                    .clicked()
                {
                    *crop_dialog = None;
                    controller.clear_images();
                }
            });

            ui.label("Drag rows or use ▲/▼ to change the page order. Images can also be dropped onto the window.");
            ui.add_space(5.0);

            let action = ImageListEditor::new(controller.store())
                .enabled(!busy)
                .show(ui);

            match action {
                Some(ListAction::Move { from, to }) => controller.reorder_images(from, to),
                Some(ListAction::Remove(id)) => {
                    if crop_dialog.as_ref().is_some_and(|dialog| dialog.image_id() == id) {
                        *crop_dialog = None;
                    }
                    controller.remove_image(id);
                }
                Some(ListAction::Crop(id)) => *crop_dialog = Some(CropDialog::new(id)),
                None => {}
            }
        });
}

use eframe::egui;
use pdf_async_runtime::{CropRect, DisplaySize, ImageId, PdfCommand};
use tokio::sync::mpsc;

use crate::app::AppController;

/// Largest size the image is shown at while selecting
const MAX_DISPLAY: egui::Vec2 = egui::vec2(640.0, 480.0);

/// Selection of a crop region on a scaled preview of one image
pub struct CropDialog {
    image_id: ImageId,
    drag_start: Option<egui::Pos2>,
    /// Selected region relative to the displayed image's top-left corner
    selection: Option<egui::Rect>,
}

impl CropDialog {
    pub fn new(image_id: ImageId) -> Self {
        Self {
            image_id,
            drag_start: None,
            selection: None,
        }
    }

    pub fn image_id(&self) -> ImageId {
        self.image_id
    }

    /// Show the dialog. Returns false once it should close.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        controller: &mut AppController,
        command_tx: &mpsc::UnboundedSender<PdfCommand>,
    ) -> bool {
        let Some(entry) = controller.store().get(self.image_id) else {
            return false;
        };
        let texture = entry.display().clone();
        let title = format!("Crop {}", entry.file().name);
        let last_rect = entry.crop().map(|crop| crop.rect);

        let mut open = true;
        let mut apply = None;
        let mut cancel = false;

        egui::Window::new(title)
            .id(egui::Id::new(("crop_dialog", self.image_id)))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Drag on the image to select the region to keep.");
                if let Some(rect) = last_rect {
                    ui.weak(format!(
                        "Current crop: {:.0} × {:.0} at ({:.0}, {:.0})",
                        rect.width, rect.height, rect.x, rect.y
                    ));
                }
                ui.add_space(5.0);

                let size = fit_size(texture.size_vec2(), MAX_DISPLAY);
                let response = ui.add(
                    egui::Image::new((texture.id(), size))
                        .fit_to_exact_size(size)
                        .sense(egui::Sense::drag()),
                );
                self.track_drag(&response);

                if let Some(selection) = self.selection {
                    let on_screen = selection.translate(response.rect.min.to_vec2());
                    let painter = ui.painter_at(response.rect);
                    painter.rect_filled(on_screen, 0.0, egui::Color32::from_white_alpha(40));
                    painter.rect_stroke(
                        on_screen,
                        0.0,
                        egui::Stroke::new(2.0, egui::Color32::WHITE),
                        egui::StrokeKind::Middle,
                    );
                }

                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    let selected = self.selection.map(to_crop_rect);
                    if let Some(rect) = selected {
                        ui.label(format!("{:.0} × {:.0}", rect.width, rect.height));
                    }
                    if ui
                        .add_enabled(selected.is_some(), egui::Button::new("✂ Apply Crop"))
                        .clicked()
                    {
                        apply = selected.map(|rect| (rect, DisplaySize::new(size.x, size.y)));
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if let Some((rect, displayed)) = apply {
            if let Some(cmd) = controller.request_crop(self.image_id, rect, displayed) {
                let _ = command_tx.send(cmd);
            }
            return false;
        }

        open && !cancel
    }

    fn track_drag(&mut self, response: &egui::Response) {
        let origin = response.rect.min;
        let bounds = egui::Rect::from_min_size(egui::Pos2::ZERO, response.rect.size());

        if response.drag_started() {
            self.drag_start = response
                .interact_pointer_pos()
                .map(|pos| bounds.clamp(pos - origin.to_vec2()));
        }

        if response.dragged() {
            if let (Some(start), Some(pos)) = (self.drag_start, response.interact_pointer_pos()) {
                let end = bounds.clamp(pos - origin.to_vec2());
                self.selection = Some(egui::Rect::from_two_pos(start, end));
            }
        }

        if response.drag_stopped() {
            self.drag_start = None;
        }
    }
}

fn to_crop_rect(selection: egui::Rect) -> CropRect {
    CropRect::from_corners(
        (selection.min.x, selection.min.y),
        (selection.max.x, selection.max.y),
    )
}

/// Scale `size` down to fit inside `max`, keeping the aspect ratio
fn fit_size(size: egui::Vec2, max: egui::Vec2) -> egui::Vec2 {
    let scale = (max.x / size.x.max(1.0))
        .min(max.y / size.y.max(1.0))
        .min(1.0);
    size * scale
}

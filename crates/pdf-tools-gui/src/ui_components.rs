use eframe::egui;
use pdf_compose::{ImageId, ImageStore};

/// Height of the thumbnails in the image list
const THUMBNAIL_HEIGHT: f32 = 64.0;

/// Image extensions offered by the file pickers and accepted on drop
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico", "tga",
];

pub fn is_image_path(path: &std::path::Path) -> bool {
    has_extension(path, IMAGE_EXTENSIONS)
}

pub fn is_pdf_path(path: &std::path::Path) -> bool {
    has_extension(path, &["pdf"])
}

fn has_extension(path: &std::path::Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Builder for creating sliders with automatic change tracking
pub struct SliderBuilder<'a, T> {
    value: &'a mut T,
    range: std::ops::RangeInclusive<T>,
    text: String,
}

impl<'a, T> SliderBuilder<'a, T>
where
    T: egui::emath::Numeric,
{
    pub fn new(value: &'a mut T, range: std::ops::RangeInclusive<T>) -> Self {
        Self {
            value,
            range,
            text: String::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let mut slider = egui::Slider::new(self.value, self.range);

        if !self.text.is_empty() {
            slider = slider.text(self.text);
        }

        ui.add(slider).changed()
    }
}

/// Helper for creating labeled horizontal drag values with range and suffix
pub fn labeled_drag_clamped<T>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    range: std::ops::RangeInclusive<T>,
    suffix: &str,
) -> bool
where
    T: egui::emath::Numeric,
{
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(value).range(range).suffix(suffix))
            .changed()
    })
    .inner
}

/// What the user did to the image list this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Move { from: usize, to: usize },
    Remove(ImageId),
    Crop(ImageId),
}

/// Image list editor with thumbnails, drag-and-drop reordering and removal
pub struct ImageListEditor<'a> {
    store: &'a ImageStore<egui::TextureHandle>,
    enabled: bool,
}

impl<'a> ImageListEditor<'a> {
    pub fn new(store: &'a ImageStore<egui::TextureHandle>) -> Self {
        Self {
            store,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<ListAction> {
        if self.store.is_empty() {
            ui.label("No images selected");
            return None;
        }

        let mut action = None;
        let last = self.store.len() - 1;

        for (idx, entry) in self.store.iter().enumerate() {
            let row_id = egui::Id::new(("image_row", entry.id()));

            let row = ui
                .add_enabled_ui(self.enabled, |ui| {
                    ui.horizontal(|ui| {
                        // The handle is the drag source; its payload is the row index
                        ui.dnd_drag_source(row_id, idx, |ui| {
                            ui.label("☰");
                        });

                        if ui
                            .add_enabled(idx > 0, egui::Button::new("▲").small())
                            .clicked()
                        {
                            action = Some(ListAction::Move {
                                from: idx,
                                to: idx - 1,
                            });
                        }
                        if ui
                            .add_enabled(idx < last, egui::Button::new("▼").small())
                            .clicked()
                        {
                            action = Some(ListAction::Move {
                                from: idx,
                                to: idx + 1,
                            });
                        }

                        let texture = entry.effective_display();
                        let size = texture.size_vec2();
                        let scale = THUMBNAIL_HEIGHT / size.y.max(1.0);
                        ui.add(egui::Image::new((texture.id(), size * scale)));

                        let (width, height) = entry.effective_dimensions();
                        ui.vertical(|ui| {
                            ui.label(format!("{}. {}", idx + 1, entry.file().name));
                            let cropped = if entry.crop().is_some() { " (cropped)" } else { "" };
                            ui.weak(format!("{width} × {height} px{cropped}"));
                        });

                        if ui.small_button("✂ Crop").clicked() {
                            action = Some(ListAction::Crop(entry.id()));
                        }
                        if ui.small_button("✖").clicked() {
                            action = Some(ListAction::Remove(entry.id()));
                        }
                    })
                    .response
                })
                .inner;

            if let Some(from) = row.dnd_release_payload::<usize>() {
                if *from != idx {
                    action = Some(ListAction::Move { from: *from, to: idx });
                }
            } else if row.dnd_hover_payload::<usize>().is_some() {
                ui.painter().hline(
                    row.rect.x_range(),
                    row.rect.top(),
                    ui.visuals().selection.stroke,
                );
            }
        }

        action
    }
}

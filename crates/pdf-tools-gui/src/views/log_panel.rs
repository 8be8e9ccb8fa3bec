use eframe::egui;
use log::Level;

use crate::logger::AppLogger;

fn level_color(level: Level) -> egui::Color32 {
    match level {
        Level::Error => egui::Color32::from_rgb(220, 60, 60),
        Level::Warn => egui::Color32::from_rgb(230, 170, 30),
        Level::Info => egui::Color32::GRAY,
        Level::Debug | Level::Trace => egui::Color32::DARK_GRAY,
    }
}

pub fn show_log_panel(ui: &mut egui::Ui, logger: &AppLogger) {
    egui::CollapsingHeader::new("📜 Activity log")
        .default_open(false)
        .show(ui, |ui| {
            if ui.small_button("Clear").clicked() {
                logger.clear();
            }

            egui::ScrollArea::vertical()
                .max_height(150.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for entry in logger.get_entries() {
                        ui.label(
                            egui::RichText::new(format!(
                                "[{}] {:<5} {}",
                                entry.timestamp.format("%H:%M:%S"),
                                entry.level,
                                entry.message
                            ))
                            .monospace()
                            .color(level_color(entry.level)),
                        )
                        .on_hover_text(&entry.target);
                    }
                });
        });
}

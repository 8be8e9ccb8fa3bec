use eframe::egui;
use pdf_async_runtime::Severity;

use crate::app::AppController;

fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Warning => egui::Color32::from_rgb(230, 170, 30),
        Severity::Error => egui::Color32::from_rgb(220, 60, 60),
        Severity::Success => egui::Color32::from_rgb(60, 170, 90),
    }
}

/// Modal for the current notification, if any
pub fn show_notification(ctx: &egui::Context, controller: &mut AppController) {
    let Some(notification) = controller.notification().cloned() else {
        return;
    };

    let mut dismissed = false;
    let modal = egui::Modal::new(egui::Id::new("notification")).show(ctx, |ui| {
        ui.set_min_width(280.0);
        ui.heading(
            egui::RichText::new(notification.severity.to_string())
                .color(severity_color(notification.severity)),
        );
        ui.add_space(5.0);
        ui.label(&notification.message);
        ui.add_space(10.0);
        if ui.button("OK").clicked() {
            dismissed = true;
        }
    });

    if dismissed || modal.should_close() {
        controller.dismiss_notification();
    }
}

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod handlers;
mod logger;
mod ui_components;
mod views;
mod worker;

use logger::AppLogger;

/// Log records kept for the activity panel
const MAX_LOG_ENTRIES: usize = 500;

fn main() -> anyhow::Result<()> {
    let logger = AppLogger::new(MAX_LOG_ENTRIES, log::LevelFilter::Info).init()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    // File dialogs spawn background saves from the UI thread
    let _guard = runtime.enter();
    let handle = runtime.handle().clone();

    log::info!("Starting PDF Tools");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("PDF Tools"),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Tools",
        options,
        Box::new(move |cc| Ok(Box::new(app::PdfToolsApp::new(cc, handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {e}"))
}

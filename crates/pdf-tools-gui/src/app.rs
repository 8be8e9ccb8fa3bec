use eframe::egui;
use pdf_async_runtime::{ComposeOptions, Controller, PdfCommand, PdfUpdate, PreviewImage};
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::ui_components::{is_image_path, is_pdf_path};
use crate::views::{CropDialog, show_compose, show_extract, show_log_panel, show_notification};

/// Controller whose display handles are egui textures
pub type AppController = Controller<egui::TextureHandle>;

#[derive(Default, PartialEq)]
enum Mode {
    #[default]
    Compose,
    Extract,
}

pub struct PdfToolsApp {
    mode: Mode,
    controller: AppController,
    crop_dialog: Option<CropDialog>,
    logger: AppLogger,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<PdfCommand>,
    update_rx: mpsc::UnboundedReceiver<PdfUpdate>,

    // Runtime handle
    _tokio_handle: tokio::runtime::Handle,
}

impl PdfToolsApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            mode: Mode::default(),
            controller: Controller::new(ComposeOptions::default()),
            crop_dialog: None,
            logger,
            command_tx,
            update_rx,
            _tokio_handle: tokio_handle,
        }
    }

    fn send(&self, cmd: PdfCommand) {
        if self.command_tx.send(cmd).is_err() {
            log::error!("Worker is not running");
        }
    }

    /// Route files dropped onto the window: images join the list, a PDF becomes
    /// the extraction source
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let paths: Vec<PathBuf> =
            ctx.input(|i| i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect());
        if paths.is_empty() {
            return;
        }

        let (pdfs, others): (Vec<_>, Vec<_>) = paths.into_iter().partition(|p| is_pdf_path(p));
        let (images, unsupported): (Vec<_>, Vec<_>) =
            others.into_iter().partition(|p| is_image_path(p));

        for path in &unsupported {
            log::warn!("Ignoring unsupported file {}", path.display());
        }

        if !images.is_empty() {
            self.mode = Mode::Compose;
            self.send(PdfCommand::ImagesLoad { paths: images });
        }

        if let Some(path) = pdfs.into_iter().next() {
            self.mode = Mode::Extract;
            self.send(PdfCommand::ExtractLoad { path });
        }
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            self.controller
                .apply_update(update, |name, preview| load_preview(ctx, name, preview));
            ctx.request_repaint();
        }
    }

    /// Ask where to write a freshly generated document
    fn offer_pending_output(&mut self) {
        let Some(file_name) = self
            .controller
            .pending_output()
            .map(|doc| doc.file_name.clone())
        else {
            return;
        };

        match rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_file_name(&file_name)
            .save_file()
        {
            Some(path) => {
                if let Some(cmd) = self.controller.request_save(path) {
                    self.send(cmd);
                }
            }
            None => {
                self.controller.take_output();
                log::info!("Save cancelled, discarded {}", file_name);
            }
        }
    }
}

fn load_preview(ctx: &egui::Context, name: &str, preview: &PreviewImage) -> egui::TextureHandle {
    let color_image =
        egui::ColorImage::from_rgba_unmultiplied([preview.width, preview.height], &preview.rgba);
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

impl eframe::App for PdfToolsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // Process all pending updates from worker
        self.process_updates(ctx);

        self.offer_pending_output();

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.mode, Mode::Compose, "🖼 Images to PDF");
                ui.selectable_value(&mut self.mode, Mode::Extract, "✂ Extract Pages");
            });
        });

        egui::TopBottomPanel::bottom("activity").show(ctx, |ui| {
            // Show progress bar
            if let Some(progress) = self.controller.progress() {
                ui.label(&progress.operation);
                ui.add(egui::ProgressBar::new(progress.fraction()).show_percentage());
                ctx.request_repaint(); // Keep updating during operations
            } else if let Some(message) = self.logger.latest_message() {
                ui.weak(message);
            }

            show_log_panel(ui, &self.logger);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.mode {
            Mode::Compose => show_compose(
                ui,
                &mut self.controller,
                &mut self.crop_dialog,
                &self.command_tx,
            ),
            Mode::Extract => show_extract(ui, &mut self.controller, &self.command_tx),
        });

        if let Some(dialog) = &mut self.crop_dialog {
            if !dialog.show(ctx, &mut self.controller, &self.command_tx) {
                self.crop_dialog = None;
            }
        }

        show_notification(ctx, &mut self.controller);

        // Worker updates arrive between frames
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

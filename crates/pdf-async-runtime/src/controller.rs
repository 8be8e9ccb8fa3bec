//! Application state shared by every front end
//!
//! The controller owns the image list, the extraction source, the busy flag
//! and the current notification. It turns user actions into [`PdfCommand`]s
//! and folds [`PdfUpdate`]s back into state without knowing how anything is
//! drawn. Display handles are created by the caller through `make_handle`.

use crate::{
    DocumentId, Notification, Operation, OutputDocument, PdfCommand, PdfUpdate, Severity,
};
use pdf_compose::{ComposeOptions, CropRect, DisplaySize, ImageFile, ImageId, ImageStore, PreviewImage};
use std::path::PathBuf;
use thiserror::Error;

/// Problems detected before any work is started
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select at least one image.")]
    NoImages,
    #[error("Please select a PDF file.")]
    NoSource,
    #[error("Please enter valid page ranges (e.g. 1-3,5).")]
    InvalidRanges,
    #[error("Please select a region to crop.")]
    EmptyCropRegion,
    #[error("Image {0} is no longer in the list.")]
    UnknownImage(ImageId),
}

/// The PDF currently selected for page extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub doc_id: DocumentId,
    pub file_name: String,
    pub page_count: usize,
}

/// Progress of the running operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub operation: String,
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.total.max(1) as f32
    }
}

pub struct Controller<H> {
    pub options: ComposeOptions,
    pub range_expression: String,
    store: ImageStore<H>,
    source: Option<SourceDocument>,
    busy: bool,
    progress: Option<Progress>,
    notification: Option<Notification>,
    pending_output: Option<OutputDocument>,
}

impl<H> Default for Controller<H> {
    fn default() -> Self {
        Self::new(ComposeOptions::default())
    }
}

impl<H> Controller<H> {
    pub fn new(options: ComposeOptions) -> Self {
        Self {
            options,
            range_expression: String::new(),
            store: ImageStore::new(),
            source: None,
            busy: false,
            progress: None,
            notification: None,
            pending_output: None,
        }
    }

    pub fn store(&self) -> &ImageStore<H> {
        &self.store
    }

    pub fn source(&self) -> Option<&SourceDocument> {
        self.source.as_ref()
    }

    /// True while a compose or extract is in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn progress(&self) -> Option<&Progress> {
        self.progress.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Output waiting for a save location
    pub fn pending_output(&self) -> Option<&OutputDocument> {
        self.pending_output.as_ref()
    }

    /// Take the pending output, e.g. to discard it when saving was cancelled
    pub fn take_output(&mut self) -> Option<OutputDocument> {
        self.pending_output.take()
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        let notification = Notification::new(severity, message);
        match severity {
            Severity::Warning => log::warn!("{}", notification.message),
            Severity::Error => log::error!("{}", notification.message),
            Severity::Success => log::info!("{}", notification.message),
        }
        self.notification = Some(notification);
    }

    fn warn(&mut self, error: ValidationError) {
        self.notify(Severity::Warning, error.to_string());
    }

    /// Start building a PDF from the image list.
    ///
    /// Returns `None` while busy or when the list is empty.
    pub fn request_compose(&mut self) -> Option<PdfCommand> {
        if self.busy {
            log::debug!("Ignoring compose request while busy");
            return None;
        }
        if self.store.is_empty() {
            self.warn(ValidationError::NoImages);
            return None;
        }

        self.busy = true;
        log::info!("Creating PDF from {} images", self.store.len());
        Some(PdfCommand::ComposeGenerate {
            sources: self.store.effective_sources(),
            options: self.options.clone(),
        })
    }

    /// Start extracting the pages named by the range expression.
    ///
    /// Returns `None` while busy, without a source, or when the expression
    /// yields no pages.
    pub fn request_extract(&mut self) -> Option<PdfCommand> {
        if self.busy {
            log::debug!("Ignoring extract request while busy");
            return None;
        }
        let Some(doc_id) = self.source.as_ref().map(|source| source.doc_id) else {
            self.warn(ValidationError::NoSource);
            return None;
        };
        let ranges = match pdf_pages::parse_page_ranges(&self.range_expression) {
            Ok(ranges) => ranges,
            Err(_) => {
                self.warn(ValidationError::InvalidRanges);
                return None;
            }
        };

        self.busy = true;
        log::info!("Extracting pages {}", self.range_expression.trim());
        Some(PdfCommand::ExtractGenerate { doc_id, ranges })
    }

    /// Crop the original image of an entry to a region drawn on its preview
    pub fn request_crop(
        &mut self,
        id: ImageId,
        rect: CropRect,
        displayed: DisplaySize,
    ) -> Option<PdfCommand> {
        if rect.width < 1.0 || rect.height < 1.0 {
            self.warn(ValidationError::EmptyCropRegion);
            return None;
        }
        let Some(entry) = self.store.get(id) else {
            self.warn(ValidationError::UnknownImage(id));
            return None;
        };

        Some(PdfCommand::ImagesCrop {
            id,
            source: entry.file().bytes.clone(),
            rect,
            displayed,
            quality: self.options.crop_quality,
        })
    }

    /// Hand the pending output to the worker for writing
    pub fn request_save(&mut self, path: PathBuf) -> Option<PdfCommand> {
        let document = self.pending_output.take()?;
        Some(PdfCommand::SaveOutput { document, path })
    }

    pub fn remove_image(&mut self, id: ImageId) -> bool {
        self.store.remove(id)
    }

    pub fn reorder_images(&mut self, from: usize, to: usize) {
        if let Err(e) = self.store.reorder(from, to) {
            self.notify(Severity::Warning, e.to_string());
        }
    }

    pub fn clear_images(&mut self) {
        self.store.clear();
    }

    /// Fold a worker update into the state.
    ///
    /// `make_handle` creates the display handle for a newly loaded or cropped
    /// image from its name and preview pixels.
    pub fn apply_update<F>(&mut self, update: PdfUpdate, mut make_handle: F)
    where
        F: FnMut(&str, &PreviewImage) -> H,
    {
        match update {
            PdfUpdate::Progress {
                operation,
                current,
                total,
            } => {
                self.progress = Some(Progress {
                    operation,
                    current,
                    total,
                });
            }
            PdfUpdate::ImagesLoaded { images } => {
                let files: Vec<(ImageFile, H)> = images
                    .into_iter()
                    .map(|loaded| {
                        let handle = make_handle(&loaded.file.name, &loaded.preview);
                        (loaded.file, handle)
                    })
                    .collect();
                let added = self.store.add(files);
                log::info!("Added {} images", added.len());
            }
            PdfUpdate::CropApplied {
                id,
                image,
                preview,
                rect,
            } => {
                // The entry may have been removed while the crop was running
                let Some(name) = self.store.get(id).map(|entry| entry.file().name.clone()) else {
                    log::debug!("Discarding crop for removed image {}", id);
                    return;
                };
                let handle = make_handle(&format!("{name} (cropped)"), &preview);
                if self.store.set_crop(id, image, handle, rect) {
                    log::info!("Cropped {}", name);
                }
            }
            PdfUpdate::ComposeComplete { document } => {
                self.finish_generation();
                self.pending_output = Some(document);
                self.notify(Severity::Success, "PDF created successfully!");
            }
            PdfUpdate::ConfigLoaded { options } => {
                self.options = options;
                log::info!("Configuration loaded");
            }
            PdfUpdate::ExtractLoaded {
                doc_id,
                file_name,
                page_count,
            } => {
                log::info!("Loaded {} ({} pages)", file_name, page_count);
                self.source = Some(SourceDocument {
                    doc_id,
                    file_name,
                    page_count,
                });
            }
            PdfUpdate::ExtractComplete { document } => {
                self.finish_generation();
                self.pending_output = Some(document);
                self.notify(Severity::Success, "Pages extracted successfully!");
            }
            PdfUpdate::OutputSaved { path } => {
                log::info!("Saved {}", path.display());
            }
            PdfUpdate::Error { operation, message } => {
                if operation.is_generation() {
                    self.finish_generation();
                }
                // Generation failures get one generic message, details go to the log
                let user_message = match operation {
                    Operation::Compose => {
                        log::error!("Compose failed: {}", message);
                        "Failed to create PDF.".to_string()
                    }
                    Operation::Extract => {
                        log::error!("Extract failed: {}", message);
                        "Failed to extract pages.".to_string()
                    }
                    _ => message,
                };
                self.notify(Severity::Error, user_message);
            }
        }
    }

    fn finish_generation(&mut self) {
        self.busy = false;
        self.progress = None;
    }
}

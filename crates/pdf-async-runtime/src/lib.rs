use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

mod controller;

pub use controller::{Controller, Progress, SourceDocument, ValidationError};

// Re-export types from library crates
pub use pdf_compose::{
    ComposeOptions, CropRect, CroppedImage, DisplaySize, ImageId, LoadedImage, PreviewImage,
};
pub use pdf_pages::PageRange;

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PdfCommand {
    ImagesLoad {
        paths: Vec<PathBuf>,
    },
    ImagesCrop {
        id: ImageId,
        source: Arc<[u8]>,
        rect: CropRect,
        displayed: DisplaySize,
        quality: u8,
    },
    ComposeGenerate {
        sources: Vec<Arc<[u8]>>,
        options: ComposeOptions,
    },
    ComposeLoadConfig {
        path: PathBuf,
    },
    ExtractLoad {
        path: PathBuf,
    },
    ExtractGenerate {
        doc_id: DocumentId,
        ranges: Vec<PageRange>,
    },
    SaveOutput {
        document: OutputDocument,
        path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    ImagesLoaded {
        images: Vec<LoadedImage>,
    },
    CropApplied {
        id: ImageId,
        image: CroppedImage,
        preview: PreviewImage,
        rect: CropRect,
    },
    ComposeComplete {
        document: OutputDocument,
    },
    ConfigLoaded {
        options: ComposeOptions,
    },
    ExtractLoaded {
        doc_id: DocumentId,
        file_name: String,
        page_count: usize,
    },
    ExtractComplete {
        document: OutputDocument,
    },
    OutputSaved {
        path: PathBuf,
    },
    Error {
        operation: Operation,
        message: String,
    },
}

/// Handle to a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// A generated document waiting to be saved
#[derive(Clone)]
pub struct OutputDocument {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
    pub page_count: usize,
}

impl fmt::Debug for OutputDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputDocument")
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .field("page_count", &self.page_count)
            .finish()
    }
}

/// The user action a worker error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadImages,
    Crop,
    Compose,
    LoadConfig,
    LoadSource,
    Extract,
    Save,
}

impl Operation {
    /// Whether this operation holds the busy flag while it runs
    pub fn is_generation(self) -> bool {
        matches!(self, Operation::Compose | Operation::Extract)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Error => write!(f, "Error"),
            Severity::Success => write!(f, "Success"),
        }
    }
}

/// A message for the user, shown until dismissed or replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

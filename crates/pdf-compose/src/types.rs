use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("No images selected")]
    NoImages,
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid crop region: {0}")]
    InvalidCrop(String),
    #[error("Invalid position {index} (list has {len} images)")]
    InvalidPosition { index: usize, len: usize },
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Stable identity of an image in the ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Original image content as selected by the user
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
    /// Natural pixel size (width, height)
    pub dimensions: (u32, u32),
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>, dimensions: (u32, u32)) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            dimensions,
        }
    }
}

/// Rectangle in the coordinate space of the displayed (possibly scaled) image
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a normalized rectangle from two corner points in any order
    pub fn from_corners(a: (f32, f32), b: (f32, f32)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            width: (a.0 - b.0).abs(),
            height: (a.1 - b.1).abs(),
        }
    }
}

/// Size the image was displayed at when the crop rectangle was drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

impl DisplaySize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Encoded replacement image produced by the cropper
#[derive(Debug, Clone)]
pub struct CroppedImage {
    pub bytes: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

/// Decoded RGBA pixels small enough to upload as a thumbnail texture
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Page orientation derived from an image's aspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Physical page size for one composed image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
    pub orientation: Orientation,
}

impl PageSize {
    /// Convert a pixel size at the given resolution to millimetres
    pub fn from_pixels(width_px: u32, height_px: u32, dpi: f32) -> Self {
        let orientation = if width_px > height_px {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        Self {
            width_mm: width_px as f32 * 25.4 / dpi,
            height_mm: height_px as f32 * 25.4 / dpi,
            orientation,
        }
    }
}

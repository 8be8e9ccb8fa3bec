//! Image decoding, lossy encoding and thumbnails

use crate::types::*;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Longest edge of list thumbnails, in pixels
pub const PREVIEW_MAX_EDGE: u32 = 512;

/// An image read from disk, with a thumbnail for display
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub file: ImageFile,
    pub preview: PreviewImage,
}

/// Read and decode an image file
pub async fn load_image_file(path: impl AsRef<Path>) -> Result<LoadedImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    tokio::task::spawn_blocking(move || decode_image_file(name, bytes)).await?
}

/// Decode in-memory image content into a [`LoadedImage`]
pub fn decode_image_file(name: String, bytes: Vec<u8>) -> Result<LoadedImage> {
    let image = image::load_from_memory(&bytes)?;
    let preview = make_preview(&image);
    Ok(LoadedImage {
        file: ImageFile::new(name, bytes, image.dimensions()),
        preview,
    })
}

/// Downscale to at most [`PREVIEW_MAX_EDGE`] and convert to RGBA
pub fn make_preview(image: &DynamicImage) -> PreviewImage {
    let (width, height) = image.dimensions();
    let rgba = if width > PREVIEW_MAX_EDGE || height > PREVIEW_MAX_EDGE {
        image.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE).to_rgba8()
    } else {
        image.to_rgba8()
    };

    PreviewImage {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    }
}

/// Encode as baseline JPEG. Alpha is discarded.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(&rgb)?;
    Ok(bytes)
}

/// Pass an image through a lossy JPEG round trip
pub fn reencode_lossy(image: &DynamicImage, quality: u8) -> Result<DynamicImage> {
    let jpeg = encode_jpeg(image, quality)?;
    Ok(image::load_from_memory_with_format(
        &jpeg,
        image::ImageFormat::Jpeg,
    )?)
}

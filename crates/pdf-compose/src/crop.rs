//! Cropping a region of an image selected on a scaled-down preview
//!
//! The selection is drawn in display coordinates. It is mapped onto the
//! full-resolution image for sampling, but the output keeps the display-space
//! size of the selection.

use crate::image_io::encode_jpeg;
use crate::types::*;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbImage};
use std::sync::Arc;

/// Crop encoded image content off the calling thread
pub async fn crop(
    source: Arc<[u8]>,
    rect: CropRect,
    displayed: DisplaySize,
    quality: u8,
) -> Result<CroppedImage> {
    tokio::task::spawn_blocking(move || crop_image(&source, rect, displayed, quality)).await?
}

/// Decode `source` and crop it
pub fn crop_image(
    source: &[u8],
    rect: CropRect,
    displayed: DisplaySize,
    quality: u8,
) -> Result<CroppedImage> {
    let image = image::load_from_memory(source)?;
    crop_decoded(&image, rect, displayed, quality)
}

/// Crop an already decoded image
pub fn crop_decoded(
    image: &DynamicImage,
    rect: CropRect,
    displayed: DisplaySize,
    quality: u8,
) -> Result<CroppedImage> {
    if !(displayed.width > 0.0 && displayed.height > 0.0) {
        return Err(ComposeError::InvalidCrop(format!(
            "display size {}x{} is empty",
            displayed.width, displayed.height
        )));
    }

    let out_width = whole_pixels(rect.width);
    let out_height = whole_pixels(rect.height);
    if out_width == 0 || out_height == 0 {
        return Err(ComposeError::InvalidCrop(format!(
            "selection {}x{} is too small",
            rect.width, rect.height
        )));
    }

    let (natural_width, natural_height) = image.dimensions();
    let scale_x = natural_width as f32 / displayed.width;
    let scale_y = natural_height as f32 / displayed.height;

    let x_span = clip_axis(rect.x * scale_x, rect.width * scale_x, natural_width, out_width);
    let y_span = clip_axis(rect.y * scale_y, rect.height * scale_y, natural_height, out_height);

    let mut canvas = RgbImage::new(out_width, out_height);

    // A selection entirely outside the image leaves the canvas blank
    if let (Some(x), Some(y)) = (x_span, y_span) {
        let sampled = image
            .crop_imm(x.src_start, y.src_start, x.src_len, y.src_len)
            .resize_exact(x.dst_len, y.dst_len, FilterType::Triangle)
            .to_rgb8();
        imageops::overlay(&mut canvas, &sampled, x.dst_start, y.dst_start);
    } else {
        log::warn!("Crop selection lies outside the image");
    }

    let bytes = encode_jpeg(&DynamicImage::ImageRgb8(canvas), quality)?;
    log::debug!(
        "Cropped {}x{} image to {}x{}",
        natural_width,
        natural_height,
        out_width,
        out_height
    );

    Ok(CroppedImage {
        bytes: bytes.into(),
        width: out_width,
        height: out_height,
    })
}

/// Truncate a display length to whole output pixels
fn whole_pixels(len: f32) -> u32 {
    if len.is_finite() && len > 0.0 {
        len.floor() as u32
    } else {
        0
    }
}

/// Part of one axis that overlaps the source image, and where it lands in the output
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSpan {
    src_start: u32,
    src_len: u32,
    dst_start: i64,
    dst_len: u32,
}

fn clip_axis(start: f32, len: f32, natural: u32, out_len: u32) -> Option<AxisSpan> {
    let end = start + len;
    let clipped_start = start.max(0.0);
    let clipped_end = end.min(natural as f32);
    if !(clipped_end > clipped_start) {
        return None;
    }

    let src_start = (clipped_start.floor() as u32).min(natural.saturating_sub(1));
    let src_end = (clipped_end.ceil() as u32).clamp(src_start + 1, natural);

    let scale = out_len as f32 / len;
    let dst_start = ((clipped_start - start) * scale).round() as i64;
    let dst_len = (((clipped_end - clipped_start) * scale).round() as u32).clamp(1, out_len);

    Some(AxisSpan {
        src_start,
        src_len: src_end - src_start,
        dst_start,
        dst_len,
    })
}

//! Image-to-PDF composition: one full-bleed page per image

use crate::image_io::reencode_lossy;
use crate::options::ComposeOptions;
use crate::types::{ComposeError, PageSize, Result};
use image::GenericImageView;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, RawImage, RawImageData, RawImageFormat,
    XObjectTransform,
};
use std::sync::Arc;

/// A composed PDF and the page sizes it was built with
#[derive(Debug, Clone)]
pub struct ComposedPdf {
    pub bytes: Vec<u8>,
    pub pages: Vec<PageSize>,
}

/// Compose images into a PDF off the calling thread.
///
/// `progress` is called with `(pages_done, total)` after each page.
pub async fn compose_pdf<F>(
    sources: Vec<Arc<[u8]>>,
    options: &ComposeOptions,
    progress: F,
) -> Result<ComposedPdf>
where
    F: FnMut(usize, usize) + Send + 'static,
{
    options.validate()?;
    if sources.is_empty() {
        return Err(ComposeError::NoImages);
    }

    let options = options.clone();
    tokio::task::spawn_blocking(move || compose_pdf_bytes(&sources, &options, progress)).await?
}

/// Compose synchronously. Images are processed strictly in order.
pub fn compose_pdf_bytes<F>(
    sources: &[Arc<[u8]>],
    options: &ComposeOptions,
    mut progress: F,
) -> Result<ComposedPdf>
where
    F: FnMut(usize, usize),
{
    if sources.is_empty() {
        return Err(ComposeError::NoImages);
    }

    let mut doc = PdfDocument::new(&options.title);
    let mut pages = Vec::with_capacity(sources.len());

    for (index, source) in sources.iter().enumerate() {
        let image = image::load_from_memory(source)?;
        let (width_px, height_px) = image.dimensions();
        let size = PageSize::from_pixels(width_px, height_px, options.assumed_dpi);

        let lossy = reencode_lossy(&image, options.jpeg_quality)?;
        let raw = RawImage {
            pixels: RawImageData::U8(lossy.to_rgb8().into_raw()),
            width: width_px as usize,
            height: height_px as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let image_id = doc.add_image(&raw);

        // At the assumed resolution the image covers the page exactly
        let ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                dpi: Some(options.assumed_dpi),
                ..Default::default()
            },
        }];

        doc.pages
            .push(PdfPage::new(Mm(size.width_mm), Mm(size.height_mm), ops));
        pages.push(size);

        log::debug!(
            "Added page {} ({}x{} px, {:.1}x{:.1} mm, {:?})",
            index + 1,
            width_px,
            height_px,
            size.width_mm,
            size.height_mm,
            size.orientation
        );
        progress(index + 1, sources.len());
    }

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if bytes.is_empty() {
        return Err(ComposeError::Pdf("Document serialized to zero bytes".to_string()));
    }

    Ok(ComposedPdf { bytes, pages })
}

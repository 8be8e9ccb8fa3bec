use pdf_async_runtime::{
    CropRect, CroppedImage, DisplaySize, ImageId, Operation, PdfUpdate, PreviewImage,
};
use pdf_compose::{crop, load_image_file, make_preview};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Load images in the order they were picked. Unreadable files are reported
/// one by one; the rest are still added.
pub async fn handle_load(paths: Vec<PathBuf>, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    let mut images = Vec::with_capacity(paths.len());

    for path in paths {
        match load_image_file(&path).await {
            Ok(image) => images.push(image),
            Err(e) => {
                let _ = update_tx.send(PdfUpdate::Error {
                    operation: Operation::LoadImages,
                    message: format!("Failed to load image {}: {e}", path.display()),
                });
            }
        }
    }

    if !images.is_empty() {
        let _ = update_tx.send(PdfUpdate::ImagesLoaded { images });
    }
}

pub async fn handle_crop(
    id: ImageId,
    source: Arc<[u8]>,
    rect: CropRect,
    displayed: DisplaySize,
    quality: u8,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let result = async {
        let image = crop(source, rect, displayed, quality).await?;
        let preview = cropped_preview(&image).await?;
        Ok::<_, pdf_compose::ComposeError>((image, preview))
    }
    .await;

    match result {
        Ok((image, preview)) => {
            let _ = update_tx.send(PdfUpdate::CropApplied {
                id,
                image,
                preview,
                rect,
            });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                operation: Operation::Crop,
                message: format!("Failed to crop image: {e}"),
            });
        }
    }
}

async fn cropped_preview(image: &CroppedImage) -> pdf_compose::Result<PreviewImage> {
    let bytes = Arc::clone(&image.bytes);
    let preview = tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes).map(|decoded| make_preview(&decoded))
    })
    .await??;
    Ok(preview)
}

use pdf_async_runtime::{Operation, OutputDocument, PdfUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_save(
    document: OutputDocument,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match tokio::fs::write(&path, &document.bytes).await {
        Ok(()) => {
            log::info!(
                "Wrote {} ({} pages) to {}",
                document.file_name,
                document.page_count,
                path.display()
            );
            let _ = update_tx.send(PdfUpdate::OutputSaved { path });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                operation: Operation::Save,
                message: format!("Failed to save {}: {e}", path.display()),
            });
        }
    }
}

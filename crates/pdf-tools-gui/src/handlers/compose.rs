use pdf_async_runtime::{ComposeOptions, Operation, OutputDocument, PdfUpdate};
use pdf_compose::compose_pdf;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn handle_generate(
    sources: Vec<Arc<[u8]>>,
    options: ComposeOptions,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let total = sources.len();
    let _ = update_tx.send(PdfUpdate::Progress {
        operation: "Adding pages".to_string(),
        current: 0,
        total,
    });

    let progress_tx = update_tx.clone();
    let progress = move |current, total| {
        let _ = progress_tx.send(PdfUpdate::Progress {
            operation: "Adding pages".to_string(),
            current,
            total,
        });
    };

    match compose_pdf(sources, &options, progress).await {
        Ok(composed) => {
            log::info!("Composed {} pages", composed.pages.len());
            let _ = update_tx.send(PdfUpdate::ComposeComplete {
                document: OutputDocument {
                    file_name: options.output_file_name.clone(),
                    bytes: composed.bytes.into(),
                    page_count: composed.pages.len(),
                },
            });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                operation: Operation::Compose,
                message: format!("Failed to create PDF: {e}"),
            });
        }
    }
}

pub async fn handle_load_config(path: PathBuf, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match ComposeOptions::load(&path).await {
        Ok(options) => {
            let _ = update_tx.send(PdfUpdate::ConfigLoaded { options });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                operation: Operation::LoadConfig,
                message: format!("Failed to load configuration: {e}"),
            });
        }
    }
}

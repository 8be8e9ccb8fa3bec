use pdf_async_runtime::{PdfCommand, PdfUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes PDF commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    let mut extract_doc_store = handlers::extract::ExtractDocStore::new();

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut extract_doc_store, &update_tx).await;
    }

    log::debug!("Command channel closed, worker exiting");
}

/// Commands run one at a time, in the order they were sent
async fn process_command(
    cmd: PdfCommand,
    extract_doc_store: &mut handlers::extract::ExtractDocStore,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    match cmd {
        PdfCommand::ImagesLoad { paths } => {
            handlers::images::handle_load(paths, update_tx).await;
        }
        PdfCommand::ImagesCrop {
            id,
            source,
            rect,
            displayed,
            quality,
        } => {
            handlers::images::handle_crop(id, source, rect, displayed, quality, update_tx).await;
        }
        PdfCommand::ComposeGenerate { sources, options } => {
            handlers::compose::handle_generate(sources, options, update_tx).await;
        }
        PdfCommand::ComposeLoadConfig { path } => {
            handlers::compose::handle_load_config(path, update_tx).await;
        }
        PdfCommand::ExtractLoad { path } => {
            handlers::extract::handle_load(path, extract_doc_store, update_tx).await;
        }
        PdfCommand::ExtractGenerate { doc_id, ranges } => {
            handlers::extract::handle_generate(doc_id, ranges, extract_doc_store, update_tx)
                .await;
        }
        PdfCommand::SaveOutput { document, path } => {
            handlers::output::handle_save(document, path, update_tx).await;
        }
    }
}

use lopdf::Document;
use pdf_async_runtime::{DocumentId, Operation, OutputDocument, PageRange, PdfUpdate};
use pdf_pages::{extract_pages, load_pdf, page_count, save_pdf_bytes, split_file_name};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

// Store loaded source documents for extraction
static NEXT_DOC_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

struct SourceDoc {
    file_name: String,
    document: Arc<Document>,
}

/// Source documents parsed once and reused for every extraction
pub struct ExtractDocStore {
    documents: HashMap<u64, SourceDoc>,
}

impl ExtractDocStore {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Store a new source, replacing any previous one
    fn replace(&mut self, file_name: String, document: Document) -> u64 {
        let id = NEXT_DOC_ID.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.documents.clear();
        self.documents.insert(
            id,
            SourceDoc {
                file_name,
                document: Arc::new(document),
            },
        );
        id
    }

    fn get(&self, id: u64) -> Option<&SourceDoc> {
        self.documents.get(&id)
    }
}

pub async fn handle_load(
    input_path: PathBuf,
    doc_store: &mut ExtractDocStore,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let file_name = input_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    match load_pdf(&input_path).await {
        Ok(doc) => {
            let page_count = page_count(&doc);
            let doc_id = doc_store.replace(file_name.clone(), doc);
            let _ = update_tx.send(PdfUpdate::ExtractLoaded {
                doc_id: DocumentId(doc_id),
                file_name,
                page_count,
            });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                operation: Operation::LoadSource,
                message: format!("Failed to load PDF {file_name}: {e}"),
            });
        }
    }
}

pub async fn handle_generate(
    doc_id: DocumentId,
    ranges: Vec<PageRange>,
    doc_store: &ExtractDocStore,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let Some(source) = doc_store.get(doc_id.0) else {
        let _ = update_tx.send(PdfUpdate::Error {
            operation: Operation::Extract,
            message: format!("Document {:?} is no longer loaded", doc_id),
        });
        return;
    };

    let _ = update_tx.send(PdfUpdate::Progress {
        operation: "Copying pages".to_string(),
        current: 0,
        total: 2,
    });

    let extracted = match extract_pages(Arc::clone(&source.document), ranges).await {
        Ok(doc) => doc,
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                operation: Operation::Extract,
                message: format!("Failed to extract pages: {e}"),
            });
            return;
        }
    };

    let _ = update_tx.send(PdfUpdate::Progress {
        operation: "Saving PDF".to_string(),
        current: 1,
        total: 2,
    });

    let page_count = page_count(&extracted);
    match save_pdf_bytes(extracted).await {
        Ok(bytes) => {
            let _ = update_tx.send(PdfUpdate::ExtractComplete {
                document: OutputDocument {
                    file_name: split_file_name(&source.file_name),
                    bytes: bytes.into(),
                    page_count,
                },
            });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                operation: Operation::Extract,
                message: format!("Failed to save PDF: {e}"),
            });
        }
    }
}

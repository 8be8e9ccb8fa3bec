//! Document I/O operations for page extraction

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a PDF document from disk
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    load_pdf_mem(bytes).await
}

/// Parse a PDF document already held in memory
pub async fn load_pdf_mem(bytes: Vec<u8>) -> Result<Document> {
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Number of pages in a document
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Serialize a document
pub async fn save_pdf_bytes(mut doc: Document) -> Result<Vec<u8>> {
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, ExtractError>(writer)
    })
    .await??;
    Ok(bytes)
}

/// Save a document to disk
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = save_pdf_bytes(doc).await?;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Name offered for a document extracted from `source_name`
pub fn split_file_name(source_name: &str) -> String {
    format!("split_{source_name}")
}

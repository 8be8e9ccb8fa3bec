//! Building a new document from selected pages

use crate::copy::ObjectCopier;
use crate::range::{PageRange, resolve_page_ranges};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::sync::Arc;

/// Extract the pages named by `ranges` from a shared source document
pub async fn extract_pages(source: Arc<Document>, ranges: Vec<PageRange>) -> Result<Document> {
    tokio::task::spawn_blocking(move || extract_page_ranges(&source, &ranges)).await?
}

/// Check `ranges` against the document, then build the output from them
pub fn extract_page_ranges(source: &Document, ranges: &[PageRange]) -> Result<Document> {
    let indices = resolve_page_ranges(ranges, source.get_pages().len())?;
    extract_pages_sync(source, &indices)
}

/// Build a document holding the pages at `indices`, in that order.
///
/// Indices are zero-based and may repeat. Every index is checked before any
/// page is copied; pages repeated in the output share their resources.
pub fn extract_pages_sync(source: &Document, indices: &[usize]) -> Result<Document> {
    if indices.is_empty() {
        return Err(ExtractError::NoPages);
    }

    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
    let page_count = page_ids.len();

    if let Some(&bad) = indices.iter().find(|&&index| index >= page_count) {
        return Err(ExtractError::PageOutOfRange {
            page: bad + 1,
            page_count,
        });
    }

    log::debug!(
        "Extracting {} of {} pages: {:?}",
        indices.len(),
        page_count,
        indices
    );

    let mut output = Document::with_version(source.version.clone());
    let pages_tree_id = output.new_object_id();
    let mut copier = ObjectCopier::new(source);
    let mut page_refs = Vec::with_capacity(indices.len());

    for &index in indices {
        let page_id = copier.copy_page(&mut output, page_ids[index], pages_tree_id)?;
        page_refs.push(Object::Reference(page_id));
    }

    // Create pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);

    Ok(output)
}

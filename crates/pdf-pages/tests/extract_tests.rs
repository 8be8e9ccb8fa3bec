use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_pages::*;
use std::sync::Arc;

/// Build a document whose page N draws the marker text `Page N`.
///
/// All pages share one font object and inherit their MediaBox from the tree.
fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut kids = Vec::new();
    for n in 1..=num_pages {
        let content = format!("BT /F1 12 Tf 72 720 Td (Page {n}) Tj ET");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let resources = Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![(
                "F1",
                Object::Reference(font_id),
            )])),
        )]);

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Marker text of every page, in page order
fn markers(doc: &Document) -> Vec<String> {
    page_ids(doc)
        .into_iter()
        .map(|id| {
            let content = String::from_utf8(doc.get_page_content(id).unwrap()).unwrap();
            let start = content.find('(').unwrap() + 1;
            let end = content.find(')').unwrap();
            content[start..end].to_string()
        })
        .collect()
}

fn font_ref(doc: &Document, page_id: ObjectId) -> ObjectId {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
    fonts.get(b"F1").unwrap().as_reference().unwrap()
}

#[test]
fn test_extract_selected_pages_in_order() {
    let doc = create_test_pdf(5);
    let out = extract_pages_sync(&doc, &[0, 2, 4]).unwrap();

    assert_eq!(page_count(&out), 3);
    assert_eq!(markers(&out), vec!["Page 1", "Page 3", "Page 5"]);
}

#[test]
fn test_extract_out_of_range_fails() {
    let doc = create_test_pdf(5);
    let result = extract_pages_sync(&doc, &[10]);
    assert!(matches!(
        result,
        Err(ExtractError::PageOutOfRange {
            page: 11,
            page_count: 5
        })
    ));
}

#[test]
fn test_extract_reverse_order_and_duplicates() {
    let doc = create_test_pdf(3);

    let reversed = extract_pages_sync(&doc, &[2, 1, 0]).unwrap();
    assert_eq!(markers(&reversed), vec!["Page 3", "Page 2", "Page 1"]);

    let repeated = extract_pages_sync(&doc, &[1, 1, 0, 1]).unwrap();
    assert_eq!(
        markers(&repeated),
        vec!["Page 2", "Page 2", "Page 1", "Page 2"]
    );
}

#[test]
fn test_duplicated_pages_share_resources() {
    let doc = create_test_pdf(2);
    let out = extract_pages_sync(&doc, &[0, 0, 1]).unwrap();

    let ids = page_ids(&out);
    assert_eq!(ids.len(), 3);
    assert_ne!(ids[0], ids[1]);

    let font = font_ref(&out, ids[0]);
    assert_eq!(font_ref(&out, ids[1]), font);
    assert_eq!(font_ref(&out, ids[2]), font);
}

#[test]
fn test_extracted_pages_point_at_new_tree() {
    let doc = create_test_pdf(4);
    let out = extract_pages_sync(&doc, &[3, 0]).unwrap();

    let catalog_id = out.trailer.get(b"Root").unwrap().as_reference().unwrap();
    let pages_id = out
        .get_dictionary(catalog_id)
        .unwrap()
        .get(b"Pages")
        .unwrap()
        .as_reference()
        .unwrap();

    for id in page_ids(&out) {
        let page = out.get_dictionary(id).unwrap();
        assert_eq!(page.get(b"Parent").unwrap().as_reference().unwrap(), pages_id);
        assert!(page.get(b"MediaBox").is_ok(), "inherited MediaBox is resolved");
    }
}

#[test]
fn test_range_expression_drives_extraction() {
    let doc = create_test_pdf(9);
    let ranges = parse_page_ranges("1-3,5, 8-9").unwrap();
    let out = extract_page_ranges(&doc, &ranges).unwrap();

    assert_eq!(
        markers(&out),
        vec!["Page 1", "Page 2", "Page 3", "Page 5", "Page 8", "Page 9"]
    );
}

#[test]
fn test_range_past_end_is_rejected_whole() {
    let doc = create_test_pdf(3);
    let ranges = parse_page_ranges("1,2-5").unwrap();
    assert!(matches!(
        extract_page_ranges(&doc, &ranges),
        Err(ExtractError::PageOutOfRange { page: 4, .. })
    ));
}

#[test]
fn test_enormous_range_fails_instead_of_allocating() {
    let doc = create_test_pdf(5);
    for expression in ["1-18446744073709551615", "1-100000000000", "2,3-99999999999"] {
        let ranges = parse_page_ranges(expression).unwrap();
        match extract_page_ranges(&doc, &ranges) {
            Err(ExtractError::PageOutOfRange { page, page_count }) => {
                assert_eq!(page, 6, "{expression:?}");
                assert_eq!(page_count, 5);
            }
            other => panic!("Expected PageOutOfRange for {expression:?}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_extract_save_and_reload() {
    use tempfile::NamedTempFile;

    let doc = create_test_pdf(6);
    let out = extract_pages(Arc::new(doc), vec![5..=5, 1..=1]).await.unwrap();

    let temp = NamedTempFile::new().unwrap();
    save_pdf(out, temp.path()).await.unwrap();

    let loaded = load_pdf(temp.path()).await.unwrap();
    assert_eq!(page_count(&loaded), 2);
    assert_eq!(markers(&loaded), vec!["Page 6", "Page 2"]);
}

#[tokio::test]
async fn test_load_from_memory() {
    let mut doc = create_test_pdf(2);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();

    let loaded = load_pdf_mem(bytes).await.unwrap();
    assert_eq!(page_count(&loaded), 2);

    let saved = save_pdf_bytes(loaded).await.unwrap();
    assert!(saved.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_load_garbage_fails() {
    let result = load_pdf_mem(b"definitely not a pdf".to_vec()).await;
    assert!(matches!(result, Err(ExtractError::Pdf(_))));
}
